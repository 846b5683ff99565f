//! The requirements form: field state, the submission flow, and the store
//! submissions are written to.

pub mod flow;
pub mod store;
pub mod types;

pub use flow::{DASHBOARD_ROUTE, IdentityContext, Navigator, SubmissionFlow, SubmitError};
pub use store::{PgStore, RequirementsStore, StoreError};
pub use types::{Field, FormState, Identity, SavedRequirements, SubmissionRecord};
