use std::fmt;

use super::store::RequirementsStore;
use super::types::{Field, FormState, Identity, SavedRequirements, SubmissionRecord};
use crate::validate;

/// Where the user lands after requirements are saved.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

const PERSISTENCE_FALLBACK: &str = "Failed to save requirements";
const NOTICE_FALLBACK: &str = "Please try again.";

/// Source of the currently signed-in user.
pub trait IdentityContext {
    fn current_identity(&self) -> Option<Identity>;
}

/// Moves the user to another route once a submission succeeds.
pub trait Navigator {
    fn navigate(&mut self, route: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Required fields missing or `max_following` not a count.
    Validation(Vec<String>),
    /// No signed-in user, or one without an id.
    Authentication,
    /// The store rejected the insert.
    Persistence(String),
    /// This flow already has a submission outstanding.
    InProgress,
}

impl SubmitError {
    fn detail(&self) -> String {
        match self {
            SubmitError::Validation(errors) => errors.join("; "),
            SubmitError::Authentication => "User not authenticated".to_string(),
            SubmitError::Persistence(msg) => msg.clone(),
            SubmitError::InProgress => "A submission is already in progress".to_string(),
        }
    }

    /// Text for the notice shown above the form.
    pub fn user_message(&self) -> String {
        let detail = self.detail();
        if detail.trim().is_empty() {
            format!("{PERSISTENCE_FALLBACK}: {NOTICE_FALLBACK}")
        } else {
            format!("{PERSISTENCE_FALLBACK}: {detail}")
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Validation(_) => write!(f, "Validation error: {}", self.detail()),
            SubmitError::Authentication => write!(f, "Authentication error: {}", self.detail()),
            SubmitError::Persistence(_) => write!(f, "Persistence error: {}", self.detail()),
            SubmitError::InProgress => write!(f, "Submission in progress"),
        }
    }
}

/// Clears the `submitting` flag on every exit path, including a dropped future.
struct SubmittingGuard<'a>(&'a mut bool);

impl<'a> SubmittingGuard<'a> {
    fn engage(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// One user's pass through the requirements form: the typed-in values plus
/// whether a submission is currently outstanding.
#[derive(Debug, Clone, Default)]
pub struct SubmissionFlow {
    form: FormState,
    submitting: bool,
}

impl SubmissionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn into_form(self) -> FormState {
        self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Validate, insert one `user_requirements` row, and navigate to the
    /// dashboard. The form is left as it was whatever the outcome.
    pub async fn submit<I, S, N>(
        &mut self,
        identity: &I,
        store: &S,
        navigator: &mut N,
    ) -> Result<SavedRequirements, SubmitError>
    where
        I: IdentityContext + ?Sized,
        S: RequirementsStore,
        N: Navigator + ?Sized,
    {
        // Only guards this flow value; across HTTP requests `SubmissionGate` applies.
        if self.submitting {
            log::warn!("Requirements submission ignored: one is already in progress");
            return Err(SubmitError::InProgress);
        }

        let Self { form, submitting } = self;
        let _guard = SubmittingGuard::engage(submitting);
        log::info!("Starting requirements submission");

        let errors: Vec<String> = Field::ALL
            .into_iter()
            .filter(|f| f.is_required())
            .filter_map(|f| validate::validate_required(form.get(f), f.label()))
            .collect();
        if !errors.is_empty() {
            log::warn!("Requirements submission rejected: {}", errors.join("; "));
            return Err(SubmitError::Validation(errors));
        }

        let user_id = match identity.current_identity() {
            Some(who) if !who.id.is_empty() => who.id,
            _ => {
                log::error!("Requirements submission without an authenticated user");
                return Err(SubmitError::Authentication);
            }
        };

        let max_following = validate::parse_optional_count(&form.max_following, Field::MaxFollowing.label())
            .map_err(|e| {
                log::warn!("Requirements submission rejected: {e}");
                SubmitError::Validation(vec![e])
            })?;

        let record = SubmissionRecord {
            user_id,
            niche: form.niche.clone(),
            location: form.location.clone(),
            comments: form.comments.clone(),
            dms: form.dms.clone(),
            max_following,
            hashtags: form.hashtags.clone(),
            account_targets: form.account_targets.clone(),
        };
        log::debug!(
            "Saving requirements: {}",
            serde_json::to_string(&record).unwrap_or_default()
        );

        let saved = store.insert_requirements(&record).await.map_err(|e| {
            log::error!("Failed to save requirements for user {}: {e}", record.user_id);
            let message = e
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| PERSISTENCE_FALLBACK.to_string());
            SubmitError::Persistence(message)
        })?;

        log::info!("Saved requirements {} for user {}", saved.id, saved.user_id);
        navigator.navigate(DASHBOARD_ROUTE);
        Ok(saved)
    }
}
