use askama::Template;

use super::PageContext;
use crate::requirements::FormState;

#[derive(Template)]
#[template(path = "requirements.html")]
pub struct RequirementsFormTemplate {
    pub ctx: PageContext,
    pub form: FormState,
    /// Set after a failed submission; shown as a blocking alert.
    pub notice: Option<String>,
}
