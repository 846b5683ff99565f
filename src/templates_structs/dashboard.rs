use askama::Template;

use super::PageContext;
use crate::requirements::SavedRequirements;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub greeting: String,
    pub latest: Option<SavedRequirements>,
}
