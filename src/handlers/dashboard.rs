use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::{Local, Timelike};

use crate::auth::session::get_user_id;
use crate::errors::{AppError, render};
use crate::requirements::RequirementsStore;
use crate::templates_structs::{DashboardTemplate, PageContext};

fn time_greeting(username: &str, hour: u32) -> String {
    let period = match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    };
    format!("{}, {}", period, username)
}

/// GET /dashboard
pub async fn index<S: RequirementsStore + 'static>(
    store: web::Data<S>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let user_id = get_user_id(&session)
        .ok_or_else(|| AppError::Session("User not logged in".to_string()))?;
    let ctx = PageContext::build(&session, "/dashboard")?;
    let greeting = time_greeting(&ctx.username, Local::now().hour());

    // A store hiccup shouldn't take the whole page down.
    let latest = store.latest_for_user(&user_id).await.unwrap_or_else(|e| {
        log::error!("Failed to load requirements for user {user_id}: {e}");
        None
    });

    render(DashboardTemplate { ctx, greeting, latest })
}
