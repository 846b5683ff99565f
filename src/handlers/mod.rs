use actix_web::{HttpResponse, web};

use crate::errors::AppError;
use crate::requirements::RequirementsStore;

pub mod auth_handlers;
pub mod dashboard;
pub mod requirements_handlers;

/// Routes that need a signed-in user and a requirements store. Mounted
/// inside the `require_auth` scope.
pub fn configure_protected<S: RequirementsStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/requirements", web::get().to(requirements_handlers::form))
        .route("/requirements", web::post().to(requirements_handlers::submit::<S>))
        .route("/dashboard", web::get().to(dashboard::index::<S>));
}

/// Fallback for unmatched paths.
pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound)
}
