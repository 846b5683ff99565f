use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::session::{get_user_id, sign_in};
use crate::auth::{csrf, password};
use crate::errors::{AppError, render};
use crate::models::profile;
use crate::templates_structs::{APP_NAME, LoginTemplate};

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

fn login_form(session: &Session, error: Option<String>) -> Result<HttpResponse, AppError> {
    let csrf_token = csrf::get_or_create_token(session);
    render(LoginTemplate { error, app_name: APP_NAME.to_string(), csrf_token })
}

pub async fn login_page(session: Session) -> Result<HttpResponse, AppError> {
    if get_user_id(&session).is_some() {
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/requirements"))
            .finish());
    }
    login_form(&session, None)
}

pub async fn login_submit(
    pool: web::Data<PgPool>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let found = profile::find_by_username(&pool, form.username.trim()).await?;
    match found {
        Some(p) if password::verify_password(&form.password, &p.password_hash) => {
            log::info!("Profile {} signed in", p.id);
            sign_in(&session, &p.id, &p.username);
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/requirements"))
                .finish())
        }
        _ => {
            log::warn!("Failed sign-in for username {:?}", form.username);
            login_form(&session, Some("Invalid username or password".to_string()))
        }
    }
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/login"))
        .finish())
}
