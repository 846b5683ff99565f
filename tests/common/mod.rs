//! Shared test infrastructure for the HTTP-level tests.
//!
//! - `MemoryStore` - an in-process `RequirementsStore` that records inserts
//! - `build_app()` - the protected routes behind a cookie session, plus a
//!   `/test/sign-in/{id}` route that stands in for the login form
#![allow(dead_code)]

use std::sync::Mutex;

use actix_session::{Session, SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::Key;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, middleware, web};

use growth_requirements::auth::gate::SubmissionGate;
use growth_requirements::auth::middleware::require_auth;
use growth_requirements::auth::session::sign_in;
use growth_requirements::handlers;
use growth_requirements::requirements::{
    RequirementsStore, SavedRequirements, StoreError, SubmissionRecord,
};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const TEST_USER_ID: &str = "u1";
pub const TEST_USERNAME: &str = "tester";

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<SavedRequirements>>,
    inserts: Mutex<Vec<SubmissionRecord>>,
    failure: Mutex<Option<StoreError>>,
}

impl MemoryStore {
    pub fn failing(error: StoreError) -> Self {
        let store = Self::default();
        *store.failure.lock().unwrap() = Some(error);
        store
    }

    /// Every record the flow tried to insert, successful or not.
    pub fn inserts(&self) -> Vec<SubmissionRecord> {
        self.inserts.lock().unwrap().clone()
    }

    pub fn rows(&self) -> Vec<SavedRequirements> {
        self.rows.lock().unwrap().clone()
    }
}

impl RequirementsStore for MemoryStore {
    async fn insert_requirements(
        &self,
        record: &SubmissionRecord,
    ) -> Result<SavedRequirements, StoreError> {
        self.inserts.lock().unwrap().push(record.clone());
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        let mut rows = self.rows.lock().unwrap();
        let saved = SavedRequirements::from_record(
            rows.len() as i64 + 1,
            record,
            "2026-10-16 09:30:00+00",
        );
        rows.push(saved.clone());
        Ok(saved)
    }

    async fn latest_for_user(&self, user_id: &str) -> Result<Option<SavedRequirements>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().rev().find(|r| r.user_id == user_id).cloned())
    }

    async fn count_profiles(&self) -> Result<i64, StoreError> {
        Ok(1)
    }
}

// ============================================================================
// APP SETUP
// ============================================================================

async fn test_sign_in(session: Session, path: web::Path<String>) -> HttpResponse {
    sign_in(&session, &path.into_inner(), TEST_USERNAME);
    HttpResponse::Ok().finish()
}

/// The protected routes, wired the same way `main` wires them.
pub fn build_app(
    store: web::Data<MemoryStore>,
    gate: web::Data<SubmissionGate>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session_mw = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_secure(false)
        .build();

    App::new()
        .wrap(session_mw)
        .wrap(middleware::Logger::default())
        .app_data(store)
        .app_data(gate)
        .route("/test/sign-in/{id}", web::get().to(test_sign_in))
        .service(
            web::scope("")
                .wrap(actix_web::middleware::from_fn(require_auth))
                .configure(handlers::configure_protected::<MemoryStore>),
        )
        .default_service(web::to(handlers::not_found))
}

/// Pull the hidden CSRF token out of a rendered form.
pub fn extract_csrf_token(html: &str) -> Option<String> {
    let re = regex::Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#).ok()?;
    re.captures(html).map(|c| c[1].to_string())
}

/// Urlencoded form body for the requirements page.
pub fn form_body(token: &str, fields: &[(&str, &str)]) -> String {
    let mut pairs: Vec<(&str, &str)> = vec![("csrf_token", token)];
    pairs.extend_from_slice(fields);
    serde_urlencoded::to_string(&pairs).expect("encode form")
}

pub fn valid_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("niche", "Young professionals into fitness"),
        ("location", "New York, USA"),
        ("comments", "Short and friendly"),
        ("dms", "Reply only"),
        ("max_following", "500"),
        ("hashtags", "#fitness #health"),
        ("account_targets", "@gym_a @gym_b"),
    ]
}
