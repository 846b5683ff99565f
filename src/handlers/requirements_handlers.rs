use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::csrf;
use crate::auth::gate::SubmissionGate;
use crate::auth::session::{SessionIdentity, set_flash};
use crate::errors::{AppError, render};
use crate::requirements::{
    Field, FormState, Navigator, RequirementsStore, SubmissionFlow, SubmitError,
};
use crate::templates_structs::{PageContext, RequirementsFormTemplate};

const CSRF_FIELD: &str = "csrf_token";

/// Turns the flow's navigation request into a `303 See Other`.
#[derive(Debug, Default)]
pub struct RedirectNavigator {
    location: Option<String>,
}

impl Navigator for RedirectNavigator {
    fn navigate(&mut self, route: &str) {
        self.location = Some(route.to_string());
    }
}

impl RedirectNavigator {
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn into_response(self) -> HttpResponse {
        match self.location {
            Some(location) => HttpResponse::SeeOther()
                .insert_header(("Location", location))
                .finish(),
            None => HttpResponse::NoContent().finish(),
        }
    }
}

fn render_form(
    session: &Session,
    form: FormState,
    notice: Option<String>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, "/requirements")?;
    render(RequirementsFormTemplate { ctx, form, notice })
}

/// GET /requirements
pub async fn form(session: Session) -> Result<HttpResponse, AppError> {
    render_form(&session, FormState::default(), None)
}

/// POST /requirements
/// Saves one set of requirements and redirects to the dashboard; on failure
/// the form comes back filled in with an alert.
pub async fn submit<S: RequirementsStore + 'static>(
    store: web::Data<S>,
    gate: web::Data<SubmissionGate>,
    session: Session,
    body: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    let mut csrf_token = String::new();
    let mut flow = SubmissionFlow::new();
    for (name, value) in body.into_inner() {
        if name == CSRF_FIELD {
            csrf_token = value;
            continue;
        }
        match name.parse::<Field>() {
            Ok(field) => flow.update_field(field, value),
            Err(e) => log::debug!("{e}, ignoring"),
        }
    }
    csrf::validate_csrf(&session, &csrf_token)?;

    // The CSRF token is per session, so it doubles as the gate key.
    let Some(_permit) = gate.try_enter(&csrf_token) else {
        let err = SubmitError::InProgress;
        log::warn!("{err}");
        return render_form(&session, flow.into_form(), Some(err.user_message()));
    };

    let identity = SessionIdentity(&session);
    let mut navigator = RedirectNavigator::default();
    match flow.submit(&identity, store.get_ref(), &mut navigator).await {
        Ok(_) => {
            set_flash(&session, "Requirements saved");
            Ok(navigator.into_response())
        }
        Err(e) => {
            log::error!("Error submitting requirements: {e}");
            render_form(&session, flow.into_form(), Some(e.user_message()))
        }
    }
}
