use actix_session::Session;

use crate::requirements::{Identity, IdentityContext};

const USER_ID_KEY: &str = "user_id";
const USERNAME_KEY: &str = "username";
const FLASH_KEY: &str = "flash";

pub fn get_user_id(session: &Session) -> Option<String> {
    session
        .get::<String>(USER_ID_KEY)
        .unwrap_or(None)
        .filter(|id| !id.is_empty())
}

pub fn get_username(session: &Session) -> Result<String, String> {
    match session.get::<String>(USERNAME_KEY) {
        Ok(Some(username)) => Ok(username),
        Ok(None) => Err("No username in session".to_string()),
        Err(e) => Err(format!("Session error: {}", e)),
    }
}

/// Record a successful sign-in.
pub fn sign_in(session: &Session, user_id: &str, username: &str) {
    session.renew();
    let _ = session.insert(USER_ID_KEY, user_id);
    let _ = session.insert(USERNAME_KEY, username);
}

pub fn set_flash(session: &Session, message: &str) {
    let _ = session.insert(FLASH_KEY, message);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}

/// Identity lookup backed by the request's cookie session.
pub struct SessionIdentity<'a>(pub &'a Session);

impl IdentityContext for SessionIdentity<'_> {
    fn current_identity(&self) -> Option<Identity> {
        get_user_id(self.0).map(|id| Identity { id })
    }
}
