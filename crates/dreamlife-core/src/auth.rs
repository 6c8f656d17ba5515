//! Local sign-up and log-in.
//!
//! There is no account server: [`LocalAuthenticator`] only checks the shape
//! of the submitted form. Passwords are never written anywhere.

use crate::clock::Clock;
use crate::collection::Store;
use crate::error::Result;
use crate::paths;
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("please fill in all fields")]
    MissingFields,

    #[error("please enter a valid email")]
    InvalidEmail,

    #[error("password must be at least 6 characters")]
    PasswordTooShort,

    #[error("passwords do not match")]
    PasswordMismatch,
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub logged_in: bool,
    pub email: String,
    pub since: DateTime<Utc>,
}

pub trait Authenticator {
    fn sign_up(&self, form: &SignupForm) -> std::result::Result<Identity, AuthError>;

    fn log_in(&self, credentials: &Credentials) -> std::result::Result<Identity, AuthError>;
}

/// Format checks only. `known` is the identity saved by an earlier sign-up.
#[derive(Debug, Clone, Default)]
pub struct LocalAuthenticator {
    pub known: Option<Identity>,
}

impl LocalAuthenticator {
    pub fn new(known: Option<Identity>) -> Self {
        Self { known }
    }
}

fn check_email_and_password(email: &str, password: &str) -> std::result::Result<(), AuthError> {
    if !email.contains('@') {
        return Err(AuthError::InvalidEmail);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::PasswordTooShort);
    }
    Ok(())
}

impl Authenticator for LocalAuthenticator {
    fn sign_up(&self, form: &SignupForm) -> std::result::Result<Identity, AuthError> {
        let fields = [&form.name, &form.email, &form.password, &form.confirm_password];
        if fields.iter().any(|f| f.is_empty()) {
            return Err(AuthError::MissingFields);
        }
        check_email_and_password(&form.email, &form.password)?;
        if form.password != form.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(Identity {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
        })
    }

    fn log_in(&self, credentials: &Credentials) -> std::result::Result<Identity, AuthError> {
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        check_email_and_password(&credentials.email, &credentials.password)?;
        let email = credentials.email.trim();
        let identity = match &self.known {
            Some(known) if known.email.eq_ignore_ascii_case(email) => known.clone(),
            _ => Identity {
                name: email.split('@').next().unwrap_or_default().to_string(),
                email: email.to_string(),
            },
        };
        Ok(identity)
    }
}

// ---------------------------------------------------------------------------
// Session slots
// ---------------------------------------------------------------------------

pub fn stored_identity<S: KeyValueStore>(store: &Store<S>) -> Option<Identity> {
    store.load_value(paths::SLOT_USER)
}

pub fn current_session<S: KeyValueStore>(store: &Store<S>) -> Option<Session> {
    store
        .load_value::<Session>(paths::SLOT_SESSION)
        .filter(|s| s.logged_in)
}

fn start_session<S: KeyValueStore>(
    store: &mut Store<S>,
    identity: &Identity,
    clock: &dyn Clock,
) -> Result<Session> {
    let session = Session {
        logged_in: true,
        email: identity.email.clone(),
        since: clock.now(),
    };
    store.save_value(paths::SLOT_USER, identity)?;
    store.save_value(paths::SLOT_SESSION, &session)?;
    Ok(session)
}

/// Check the form and, only if it passes, save the identity and log in.
pub fn sign_up<S: KeyValueStore>(
    store: &mut Store<S>,
    auth: &dyn Authenticator,
    form: &SignupForm,
    clock: &dyn Clock,
) -> Result<Session> {
    let identity = auth.sign_up(form)?;
    let session = start_session(store, &identity, clock)?;
    tracing::info!(email = %identity.email, "signed up");
    Ok(session)
}

pub fn log_in<S: KeyValueStore>(
    store: &mut Store<S>,
    auth: &dyn Authenticator,
    credentials: &Credentials,
    clock: &dyn Clock,
) -> Result<Session> {
    let identity = auth.log_in(credentials)?;
    start_session(store, &identity, clock)
}

/// Clear the session. Returns `false` when nobody was logged in.
pub fn end_session<S: KeyValueStore>(store: &mut Store<S>) -> Result<bool> {
    store.clear(paths::SLOT_SESSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::DreamlifeError;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::on(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    fn form(password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn checks_run_in_order() {
        let auth = LocalAuthenticator::default();
        let missing = SignupForm {
            email: "not-an-email".into(),
            ..form("", "")
        };
        assert_eq!(auth.sign_up(&missing).unwrap_err(), AuthError::MissingFields);

        let bad_email = SignupForm {
            email: "not-an-email".into(),
            ..form("abc", "abc")
        };
        assert_eq!(auth.sign_up(&bad_email).unwrap_err(), AuthError::InvalidEmail);
        assert_eq!(
            auth.sign_up(&form("abc", "xyz")).unwrap_err(),
            AuthError::PasswordTooShort
        );
        assert_eq!(
            auth.sign_up(&form("secret1", "secret2")).unwrap_err(),
            AuthError::PasswordMismatch
        );
    }

    #[test]
    fn short_password_writes_nothing() {
        let mut store = Store::new(MemoryStore::new());
        let err = sign_up(
            &mut store,
            &LocalAuthenticator::default(),
            &form("abc", "abc"),
            &clock(),
        )
        .unwrap_err();
        assert!(matches!(err, DreamlifeError::Auth(AuthError::PasswordTooShort)));
        assert_eq!(
            err.to_string(),
            "password must be at least 6 characters"
        );
        assert!(store.backend().is_empty());
    }

    #[test]
    fn sign_up_saves_identity_without_password() {
        let mut store = Store::new(MemoryStore::new());
        let session = sign_up(
            &mut store,
            &LocalAuthenticator::default(),
            &form("secret1", "secret1"),
            &clock(),
        )
        .unwrap();
        assert!(session.logged_in);
        assert_eq!(current_session(&store), Some(session));
        assert_eq!(stored_identity(&store).unwrap().name, "Sam");

        let raw = store.backend().get(paths::SLOT_USER).unwrap().unwrap();
        assert!(!raw.contains("secret1"));
    }

    #[test]
    fn log_in_reuses_known_identity_and_logout_clears() {
        let mut store = Store::new(MemoryStore::new());
        let known = Identity {
            name: "Sam".into(),
            email: "sam@example.com".into(),
        };
        let auth = LocalAuthenticator::new(Some(known.clone()));
        let creds = Credentials {
            email: "SAM@example.com".into(),
            password: "hunter22".into(),
        };
        log_in(&mut store, &auth, &creds, &clock()).unwrap();
        assert_eq!(stored_identity(&store), Some(known));

        assert!(end_session(&mut store).unwrap());
        assert_eq!(current_session(&store), None);
        assert!(!end_session(&mut store).unwrap());
    }

    #[test]
    fn log_in_without_known_identity_uses_email_name() {
        let auth = LocalAuthenticator::default();
        let identity = auth
            .log_in(&Credentials {
                email: "ari@example.com".into(),
                password: "longenough".into(),
            })
            .unwrap();
        assert_eq!(identity.name, "ari");
    }
}
