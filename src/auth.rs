//! Local accounts: sign-up, sign-in and the remembered session.
//!
//! Collections stay usable without an account; signing in only records who
//! is using the tool. Passwords are stored as a salted SHA-256 digest.

use rand::Rng;
use regex::Regex;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{info, warn};

use crate::db::SqliteStore;
use crate::fields::FormField;
use crate::models::User;

/// Accepted email shape: local part, `@`, domain with a 2-64 letter TLD.
pub const EMAIL_PATTERN: &str = r"^[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}$";

const SALT_BYTES: usize = 16;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Registration failed: \"{0}\" is not a valid email address")]
    InvalidEmail(String),
    #[error("Registration failed: email addresses do not match")]
    EmailMismatch,
    #[error("Registration failed: passwords do not match")]
    PasswordMismatch,
    #[error("Registration failed: {0} is already registered")]
    EmailTaken(String),
    #[error("Registration failed: username {0} is taken")]
    UsernameTaken(String),
    #[error("Authentication failed")]
    AuthenticationFailed,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthField {
    Name,
    Username,
    Email,
    ConfirmEmail,
    Password,
    ConfirmPassword,
}

impl AuthField {
    fn is_secret(self) -> bool {
        matches!(self, AuthField::Password | AuthField::ConfirmPassword)
    }
}

impl FormField for AuthField {
    const ALL: &'static [Self] = &[
        AuthField::Name,
        AuthField::Username,
        AuthField::Email,
        AuthField::ConfirmEmail,
        AuthField::Password,
        AuthField::ConfirmPassword,
    ];

    fn label(self) -> &'static str {
        match self {
            AuthField::Name => "Full name",
            AuthField::Username => "Username",
            AuthField::Email => "Email address",
            AuthField::ConfirmEmail => "Confirm email address",
            AuthField::Password => "Password",
            AuthField::ConfirmPassword => "Confirm password",
        }
    }

    fn key(self) -> &'static str {
        match self {
            AuthField::Name => "name",
            AuthField::Username => "username",
            AuthField::Email => "email",
            AuthField::ConfirmEmail => "confirm_email",
            AuthField::Password => "password",
            AuthField::ConfirmPassword => "confirm_password",
        }
    }

    fn is_mandatory(self) -> bool {
        true
    }
}

/// Everything the sign-up form collects.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub confirm_email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Registration {
    fn text(&self, field: AuthField) -> &str {
        match field {
            AuthField::Name => &self.full_name,
            AuthField::Username => &self.username,
            AuthField::Email => &self.email,
            AuthField::ConfirmEmail => &self.confirm_email,
            AuthField::Password => &self.password,
            AuthField::ConfirmPassword => &self.confirm_password,
        }
    }

    /// Check the fields in form order and report the first problem.
    pub fn validate(&self) -> Result<(), AuthError> {
        for &field in AuthField::ALL {
            require(field, self.text(field))?;
            match field {
                AuthField::Email if !is_valid_email(self.email.trim()) => {
                    return Err(AuthError::InvalidEmail(self.email.trim().to_string()));
                }
                AuthField::ConfirmEmail if self.confirm_email.trim() != self.email.trim() => {
                    return Err(AuthError::EmailMismatch);
                }
                AuthField::ConfirmPassword if self.confirm_password != self.password => {
                    return Err(AuthError::PasswordMismatch);
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// What the sign-in form collects.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<(), AuthError> {
        require(AuthField::Username, &self.username)?;
        require(AuthField::Password, &self.password)
    }
}

// Passwords are taken verbatim; everything else is blank when only
// whitespace remains.
fn require(field: AuthField, text: &str) -> Result<(), AuthError> {
    let blank = if field.is_secret() {
        text.is_empty()
    } else {
        text.trim().is_empty()
    };
    if blank {
        return Err(AuthError::MissingField(field.label()));
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    Regex::new(EMAIL_PATTERN)
        .map(|pattern| pattern.is_match(email))
        .unwrap_or(false)
}

/// Hex SHA-256 of `salt` followed by `password`.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn new_salt() -> String {
    let bytes: [u8; SALT_BYTES] = rand::thread_rng().gen();
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Register a new account. Does not sign it in.
pub fn sign_up(store: &mut SqliteStore, registration: &Registration) -> Result<User, AuthError> {
    registration.validate()?;
    let username = registration.username.trim();
    let email = registration.email.trim();

    if store.find_user(username)?.is_some() {
        warn!(username, "sign-up refused, username taken");
        return Err(AuthError::UsernameTaken(username.to_string()));
    }
    if store.email_registered(email)? {
        warn!(username, "sign-up refused, email already registered");
        return Err(AuthError::EmailTaken(email.to_string()));
    }

    let salt = new_salt();
    let digest = hash_password(&salt, &registration.password);
    let user = User {
        id: None,
        username: username.to_string(),
        full_name: registration.full_name.trim().to_string(),
        email: email.to_string(),
    };
    let saved = store.register_user(&user, &salt, &digest)?;
    info!(username = %saved.username, "account registered");
    Ok(saved)
}

/// Resolve the username, check the password and remember the account as
/// signed in. Unknown usernames and wrong passwords fail the same way.
pub fn sign_in(store: &mut SqliteStore, credentials: &Credentials) -> Result<User, AuthError> {
    credentials.validate()?;
    let username = credentials.username.trim();

    let Some(stored) = store.find_user(username)? else {
        warn!(username, "sign-in failed, unknown username");
        return Err(AuthError::AuthenticationFailed);
    };
    if hash_password(&stored.salt, &credentials.password) != stored.password_hash {
        warn!(username, "sign-in failed, wrong password");
        return Err(AuthError::AuthenticationFailed);
    }

    store.start_session(&stored.user.username)?;
    info!(username, "signed in");
    Ok(stored.user)
}

/// Returns whether an account was signed in.
pub fn sign_out(store: &mut SqliteStore) -> Result<bool, AuthError> {
    let ended = store.end_session()?;
    if ended {
        info!("signed out");
    }
    Ok(ended)
}

/// The signed-in account, if the session still points at one.
pub fn current_user(store: &SqliteStore) -> Result<Option<User>, AuthError> {
    let Some(username) = store.session()? else {
        return Ok(None);
    };
    match store.find_user(&username)? {
        Some(stored) => Ok(Some(stored.user)),
        None => {
            warn!(username = %username, "session refers to a missing account");
            Ok(None)
        }
    }
}
