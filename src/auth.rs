//! Authentication for the blog service
//!
//! Passwords are hashed with argon2 and sessions are server-side rows
//! addressed by an opaque token carried in a cookie. `CurrentUser` resolves
//! that cookie once per request and hands the authenticated user to the
//! handler as an ordinary argument.
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Duration;
use std::sync::{Arc, LazyLock};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::db::DbPool;
use crate::errors::ApiError;
use crate::models::User;
use crate::repo;

/// Errors raised while hashing or checking a password
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hashing(#[from] argon2::password_hash::Error),
}

/// Hashes a password with a fresh random salt
///
/// ### Returns
///
/// The PHC string (algorithm, parameters, salt and digest) to store
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Checks a password against a stored PHC string
///
/// ### Returns
///
/// `Ok(false)` on a mismatch; `Err` only when the stored hash is unusable
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Hashing(e)),
    }
}

// Verified against when the username is unknown, so both failure modes cost
// one argon2 run.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("not-a-real-password").ok());

/// Checks a username/password pair
///
/// ### Returns
///
/// The matching user, or `None` for an unknown username or a wrong password
#[instrument(skip(pool, password), fields(username = %username))]
pub fn authenticate(pool: &DbPool, username: &str, password: &str) -> anyhow::Result<Option<User>> {
    let Some(user) = repo::get_user_by_username(pool, username)? else {
        if let Some(dummy) = DUMMY_HASH.as_deref() {
            let _ = verify_password(password, dummy);
        }
        debug!("Unknown username");
        return Ok(None);
    };

    if verify_password(password, user.password_hash())? {
        Ok(Some(user))
    } else {
        debug!("Password mismatch");
        Ok(None)
    }
}

/// How session cookies are named and how long sessions live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub ttl: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cookie_name: "sessionid".to_string(),
            ttl: Duration::hours(336),
        }
    }
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            cookie_name: config.session_cookie_name.clone(),
            ttl: Duration::hours(config.session_ttl_hours as i64),
        }
    }
}

impl SessionSettings {
    /// Cookie carrying a freshly issued session token
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }

    /// Cookie that clears the session cookie on the client
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), "")).path("/").build()
    }
}

/// The user behind the request's session cookie
///
/// Rejects with 401 when the cookie is missing, unknown or expired.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    user: User,
    session_token: String,
}

impl CurrentUser {
    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn id(&self) -> i32 {
        self.user.get_id()
    }

    pub fn session_token(&self) -> &str {
        &self.session_token
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    Arc<DbPool>: FromRef<S>,
    SessionSettings: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pool = Arc::<DbPool>::from_ref(state);
        let settings = SessionSettings::from_ref(state);

        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(&settings.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| {
                debug!("No session cookie on request");
                ApiError::unauthorized("Authentication required")
            })?;

        let user = repo::get_session_user(&pool, &token)
            .map_err(ApiError::Database)?
            .ok_or_else(|| {
                debug!("Session token is unknown or expired");
                ApiError::unauthorized("Authentication required")
            })?;

        Ok(CurrentUser { user, session_token: token })
    }
}

#[cfg(test)]
mod tests;
