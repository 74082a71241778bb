use anyhow::{anyhow, Result};
use chrono::{Duration, NaiveDateTime, Utc};
use diesel::prelude::*;

use super::User;

/// A server-side login session, addressed by the token stored in the
/// session cookie
#[derive(Queryable, Selectable, Identifiable, Insertable, Associations, Debug, Clone, PartialEq, Eq)]
#[diesel(belongs_to(User))]
#[diesel(primary_key(token))]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Session {
    /// Opaque random token (64 hex characters)
    token: String,

    /// The authenticated user
    user_id: i32,

    created_at: NaiveDateTime,

    /// After this instant the session no longer authenticates anyone
    expires_at: NaiveDateTime,
}

impl Session {
    /// Opens a new session for a user that lasts for `ttl`
    ///
    /// ### Arguments
    ///
    /// * `user_id` - The ID of the authenticated user
    /// * `ttl` - How long the session stays valid
    ///
    /// ### Returns
    ///
    /// A new `Session` with a freshly generated token, or an error when
    /// the expiry falls outside the representable dates
    pub fn new(user_id: i32, ttl: Duration) -> Result<Self> {
        let now = Utc::now().naive_utc();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| anyhow!("Session lifetime of {} hours is out of range", ttl.num_hours()))?;

        Ok(Self {
            token: generate_token(),
            user_id,
            created_at: now,
            expires_at,
        })
    }

    pub fn get_token(&self) -> String {
        self.token.clone()
    }

    #[cfg(test)]

    pub fn get_user_id(&self) -> i32 {
        self.user_id
    }

    #[cfg(test)]

    pub fn get_created_at(&self) -> chrono::DateTime<Utc> {
        chrono::DateTime::from_naive_utc_and_offset(self.created_at, Utc)
    }

    #[cfg(test)]

    pub fn get_expires_at(&self) -> chrono::DateTime<Utc> {
        chrono::DateTime::from_naive_utc_and_offset(self.expires_at, Utc)
    }

    /// Whether the session has expired as of `now`
    #[cfg(test)]
    pub fn is_expired_at(&self, now: chrono::DateTime<Utc>) -> bool {
        self.get_expires_at() <= now
    }
}

/// 256 bits of randomness from two v4 UUIDs, hex encoded
fn generate_token() -> String {
    format!(
        "{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    )
}
