use crate::db::DbPool;
use crate::models::{Session, User};
use crate::schema::{sessions, users};
use chrono::{Duration, Utc};
use diesel::prelude::*;
use anyhow::Result;
use tracing::{instrument, debug, info};

/// Opens a session for a user
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `user_id` - The authenticated user
/// * `ttl` - How long the session stays valid
///
/// ### Returns
///
/// A Result containing the stored Session, whose token goes into the cookie
#[instrument(skip(pool), fields(user_id = %user_id))]
pub fn create_session(pool: &DbPool, user_id: i32, ttl: Duration) -> Result<Session> {
    let conn = &mut pool.get()?;

    let session = Session::new(user_id, ttl)?;

    diesel::insert_into(sessions::table)
        .values(&session)
        .execute(conn)?;

    info!("Opened session for user {}", user_id);

    Ok(session)
}

/// Resolves a session token to its user
///
/// ### Returns
///
/// The user if the token names a session that has not expired, None otherwise
#[instrument(skip(pool, token))]
pub fn get_session_user(pool: &DbPool, token: &str) -> Result<Option<User>> {
    let conn = &mut pool.get()?;

    let now = Utc::now().naive_utc();

    let result = sessions::table
        .inner_join(users::table)
        .filter(sessions::token.eq(token))
        .filter(sessions::expires_at.gt(now))
        .select(User::as_select())
        .first(conn)
        .optional()?;

    if let Some(ref user) = result {
        debug!("Session belongs to user {}", user.get_id());
    }

    Ok(result)
}

/// Ends a session
///
/// ### Returns
///
/// Whether a session with that token existed
#[instrument(skip(pool, token))]
pub fn delete_session(pool: &DbPool, token: &str) -> Result<bool> {
    let conn = &mut pool.get()?;

    let deleted = diesel::delete(sessions::table.find(token)).execute(conn)?;

    debug!("Deleted {} session(s)", deleted);

    Ok(deleted > 0)
}

/// Removes every session that has expired
///
/// ### Returns
///
/// The number of sessions removed
#[instrument(skip(pool))]
pub fn purge_expired_sessions(pool: &DbPool) -> Result<usize> {
    let conn = &mut pool.get()?;

    let now = Utc::now().naive_utc();
    let purged = diesel::delete(sessions::table.filter(sessions::expires_at.le(now))).execute(conn)?;

    if purged > 0 {
        info!("Purged {} expired sessions", purged);
    }

    Ok(purged)
}
