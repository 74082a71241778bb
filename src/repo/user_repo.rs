use crate::db::DbPool;
use crate::models::{NewUser, User};
use crate::schema::users;
use diesel::prelude::*;
use anyhow::Result;
use tracing::{instrument, debug, info};

/// Creates a new user
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `username` - Unique login name
/// * `email` - Unique email address
/// * `password_hash` - PHC string produced by [`crate::auth::hash_password`]
///
/// ### Returns
///
/// A Result containing the newly created User
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The username or email is already taken (unique violation)
#[instrument(skip(pool, password_hash), fields(username = %username))]
pub fn create_user(pool: &DbPool, username: String, email: String, password_hash: String) -> Result<User> {
    debug!("Creating new user");

    let conn = &mut pool.get()?;

    let user = diesel::insert_into(users::table)
        .values(NewUser::new(username, email, password_hash))
        .returning(User::as_returning())
        .get_result(conn)?;

    info!("Successfully created user with id: {}", user.get_id());

    Ok(user)
}

/// Retrieves a user by ID
#[cfg(test)]
#[instrument(skip(pool), fields(user_id = %user_id))]
pub fn get_user(pool: &DbPool, user_id: i32) -> Result<Option<User>> {
    let conn = &mut pool.get()?;

    let result = users::table
        .find(user_id)
        .select(User::as_select())
        .first(conn)
        .optional()?;

    Ok(result)
}

/// Retrieves a user by username
#[instrument(skip(pool), fields(username = %username))]
pub fn get_user_by_username(pool: &DbPool, username: &str) -> Result<Option<User>> {
    let conn = &mut pool.get()?;

    let result = users::table
        .filter(users::username.eq(username))
        .select(User::as_select())
        .first(conn)
        .optional()?;

    if result.is_none() {
        debug!("User not found");
    }

    Ok(result)
}

/// Whether a username is already registered
pub fn username_exists(pool: &DbPool, username: &str) -> Result<bool> {
    let conn = &mut pool.get()?;

    let exists = diesel::select(diesel::dsl::exists(
        users::table.filter(users::username.eq(username)),
    ))
    .get_result(conn)?;

    Ok(exists)
}

/// Whether an email address is already registered
pub fn email_exists(pool: &DbPool, email: &str) -> Result<bool> {
    let conn = &mut pool.get()?;

    let exists = diesel::select(diesel::dsl::exists(
        users::table.filter(users::email.eq(email)),
    ))
    .get_result(conn)?;

    Ok(exists)
}
