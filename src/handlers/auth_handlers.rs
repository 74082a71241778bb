use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::{instrument, debug, info};

use crate::auth::{self, CurrentUser, SessionSettings};
use crate::db::DbPool;
use crate::dto::{LoginDto, MessageResponse, RegisterDto, UserResponse, UserView};
use crate::errors::ApiError;
use crate::extract::BlogJson;
use crate::repo;

/// Runs CPU-heavy password work off the async executor
async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Database(e.into()))?
        .map_err(ApiError::Database)
}

/// Handler for registering a new user
///
/// This function handles POST requests to `/api/register/`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `payload` - Username, email and password
///
/// ### Returns
///
/// 201 with the public view of the new user
#[instrument(skip(pool, payload))]
pub async fn register_handler(
    State(pool): State<Arc<DbPool>>,
    BlogJson(payload): BlogJson<RegisterDto>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let input = payload.validate()?;

    if repo::username_exists(&pool, &input.username).map_err(ApiError::Database)? {
        return Err(ApiError::Conflict("Username already exists".to_string()));
    }
    if repo::email_exists(&pool, &input.email).map_err(ApiError::Database)? {
        return Err(ApiError::Conflict("Email already exists".to_string()));
    }

    let password = input.password;
    let password_hash = blocking(move || Ok(auth::hash_password(&password)?)).await?;

    let user = match repo::create_user(&pool, input.username.clone(), input.email, password_hash) {
        Ok(user) => user,
        // Lost a race with a concurrent registration
        Err(e) if repo::is_unique_violation(&e) => {
            let taken = repo::username_exists(&pool, &input.username).map_err(ApiError::Database)?;
            let msg = if taken { "Username already exists" } else { "Email already exists" };
            return Err(ApiError::Conflict(msg.to_string()));
        }
        Err(e) => return Err(ApiError::Database(e)),
    };

    info!("Registered user {}", user.get_id());

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            message: "User created successfully",
            user: UserView::from(&user),
        }),
    ))
}

/// Handler for logging in
///
/// This function handles POST requests to `/api/login/`.
///
/// On success a session is stored and its token set as an HttpOnly cookie.
/// Unknown usernames and wrong passwords get the same 401.
#[instrument(skip(pool, sessions, jar, payload))]
pub async fn login_handler(
    State(pool): State<Arc<DbPool>>,
    State(sessions): State<SessionSettings>,
    jar: CookieJar,
    BlogJson(payload): BlogJson<LoginDto>,
) -> Result<(CookieJar, Json<UserResponse>), ApiError> {
    let (username, password) = payload.validate()?;

    let auth_pool = pool.clone();
    let user = blocking(move || auth::authenticate(&auth_pool, &username, &password))
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let purged = repo::purge_expired_sessions(&pool).map_err(ApiError::Database)?;
    if purged > 0 {
        debug!("Purged {} expired sessions", purged);
    }

    let session = repo::create_session(&pool, user.get_id(), sessions.ttl).map_err(ApiError::Database)?;

    info!("User {} logged in", user.get_id());

    Ok((
        jar.add(sessions.session_cookie(session.get_token())),
        Json(UserResponse {
            message: "Login successful",
            user: UserView::from(&user),
        }),
    ))
}

/// Handler for logging out
///
/// This function handles POST requests to `/api/logout/`.
#[instrument(skip_all)]
pub async fn logout_handler(
    State(pool): State<Arc<DbPool>>,
    State(sessions): State<SessionSettings>,
    jar: CookieJar,
    current_user: Result<CurrentUser, ApiError>,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    let current_user = current_user.map_err(|e| match e {
        ApiError::Unauthorized(_) => ApiError::unauthorized("User not authenticated"),
        other => other,
    })?;

    repo::delete_session(&pool, current_user.session_token()).map_err(ApiError::Database)?;

    info!("User {} logged out", current_user.id());

    Ok((
        jar.remove(sessions.removal_cookie()),
        Json(MessageResponse { message: "Logout successful" }),
    ))
}
