use super::*;
use crate::test_utils::setup_blog_db;
use axum::body::Body;
use axum::http::{header, Request};

#[test]
fn test_hash_and_verify_password() {
    let hash = hash_password("correct horse").unwrap();

    assert!(hash.starts_with("$argon2"));
    assert!(verify_password("correct horse", &hash).unwrap());
    assert!(!verify_password("battery staple", &hash).unwrap());
}

#[test]
fn test_hashes_are_salted() {
    let first = hash_password("same").unwrap();
    let second = hash_password("same").unwrap();

    assert_ne!(first, second);
}

#[test]
fn test_verify_against_garbage_hash_is_error() {
    assert!(verify_password("pw", "not-a-phc-string").is_err());
}

#[test]
fn test_authenticate() {
    let pool = setup_blog_db();
    let hash = hash_password("s3cret").unwrap();
    let user = repo::create_user(&pool, "alice".to_string(), "alice@example.com".to_string(), hash).unwrap();

    let ok = authenticate(&pool, "alice", "s3cret").unwrap();
    let wrong_password = authenticate(&pool, "alice", "nope").unwrap();
    let unknown_user = authenticate(&pool, "bob", "s3cret").unwrap();

    assert_eq!(ok.map(|u| u.get_id()), Some(user.get_id()));
    assert!(wrong_password.is_none());
    assert!(unknown_user.is_none());
}

#[test]
fn test_session_settings_from_config() {
    let mut config = crate::config::base_config(crate::config::Service::Blog, None);
    config.session_cookie_name = "sid".to_string();
    config.session_ttl_hours = 2;

    let settings = SessionSettings::from(&config);

    assert_eq!(settings.cookie_name, "sid");
    assert_eq!(settings.ttl, Duration::hours(2));
    assert_eq!(SessionSettings::default().cookie_name, "sessionid");
}

#[test]
fn test_session_cookie_attributes() {
    let settings = SessionSettings::default();

    let cookie = settings.session_cookie("token123".to_string());

    assert_eq!(cookie.name(), "sessionid");
    assert_eq!(cookie.value(), "token123");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.path(), Some("/"));
}

#[derive(Clone, FromRef)]
struct TestState {
    pool: Arc<DbPool>,
    sessions: SessionSettings,
}

async fn extract(state: &TestState, cookie: Option<String>) -> Result<CurrentUser, ApiError> {
    let mut builder = Request::builder().uri("/");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let (mut parts, _) = builder.body(Body::empty()).unwrap().into_parts();
    CurrentUser::from_request_parts(&mut parts, state).await
}

#[tokio::test]
async fn test_current_user_from_session_cookie() {
    let pool = setup_blog_db();
    let user = repo::create_user(&pool, "alice".to_string(), "a@example.com".to_string(), "h".to_string()).unwrap();
    let session = repo::create_session(&pool, user.get_id(), Duration::hours(1)).unwrap();
    let state = TestState { pool, sessions: SessionSettings::default() };

    let current = extract(&state, Some(format!("sessionid={}", session.get_token()))).await.unwrap();

    assert_eq!(current.id(), user.get_id());
    assert_eq!(current.session_token(), session.get_token());
    assert_eq!(current.user().get_username(), "alice");
}

#[tokio::test]
async fn test_current_user_rejections() {
    let pool = setup_blog_db();
    let user = repo::create_user(&pool, "alice".to_string(), "a@example.com".to_string(), "h".to_string()).unwrap();
    let expired = repo::create_session(&pool, user.get_id(), Duration::seconds(-5)).unwrap();
    let state = TestState { pool, sessions: SessionSettings::default() };

    for cookie in [
        None,
        Some("sessionid=unknown".to_string()),
        Some(format!("sessionid={}", expired.get_token())),
        Some(format!("other={}", expired.get_token())),
    ] {
        let result = extract(&state, cookie).await;
        assert!(matches!(result, Err(ApiError::Unauthorized(msg)) if msg == "Authentication required"));
    }
}
