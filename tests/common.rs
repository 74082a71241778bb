//! Common test utilities for noticeboard integration tests
//!
//! This file contains shared functions for all integration tests: building
//! each service over a fresh database, sending JSON requests, and creating
//! the records most tests start from.
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use noticeboard::{
    config::Service, create_blog_app, create_jobs_app, db::init_pool, run_migrations, AppState, SessionSettings,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::Service as _;

/// Opens a pool over a unique shared-cache in-memory database with the
/// service's migrations applied
pub fn test_pool(service: Service) -> Arc<noticeboard::db::DbPool> {
    let database_url = format!("file:it_{}?mode=memory&cache=shared", uuid::Uuid::new_v4());
    let pool = init_pool(&database_url).unwrap();

    let conn = &mut pool.get().unwrap();
    run_migrations(service, conn).unwrap();

    Arc::new(pool)
}

/// Creates the job board application over an empty database
pub fn create_jobs_test_app() -> Router {
    create_jobs_app(test_pool(Service::Jobs))
}

/// Creates the blog application over an empty database
pub fn create_blog_test_app() -> Router {
    create_blog_app(AppState::new(test_pool(Service::Blog), SessionSettings::default()))
}

/// A response with its body parsed as JSON
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    /// `name=value` of the first Set-Cookie header, if any
    pub cookie: Option<String>,
}

/// Sends a request with an optional JSON body and session cookie
///
/// ### Arguments
///
/// * `app` - The application under test
/// * `method` - HTTP method
/// * `uri` - Request path and query
/// * `body` - JSON body; sent with a JSON content type when present
/// * `cookie` - Value for the Cookie header
pub async fn send(
    app: &mut Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().uri(uri).method(method);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.call(request).await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.to_string());

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse { status, body, cookie }
}

/// Sends a raw, possibly malformed, body with a JSON content type
pub async fn send_raw(app: &mut Router, method: &str, uri: &str, raw: &str, cookie: Option<&str>) -> TestResponse {
    let mut builder = Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let response = app.call(builder.body(Body::from(raw.to_string())).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        body: serde_json::from_slice(&bytes).unwrap(),
        cookie: None,
    }
}

/// Creates a company and returns its id
pub async fn create_company(app: &mut Router, name: &str) -> i64 {
    let response = send(
        app,
        "POST",
        "/create-company/",
        Some(json!({ "name": name, "location": "Berlin", "description": "Makes things" })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["company"]["id"].as_i64().unwrap()
}

/// Posts a job for a company and returns its id
pub async fn post_job(app: &mut Router, company_id: i64, title: &str) -> i64 {
    let response = send(
        app,
        "POST",
        "/post-job/",
        Some(json!({
            "company_id": company_id,
            "title": title,
            "description": "Do the work",
            "salary": 50000,
            "location": "Remote"
        })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["job"]["id"].as_i64().unwrap()
}

/// Registers a user whose email and password derive from the username
pub async fn register(app: &mut Router, username: &str) -> Value {
    let response = send(
        app,
        "POST",
        "/api/register/",
        Some(json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": format!("{}-password", username)
        })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["user"].clone()
}

/// Logs a user in and returns the session cookie to send back
pub async fn login(app: &mut Router, username: &str) -> String {
    let response = send(
        app,
        "POST",
        "/api/login/",
        Some(json!({ "username": username, "password": format!("{}-password", username) })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    response.cookie.expect("login sets a session cookie")
}

/// Registers and logs in a user, returning the session cookie
pub async fn register_and_login(app: &mut Router, username: &str) -> String {
    register(app, username).await;
    login(app, username).await
}

/// Creates a post as the cookie's user and returns its id
pub async fn create_post(app: &mut Router, cookie: &str, title: &str) -> i64 {
    let response = send(
        app,
        "POST",
        "/api/create-post/",
        Some(json!({ "title": title, "content": format!("Content of {}", title) })),
        Some(cookie),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["post"]["id"].as_i64().unwrap()
}
