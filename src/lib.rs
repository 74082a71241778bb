//! Noticeboard: job board and blog JSON APIs
//!
//! This library provides two independent services sharing one stack:
//!
//! - a job board, where companies post jobs and candidates apply, and
//! - a blog, where registered users write posts, comment and like.
//!
//! Each service runs in its own process against its own SQLite database
//! (see `src/bin/server.rs`).
//!
//! ### Modules
//!
//! - `db`: Database connection management
//! - `models`: Data structures representing the stored rows
//! - `repo`: Repository layer for database operations
//! - `schema`: Database schema definitions
//! - `handlers`: HTTP handlers for both services
//! - `auth`: Password hashing and session resolution for the blog
//!
//! ### Web API
//!
//! Job board:
//!
//! - `GET /`: Describe the API
//! - `POST /create-company/`: Create a company
//! - `POST /post-job/`: Post a job for a company
//! - `GET /jobs/`: List all jobs
//! - `POST /apply/`: Apply for a job
//! - `GET /applicants/{job_id}/`: List a job's applicants
//!
//! Blog, all under `/api`: `register/`, `login/`, `logout/`,
//! `create-post/`, `posts/`, `post/{id}/`, `post/{id}/comment/`,
//! `post/{id}/like/`, `post/{id}/edit/`, `post/{id}/delete/` and
//! `comment/{id}/delete/`.

/// Authentication and sessions
pub mod auth;

/// Layered configuration
pub mod config;

/// Database connection module
pub mod db;

/// Request and response bodies
pub mod dto;

/// API error type
pub mod errors;

/// Request extractors
pub mod extract;

/// HTTP handlers
pub mod handlers;

/// Tracing subscriber setup
pub mod logging;

/// Data models module
pub mod models;

/// Page arithmetic
pub mod pagination;

/// Repository module for database operations
pub mod repo;

/// Database schema module
pub mod schema;

#[cfg(test)]
pub mod test_utils;

use axum::{
    extract::FromRef,
    routing::{delete, get, post, put},
    Router,
};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::Arc;
use tracing::info;

pub use auth::SessionSettings;
pub use config::Service;
pub use errors::ApiError;

use crate::db::DbPool;
use crate::handlers::*;

/// Embedded migrations for the job board database
pub const JOBS_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/jobs");

/// Embedded migrations for the blog database
pub const BLOG_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/blog");

/// Runs a service's pending migrations
///
/// ### Arguments
///
/// * `service` - Which schema to bring up to date
/// * `conn` - A connection to that service's database
pub fn run_migrations(service: Service, conn: &mut SqliteConnection) -> anyhow::Result<()> {
    let migrations = match service {
        Service::Jobs => JOBS_MIGRATIONS,
        Service::Blog => BLOG_MIGRATIONS,
    };

    let applied = conn
        .run_pending_migrations(migrations)
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;

    info!("Applied {} pending migrations", applied.len());

    Ok(())
}

/// Shared state of the blog service
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: Arc<DbPool>,
    pub sessions: SessionSettings,
}

impl AppState {
    pub fn new(pool: Arc<DbPool>, sessions: SessionSettings) -> Self {
        Self { pool, sessions }
    }
}

/// Creates the job board application router
///
/// ### Arguments
///
/// * `pool` - The database connection pool
///
/// ### Returns
///
/// An Axum router configured with all job board routes
pub fn create_jobs_app(pool: Arc<DbPool>) -> Router {
    Router::new()
        .route("/", get(api_welcome_handler))
        .route("/create-company/", post(create_company_handler))
        .route("/post-job/", post(post_job_handler))
        .route("/jobs/", get(list_jobs_handler))
        .route("/apply/", post(apply_job_handler))
        .route("/applicants/{job_id}/", get(list_applicants_handler))
        .fallback(not_found_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .with_state(pool)
}

/// Creates the blog application router
///
/// ### Arguments
///
/// * `state` - The database pool and session settings
///
/// ### Returns
///
/// An Axum router configured with all blog routes
pub fn create_blog_app(state: AppState) -> Router {
    Router::new()
        .route("/api/register/", post(register_handler))
        .route("/api/login/", post(login_handler))
        .route("/api/logout/", post(logout_handler))
        .route("/api/create-post/", post(create_post_handler))
        .route("/api/posts/", get(list_posts_handler))
        .route("/api/post/{post_id}/", get(get_post_detail_handler))
        .route("/api/post/{post_id}/comment/", post(add_comment_handler))
        .route("/api/post/{post_id}/like/", post(like_post_handler))
        .route("/api/post/{post_id}/edit/", put(edit_post_handler))
        .route("/api/post/{post_id}/delete/", delete(delete_post_handler))
        .route("/api/comment/{comment_id}/delete/", delete(delete_comment_handler))
        .fallback(not_found_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .with_state(state)
}
