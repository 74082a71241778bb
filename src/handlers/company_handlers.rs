use axum::{extract::State, http::StatusCode, Json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{instrument, info};

use crate::db::DbPool;
use crate::dto::{ApiWelcome, CompanyCreated, CompanyView, CreateCompanyDto};
use crate::errors::ApiError;
use crate::extract::AppJson;
use crate::repo;

/// Handler describing the job board API
///
/// This function handles GET requests to `/`.
pub async fn api_welcome_handler() -> Json<ApiWelcome> {
    let endpoints = BTreeMap::from([
        ("create_company", "/create-company/ (POST)"),
        ("post_job", "/post-job/ (POST)"),
        ("get_jobs", "/jobs/ (GET)"),
        ("apply_job", "/apply/ (POST)"),
        ("get_applicants", "/applicants/<job_id>/ (GET)"),
    ]);

    Json(ApiWelcome {
        message: "Welcome to Job Portal API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints,
        docs: "Send POST requests with JSON data, GET requests need no body",
    })
}

/// Handler for creating a new company
///
/// This function handles POST requests to `/create-company/`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `payload` - The company's name, location and description
///
/// ### Returns
///
/// 201 with the newly created company
#[instrument(skip(pool, payload))]
pub async fn create_company_handler(
    State(pool): State<Arc<DbPool>>,
    AppJson(payload): AppJson<CreateCompanyDto>,
) -> Result<(StatusCode, Json<CompanyCreated>), ApiError> {
    let input = payload.validate()?;

    let company = repo::create_company(&pool, input.name, input.location, input.description)
        .map_err(ApiError::Database)?;

    info!("Created company {}", company.get_id());

    Ok((
        StatusCode::CREATED,
        Json(CompanyCreated {
            message: "Company created successfully",
            company: CompanyView::from(&company),
        }),
    ))
}
