use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{instrument, debug, info};

use crate::db::DbPool;
use crate::dto::{JobList, JobListing, JobPosted, JobView, PostJobDto};
use crate::errors::ApiError;
use crate::extract::AppJson;
use crate::repo;

/// Handler for posting a job
///
/// This function handles POST requests to `/post-job/`.
///
/// Fields are checked for presence first, then the company must exist,
/// and only then is the salary range checked.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `payload` - The job's company, title, description, salary and location
///
/// ### Returns
///
/// 201 with the job, naming its company
#[instrument(skip(pool, payload))]
pub async fn post_job_handler(
    State(pool): State<Arc<DbPool>>,
    AppJson(payload): AppJson<PostJobDto>,
) -> Result<(StatusCode, Json<JobPosted>), ApiError> {
    let input = payload.validate()?;

    let company = repo::get_company(&pool, input.company_id)
        .map_err(ApiError::Database)?
        .ok_or_else(|| {
            debug!("Company {} not found", input.company_id);
            ApiError::not_found("Company not found")
        })?;

    input.check_salary()?;

    let job = repo::create_job_post(
        &pool,
        company.get_id(),
        input.title,
        input.description,
        input.salary,
        input.location,
    )
    .map_err(ApiError::Database)?;

    info!("Posted job {} for company {}", job.get_id(), company.get_id());

    Ok((
        StatusCode::CREATED,
        Json(JobPosted {
            message: "Job posted successfully",
            job: JobView::new(&job, &company),
        }),
    ))
}

/// Handler for listing all jobs, newest first
///
/// This function handles GET requests to `/jobs/`.
#[instrument(skip(pool))]
pub async fn list_jobs_handler(
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<JobList>, ApiError> {
    let jobs: Vec<JobListing> = repo::list_jobs_with_companies(&pool)
        .map_err(ApiError::Database)?
        .iter()
        .map(|(job, company)| JobListing::new(job, company))
        .collect();

    debug!("Listing {} jobs", jobs.len());

    Ok(Json(JobList {
        total: jobs.len(),
        jobs,
    }))
}
