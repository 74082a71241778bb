use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{instrument, debug, info};

use crate::db::DbPool;
use crate::dto::{ApplicantList, ApplicantView, ApplicationSubmitted, ApplicationView, ApplyJobDto, JobRef};
use crate::errors::ApiError;
use crate::extract::{AppJson, IdPath};
use crate::repo;

/// Handler for applying to a job
///
/// This function handles POST requests to `/apply/`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `payload` - The applicant's name, email, resume link and the job ID
///
/// ### Returns
///
/// 201 with the application, or 400 if this email already applied to
/// the job
#[instrument(skip(pool, payload))]
pub async fn apply_job_handler(
    State(pool): State<Arc<DbPool>>,
    AppJson(payload): AppJson<ApplyJobDto>,
) -> Result<(StatusCode, Json<ApplicationSubmitted>), ApiError> {
    let input = payload.validate()?;

    let (job, company) = repo::get_job_with_company(&pool, input.job_id)
        .map_err(ApiError::Database)?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;

    let applicant = match repo::create_applicant(&pool, job.get_id(), input.name, input.email, input.resume_link) {
        Ok(applicant) => applicant,
        Err(e) if repo::is_unique_violation(&e) => {
            debug!("Duplicate application to job {}", job.get_id());
            return Err(ApiError::Conflict("You have already applied for this job".to_string()));
        }
        Err(e) => return Err(ApiError::Database(e)),
    };

    info!("Application {} submitted to job {}", applicant.get_id(), job.get_id());

    Ok((
        StatusCode::CREATED,
        Json(ApplicationSubmitted {
            message: "Application submitted successfully",
            application: ApplicationView {
                id: applicant.get_id(),
                name: applicant.get_name(),
                email: applicant.get_email(),
                resume_link: applicant.get_resume_link(),
                job: JobRef::new(&job, &company),
                applied_at: applicant.get_applied_at(),
            },
        }),
    ))
}

/// Handler for listing a job's applicants, newest first
///
/// This function handles GET requests to `/applicants/{job_id}/`.
#[instrument(skip(pool))]
pub async fn list_applicants_handler(
    State(pool): State<Arc<DbPool>>,
    IdPath(job_id): IdPath<i32>,
) -> Result<Json<ApplicantList>, ApiError> {
    let (job, company) = repo::get_job_with_company(&pool, job_id)
        .map_err(ApiError::Database)?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;

    let applicants: Vec<ApplicantView> = repo::list_applicants_for_job(&pool, &job)
        .map_err(ApiError::Database)?
        .iter()
        .map(ApplicantView::from)
        .collect();

    Ok(Json(ApplicantList {
        job: JobRef::new(&job, &company),
        total_applicants: applicants.len(),
        applicants,
    }))
}
