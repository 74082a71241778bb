use crate::db::DbPool;
use crate::models::{Applicant, JobPost, NewApplicant};
use crate::schema::applicants;
use diesel::prelude::*;
use anyhow::Result;
use tracing::{instrument, debug, info};

/// Records an application to a job
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `job_id` - The job being applied to
/// * `name` - Applicant's name
/// * `email` - Applicant's email address
/// * `resume_link` - URL of the applicant's resume
///
/// ### Returns
///
/// A Result containing the newly created Applicant
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The same email already applied to this job; see
///   [`is_unique_violation`](crate::repo::is_unique_violation)
/// - The job does not exist
#[instrument(skip(pool, resume_link), fields(job_id = %job_id, email = %email))]
pub fn create_applicant(
    pool: &DbPool,
    job_id: i32,
    name: String,
    email: String,
    resume_link: String,
) -> Result<Applicant> {
    debug!("Creating new application");

    let conn = &mut pool.get()?;

    let new_applicant = NewApplicant::new(job_id, name, email, resume_link);

    let applicant = diesel::insert_into(applicants::table)
        .values(&new_applicant)
        .returning(Applicant::as_returning())
        .get_result(conn)?;

    info!("Successfully created application with id: {}", applicant.get_id());

    Ok(applicant)
}

/// Lists every applicant to a job, newest first
#[instrument(skip(pool, job), fields(job_id = %job.get_id()))]
pub fn list_applicants_for_job(pool: &DbPool, job: &JobPost) -> Result<Vec<Applicant>> {
    let conn = &mut pool.get()?;

    let result = Applicant::belonging_to(job)
        .select(Applicant::as_select())
        .order((applicants::applied_at.desc(), applicants::id.desc()))
        .load(conn)?;

    debug!("Retrieved {} applicants", result.len());

    Ok(result)
}
