use crate::db::DbPool;
use crate::models::{Company, JobPost, NewJobPost};
use crate::schema::{companies, job_posts};
use diesel::prelude::*;
use anyhow::Result;
use tracing::{instrument, debug, info};

/// Creates a new job post for a company
///
/// The caller is expected to have checked that the company exists and that
/// the salary is positive; the database enforces both as well.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `company_id` - The company offering the job
/// * `title` - Job title
/// * `description` - Job description
/// * `salary` - Salary, must be positive
/// * `location` - Where the job is based
///
/// ### Returns
///
/// A Result containing the newly created JobPost
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The company does not exist (foreign key violation)
/// - The salary is not positive (check constraint violation)
#[instrument(skip(pool, description), fields(company_id = %company_id, title = %title, salary = %salary))]
pub fn create_job_post(
    pool: &DbPool,
    company_id: i32,
    title: String,
    description: String,
    salary: i32,
    location: String,
) -> Result<JobPost> {
    debug!("Creating new job post");

    let conn = &mut pool.get()?;

    let new_job = NewJobPost::new(company_id, title, description, salary, location);

    let job = diesel::insert_into(job_posts::table)
        .values(&new_job)
        .returning(JobPost::as_returning())
        .get_result(conn)?;

    info!("Successfully created job post with id: {}", job.get_id());

    Ok(job)
}

/// Retrieves a job post together with the company that posted it
///
/// ### Returns
///
/// A Result containing an Option with the (JobPost, Company) pair if found
#[instrument(skip(pool), fields(job_id = %job_id))]
pub fn get_job_with_company(pool: &DbPool, job_id: i32) -> Result<Option<(JobPost, Company)>> {
    debug!("Retrieving job post");

    let conn = &mut pool.get()?;

    let result = job_posts::table
        .inner_join(companies::table)
        .filter(job_posts::id.eq(job_id))
        .select((JobPost::as_select(), Company::as_select()))
        .first::<(JobPost, Company)>(conn)
        .optional()?;

    if result.is_none() {
        debug!("Job post not found");
    }

    Ok(result)
}

/// Retrieves every job post with its company, newest first
#[instrument(skip(pool))]
pub fn list_jobs_with_companies(pool: &DbPool) -> Result<Vec<(JobPost, Company)>> {
    debug!("Listing all job posts");

    let conn = &mut pool.get()?;

    let result = job_posts::table
        .inner_join(companies::table)
        .select((JobPost::as_select(), Company::as_select()))
        .order((job_posts::created_at.desc(), job_posts::id.desc()))
        .load::<(JobPost, Company)>(conn)?;

    info!("Retrieved {} job posts", result.len());

    Ok(result)
}

#[cfg(test)]
mod tests;
