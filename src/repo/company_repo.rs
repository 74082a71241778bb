use crate::db::DbPool;
use crate::models::{Company, NewCompany};
use crate::schema::companies;
use diesel::prelude::*;
use anyhow::Result;
use tracing::{instrument, debug, info};

/// Creates a new company in the database
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `name` - The company name
/// * `location` - Where the company is based
/// * `description` - Free-text description
///
/// ### Returns
///
/// A Result containing the newly created Company, with its assigned ID
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database insert operation fails
#[instrument(skip(pool, description), fields(name = %name, location = %location))]
pub fn create_company(pool: &DbPool, name: String, location: String, description: String) -> Result<Company> {
    debug!("Creating new company");

    let conn = &mut pool.get()?;

    let new_company = NewCompany::new(name, location, description);

    let company = diesel::insert_into(companies::table)
        .values(&new_company)
        .returning(Company::as_returning())
        .get_result(conn)?;

    info!("Successfully created company with id: {}", company.get_id());

    Ok(company)
}

/// Retrieves a company by its ID
///
/// ### Returns
///
/// A Result containing an Option with the Company if found, or None if not found
#[instrument(skip(pool), fields(company_id = %company_id))]
pub fn get_company(pool: &DbPool, company_id: i32) -> Result<Option<Company>> {
    debug!("Retrieving company");

    let conn = &mut pool.get()?;

    let result = companies::table
        .find(company_id)
        .select(Company::as_select())
        .first(conn)
        .optional()?;

    if result.is_none() {
        debug!("Company not found");
    }

    Ok(result)
}

/// Retrieves all companies, newest first
#[cfg(test)]
#[instrument(skip(pool))]
pub fn list_companies(pool: &DbPool) -> Result<Vec<Company>> {
    let conn = &mut pool.get()?;

    let result = companies::table
        .select(Company::as_select())
        .order((companies::created_at.desc(), companies::id.desc()))
        .load(conn)?;

    debug!("Retrieved {} companies", result.len());

    Ok(result)
}
