use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use super::Company;

/// A job opening published by a company
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Eq)]
#[diesel(belongs_to(Company))]
#[diesel(table_name = crate::schema::job_posts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct JobPost {
    /// Database-assigned identifier
    id: i32,

    /// The company offering the job
    company_id: i32,

    title: String,

    description: String,

    /// Salary, always positive
    salary: i32,

    location: String,

    /// When the job was posted
    created_at: NaiveDateTime,
}

impl JobPost {
    pub fn get_id(&self) -> i32 {
        self.id
    }

    #[cfg(test)]

    pub fn get_company_id(&self) -> i32 {
        self.company_id
    }

    pub fn get_title(&self) -> String {
        self.title.clone()
    }

    pub fn get_description(&self) -> String {
        self.description.clone()
    }

    pub fn get_salary(&self) -> i32 {
        self.salary
    }

    pub fn get_location(&self) -> String {
        self.location.clone()
    }

    /// Gets the posting timestamp as a DateTime<Utc>
    pub fn get_created_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_at, Utc)
    }
}

/// Insertable form of a job post
#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::job_posts)]
pub struct NewJobPost {
    company_id: i32,
    title: String,
    description: String,
    salary: i32,
    location: String,
    created_at: NaiveDateTime,
}

impl NewJobPost {
    /// Creates a new job post for the given company, stamped with the current time
    pub fn new(company_id: i32, title: String, description: String, salary: i32, location: String) -> Self {
        Self {
            company_id,
            title,
            description,
            salary,
            location,
            created_at: Utc::now().naive_utc(),
        }
    }
}
