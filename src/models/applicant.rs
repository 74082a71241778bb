use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use super::JobPost;

/// Someone who applied to a job post
///
/// An email address may apply to a given job at most once; the
/// `(email, job_id)` pair is unique at the database level.
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Eq)]
#[diesel(belongs_to(JobPost, foreign_key = job_id))]
#[diesel(table_name = crate::schema::applicants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Applicant {
    id: i32,
    name: String,
    email: String,
    resume_link: String,
    job_id: i32,
    applied_at: NaiveDateTime,
}

impl Applicant {
    pub fn get_id(&self) -> i32 {
        self.id
    }

    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    pub fn get_email(&self) -> String {
        self.email.clone()
    }

    pub fn get_resume_link(&self) -> String {
        self.resume_link.clone()
    }

    #[cfg(test)]

    pub fn get_job_id(&self) -> i32 {
        self.job_id
    }

    pub fn get_applied_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.applied_at, Utc)
    }
}

/// Insertable form of an application
#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::applicants)]
pub struct NewApplicant {
    name: String,
    email: String,
    resume_link: String,
    job_id: i32,
    applied_at: NaiveDateTime,
}

impl NewApplicant {
    pub fn new(job_id: i32, name: String, email: String, resume_link: String) -> Self {
        Self {
            name,
            email,
            resume_link,
            job_id,
            applied_at: Utc::now().naive_utc(),
        }
    }
}
