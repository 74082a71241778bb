//! Request and response bodies
//!
//! Request DTOs keep every field optional so that a missing field surfaces
//! as a specific validation message instead of a generic deserialization
//! failure. Each one has a `validate` method that checks fields in the order
//! clients see errors reported and hands back the cleaned values.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::ApiError;
use crate::models::{Applicant, Comment, Company, JobPost, Post, User};
use crate::pagination::Page;
use crate::repo::PostSummary;

/// Returns the trimmed value, or `"<field> is required"` when it is
/// missing or blank
fn required_text(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::validation(format!("{} is required", field)))
}

/// Returns the value, or `"<field> is required"` when it is missing
fn present<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::validation(format!("{} is required", field)))
}

/// Body of `POST /create-company/`
#[derive(Deserialize, Debug, Default)]
pub struct CreateCompanyDto {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// A company ready to insert, with trimmed fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyInput {
    pub name: String,
    pub location: String,
    pub description: String,
}

impl CreateCompanyDto {
    pub fn validate(self) -> Result<CompanyInput, ApiError> {
        Ok(CompanyInput {
            name: required_text(self.name, "name")?,
            location: required_text(self.location, "location")?,
            description: required_text(self.description, "description")?,
        })
    }
}

/// Body of `POST /post-job/`
#[derive(Deserialize, Debug, Default)]
pub struct PostJobDto {
    pub company_id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub salary: Option<i32>,
    pub location: Option<String>,
}

/// A job post that passed the presence checks
///
/// The salary is not range-checked yet: the company lookup comes first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobInput {
    pub company_id: i32,
    pub title: String,
    pub description: String,
    pub salary: i32,
    pub location: String,
}

impl PostJobDto {
    pub fn validate(self) -> Result<JobInput, ApiError> {
        let company_id = present(self.company_id, "company_id")?;
        let title = present(self.title, "title")?;
        let description = present(self.description, "description")?;
        let salary = present(self.salary, "salary")?;
        let location = present(self.location, "location")?;

        Ok(JobInput {
            company_id,
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            salary,
            location: location.trim().to_string(),
        })
    }
}

impl JobInput {
    /// Rejects zero and negative salaries
    pub fn check_salary(&self) -> Result<(), ApiError> {
        if self.salary <= 0 {
            return Err(ApiError::validation("Salary must be positive"));
        }
        Ok(())
    }
}

/// Body of `POST /apply/`
#[derive(Deserialize, Debug, Default)]
pub struct ApplyJobDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub resume_link: Option<String>,
    pub job_id: Option<i32>,
}

/// An application ready to insert, with trimmed fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationInput {
    pub name: String,
    pub email: String,
    pub resume_link: String,
    pub job_id: i32,
}

impl ApplyJobDto {
    pub fn validate(self) -> Result<ApplicationInput, ApiError> {
        Ok(ApplicationInput {
            name: required_text(self.name, "name")?,
            email: required_text(self.email, "email")?,
            resume_link: required_text(self.resume_link, "resume_link")?,
            job_id: present(self.job_id, "job_id")?,
        })
    }
}

/// Body of `POST /api/register/`
#[derive(Deserialize, Debug, Default)]
pub struct RegisterDto {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Returns the value when present and non-empty
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl RegisterDto {
    pub fn validate(self) -> Result<RegisterInput, ApiError> {
        match (non_empty(self.username), non_empty(self.email), non_empty(self.password)) {
            (Some(username), Some(email), Some(password)) => Ok(RegisterInput { username, email, password }),
            _ => Err(ApiError::validation("Username, email, and password are required")),
        }
    }
}

/// Body of `POST /api/login/`
#[derive(Deserialize, Debug, Default)]
pub struct LoginDto {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginDto {
    /// Returns `(username, password)`
    pub fn validate(self) -> Result<(String, String), ApiError> {
        match (non_empty(self.username), non_empty(self.password)) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(ApiError::validation("Username and password are required")),
        }
    }
}

/// Body of `POST /api/create-post/` and `PUT /api/post/{id}/edit/`
#[derive(Deserialize, Debug, Default)]
pub struct PostDto {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostDto {
    /// Returns `(title, content)`
    pub fn validate(self) -> Result<(String, String), ApiError> {
        match (non_empty(self.title), non_empty(self.content)) {
            (Some(title), Some(content)) => Ok((title, content)),
            _ => Err(ApiError::validation("Title and content are required")),
        }
    }
}

/// Body of `POST /api/post/{id}/comment/`
#[derive(Deserialize, Debug, Default)]
pub struct CommentDto {
    pub text: Option<String>,
}

impl CommentDto {
    pub fn validate(self) -> Result<String, ApiError> {
        non_empty(self.text).ok_or_else(|| ApiError::validation("Comment text is required"))
    }
}

/// Query string of `GET /api/posts/`
///
/// Kept as raw text; unparseable values fall back to defaults rather than
/// failing the request.
#[derive(Deserialize, Debug, Default)]
pub struct PostsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// A bare `{"message": ...}` body
#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Serialize, Debug)]
pub struct ApiWelcome {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
    pub docs: &'static str,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct CompanyView {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Company> for CompanyView {
    fn from(company: &Company) -> Self {
        Self {
            id: company.get_id(),
            name: company.get_name(),
            location: company.get_location(),
            description: company.get_description(),
            created_at: company.get_created_at(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct CompanyCreated {
    pub message: &'static str,
    pub company: CompanyView,
}

/// A job post naming its company
#[derive(Serialize, Debug, PartialEq)]
pub struct JobView {
    pub id: i32,
    pub company: String,
    pub title: String,
    pub description: String,
    pub salary: i32,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl JobView {
    pub fn new(job: &JobPost, company: &Company) -> Self {
        Self {
            id: job.get_id(),
            company: company.get_name(),
            title: job.get_title(),
            description: job.get_description(),
            salary: job.get_salary(),
            location: job.get_location(),
            created_at: job.get_created_at(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct JobPosted {
    pub message: &'static str,
    pub job: JobView,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct CompanySummary {
    pub id: i32,
    pub name: String,
    pub location: String,
}

/// A job post as listed by `GET /jobs/`
#[derive(Serialize, Debug, PartialEq)]
pub struct JobListing {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub salary: i32,
    pub location: String,
    pub company: CompanySummary,
    pub created_at: DateTime<Utc>,
}

impl JobListing {
    pub fn new(job: &JobPost, company: &Company) -> Self {
        Self {
            id: job.get_id(),
            title: job.get_title(),
            description: job.get_description(),
            salary: job.get_salary(),
            location: job.get_location(),
            company: CompanySummary {
                id: company.get_id(),
                name: company.get_name(),
                location: company.get_location(),
            },
            created_at: job.get_created_at(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct JobList {
    pub jobs: Vec<JobListing>,
    pub total: usize,
}

/// Short reference to a job and its company's name
#[derive(Serialize, Debug, PartialEq)]
pub struct JobRef {
    pub id: i32,
    pub title: String,
    pub company: String,
}

impl JobRef {
    pub fn new(job: &JobPost, company: &Company) -> Self {
        Self {
            id: job.get_id(),
            title: job.get_title(),
            company: company.get_name(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ApplicationView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub resume_link: String,
    pub job: JobRef,
    pub applied_at: DateTime<Utc>,
}

#[derive(Serialize, Debug)]
pub struct ApplicationSubmitted {
    pub message: &'static str,
    pub application: ApplicationView,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct ApplicantView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub resume_link: String,
    pub applied_at: DateTime<Utc>,
}

impl From<&Applicant> for ApplicantView {
    fn from(applicant: &Applicant) -> Self {
        Self {
            id: applicant.get_id(),
            name: applicant.get_name(),
            email: applicant.get_email(),
            resume_link: applicant.get_resume_link(),
            applied_at: applicant.get_applied_at(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ApplicantList {
    pub job: JobRef,
    pub applicants: Vec<ApplicantView>,
    pub total_applicants: usize,
}

/// Public view of a user; never carries the credential
#[derive(Serialize, Debug, PartialEq)]
pub struct UserView {
    pub id: i32,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.get_id(),
            username: user.get_username(),
            email: user.get_email(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct UserResponse {
    pub message: &'static str,
    pub user: UserView,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct PostView {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub total_likes: i64,
}

impl PostView {
    pub fn new(post: &Post, author: String, total_likes: i64) -> Self {
        Self {
            id: post.get_id(),
            title: post.get_title(),
            content: post.get_content(),
            author,
            created_at: post.get_created_at(),
            total_likes,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct PostResponse {
    pub message: &'static str,
    pub post: PostView,
}

/// A post as listed by `GET /api/posts/`
#[derive(Serialize, Debug, PartialEq)]
pub struct PostListItem {
    #[serde(flatten)]
    pub post: PostView,
    pub total_comments: i64,
}

impl From<PostSummary> for PostListItem {
    fn from(summary: PostSummary) -> Self {
        Self {
            post: PostView::new(&summary.post, summary.author, summary.total_likes),
            total_comments: summary.total_comments,
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct PaginationView {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_posts: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl From<&Page> for PaginationView {
    fn from(page: &Page) -> Self {
        Self {
            current_page: page.number,
            total_pages: page.total_pages,
            total_posts: page.total_count,
            has_next: page.has_next,
            has_previous: page.has_previous,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct PostList {
    pub posts: Vec<PostListItem>,
    pub pagination: PaginationView,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct CommentView {
    pub id: i32,
    pub text: String,
    pub user: String,
    pub created_at: DateTime<Utc>,
}

impl CommentView {
    pub fn new(comment: &Comment, username: String) -> Self {
        Self {
            id: comment.get_id(),
            text: comment.get_text(),
            user: username,
            created_at: comment.get_created_at(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct CommentResponse {
    pub message: &'static str,
    pub comment: CommentView,
}

#[derive(Serialize, Debug)]
pub struct PostDetailView {
    #[serde(flatten)]
    pub post: PostView,
    pub comments: Vec<CommentView>,
}

#[derive(Serialize, Debug)]
pub struct PostDetail {
    pub post: PostDetailView,
}

#[derive(Serialize, Debug)]
pub struct LikeResponse {
    pub message: &'static str,
    pub liked: bool,
    pub total_likes: i64,
}

#[cfg(test)]
mod tests;
