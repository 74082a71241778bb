use super::*;
use crate::dto::{ApplyJobDto, CreateCompanyDto, PostJobDto};
use crate::errors::ApiError;
use crate::extract::{AppJson, IdPath};
use crate::test_utils::setup_jobs_db;
use axum::extract::State;
use axum::http::StatusCode;

fn company_dto(name: &str) -> CreateCompanyDto {
    CreateCompanyDto {
        name: Some(name.to_string()),
        location: Some("Berlin".to_string()),
        description: Some("Widgets".to_string()),
    }
}

fn job_dto(company_id: i32, salary: i32) -> PostJobDto {
    PostJobDto {
        company_id: Some(company_id),
        title: Some("Engineer".to_string()),
        description: Some("Builds things".to_string()),
        salary: Some(salary),
        location: Some("Remote".to_string()),
    }
}

fn apply_dto(job_id: i32, email: &str) -> ApplyJobDto {
    ApplyJobDto {
        name: Some("Ada".to_string()),
        email: Some(email.to_string()),
        resume_link: Some("https://example.com/cv.pdf".to_string()),
        job_id: Some(job_id),
    }
}

#[tokio::test]
async fn test_welcome_lists_endpoints() {
    let body = api_welcome_handler().await.0;

    assert_eq!(body.message, "Welcome to Job Portal API");
    assert_eq!(body.endpoints.len(), 5);
    assert_eq!(body.endpoints["get_jobs"], "/jobs/ (GET)");
}

#[tokio::test]
async fn test_create_company_handler() {
    let pool = setup_jobs_db();

    let (status, body) = create_company_handler(State(pool), AppJson(company_dto(" Acme ")))
        .await
        .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.message, "Company created successfully");
    assert_eq!(body.company.name, "Acme");
}

#[tokio::test]
async fn test_post_job_checks_company_before_salary() {
    let pool = setup_jobs_db();

    let missing_company = post_job_handler(State(pool.clone()), AppJson(job_dto(999, -5))).await;
    assert!(matches!(missing_company, Err(ApiError::NotFound(msg)) if msg == "Company not found"));

    let (_, company) = create_company_handler(State(pool.clone()), AppJson(company_dto("Acme")))
        .await
        .unwrap();

    let bad_salary = post_job_handler(State(pool.clone()), AppJson(job_dto(company.company.id, -5))).await;
    assert!(matches!(bad_salary, Err(ApiError::Validation(msg)) if msg == "Salary must be positive"));

    let zero_salary = post_job_handler(State(pool), AppJson(job_dto(company.company.id, 0))).await;
    assert!(matches!(zero_salary, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn test_post_job_and_list() {
    let pool = setup_jobs_db();
    let (_, company) = create_company_handler(State(pool.clone()), AppJson(company_dto("Acme")))
        .await
        .unwrap();

    let (status, posted) = post_job_handler(State(pool.clone()), AppJson(job_dto(company.company.id, 50_000)))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(posted.job.company, "Acme");

    let listed = list_jobs_handler(State(pool)).await.unwrap();
    assert_eq!(listed.total, 1);
    assert_eq!(listed.jobs[0].id, posted.job.id);
    assert_eq!(listed.jobs[0].company.name, "Acme");
}

#[tokio::test]
async fn test_duplicate_application_is_conflict() {
    let pool = setup_jobs_db();
    let (_, company) = create_company_handler(State(pool.clone()), AppJson(company_dto("Acme")))
        .await
        .unwrap();
    let (_, posted) = post_job_handler(State(pool.clone()), AppJson(job_dto(company.company.id, 10)))
        .await
        .unwrap();
    let job_id = posted.job.id;

    let (status, first) = apply_job_handler(State(pool.clone()), AppJson(apply_dto(job_id, "ada@example.com")))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first.application.job.company, "Acme");

    let second = apply_job_handler(State(pool.clone()), AppJson(apply_dto(job_id, "ada@example.com"))).await;
    assert!(matches!(second, Err(ApiError::Conflict(msg)) if msg == "You have already applied for this job"));

    let applicants = list_applicants_handler(State(pool), IdPath(job_id)).await.unwrap();
    assert_eq!(applicants.total_applicants, 1);
}

#[tokio::test]
async fn test_apply_to_missing_job() {
    let pool = setup_jobs_db();

    let result = apply_job_handler(State(pool.clone()), AppJson(apply_dto(42, "ada@example.com"))).await;
    assert!(matches!(result, Err(ApiError::NotFound(msg)) if msg == "Job not found"));

    let applicants = list_applicants_handler(State(pool), IdPath(42)).await;
    assert!(matches!(applicants, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn test_fallbacks() {
    let not_found = not_found_handler("/nowhere".parse().unwrap()).await;
    let not_allowed = method_not_allowed_handler(axum::http::Method::PATCH, "/jobs/".parse().unwrap()).await;

    assert!(matches!(not_found, ApiError::NotFound(msg) if msg == "Not found"));
    assert!(matches!(not_allowed, ApiError::MethodNotAllowed));
}
