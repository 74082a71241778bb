use super::*;
use serde_json::json;

fn error_message(err: ApiError) -> String {
    match err {
        ApiError::Validation(msg) => msg,
        other => panic!("Expected a validation error, got {:?}", other),
    }
}

#[test]
fn test_create_company_trims_fields() {
    let dto: CreateCompanyDto = serde_json::from_value(json!({
        "name": "  Acme ",
        "location": "Berlin\n",
        "description": "\tWidgets"
    }))
    .unwrap();

    let input = dto.validate().unwrap();

    assert_eq!(
        input,
        CompanyInput {
            name: "Acme".to_string(),
            location: "Berlin".to_string(),
            description: "Widgets".to_string(),
        }
    );
}

#[test]
fn test_create_company_reports_first_missing_field() {
    let dto: CreateCompanyDto = serde_json::from_value(json!({ "description": "x" })).unwrap();
    assert_eq!(error_message(dto.validate().unwrap_err()), "name is required");

    let dto: CreateCompanyDto = serde_json::from_value(json!({ "name": "Acme", "location": "   " })).unwrap();
    assert_eq!(error_message(dto.validate().unwrap_err()), "location is required");
}

#[test]
fn test_create_company_null_counts_as_missing() {
    let dto: CreateCompanyDto = serde_json::from_value(json!({
        "name": "Acme",
        "location": "Berlin",
        "description": null
    }))
    .unwrap();

    assert_eq!(error_message(dto.validate().unwrap_err()), "description is required");
}

#[test]
fn test_post_job_presence_order() {
    let dto = PostJobDto::default();
    assert_eq!(error_message(dto.validate().unwrap_err()), "company_id is required");

    let dto: PostJobDto = serde_json::from_value(json!({
        "company_id": 1,
        "title": "Engineer",
        "description": "Builds"
    }))
    .unwrap();
    assert_eq!(error_message(dto.validate().unwrap_err()), "salary is required");
}

#[test]
fn test_post_job_salary_checked_separately() {
    let dto: PostJobDto = serde_json::from_value(json!({
        "company_id": 1,
        "title": " Engineer ",
        "description": "Builds",
        "salary": -5,
        "location": "Remote"
    }))
    .unwrap();

    let input = dto.validate().unwrap();

    assert_eq!(input.title, "Engineer");
    assert_eq!(error_message(input.check_salary().unwrap_err()), "Salary must be positive");
}

#[test]
fn test_post_job_rejects_wrongly_typed_salary() {
    let result = serde_json::from_value::<PostJobDto>(json!({ "salary": "lots" }));

    assert!(result.is_err());
}

#[test]
fn test_apply_job_validation() {
    let dto: ApplyJobDto = serde_json::from_value(json!({
        "name": "Ada",
        "email": "",
        "resume_link": "http://cv",
        "job_id": 3
    }))
    .unwrap();
    assert_eq!(error_message(dto.validate().unwrap_err()), "email is required");

    let dto: ApplyJobDto = serde_json::from_value(json!({
        "name": "Ada",
        "email": "ada@example.com",
        "resume_link": "http://cv"
    }))
    .unwrap();
    assert_eq!(error_message(dto.validate().unwrap_err()), "job_id is required");
}

#[test]
fn test_register_requires_all_fields() {
    let dto: RegisterDto = serde_json::from_value(json!({ "username": "alice", "password": "pw" })).unwrap();

    assert_eq!(
        error_message(dto.validate().unwrap_err()),
        "Username, email, and password are required"
    );
}

#[test]
fn test_login_requires_both_fields() {
    let dto: LoginDto = serde_json::from_value(json!({ "username": "alice", "password": "" })).unwrap();

    assert_eq!(error_message(dto.validate().unwrap_err()), "Username and password are required");
}

#[test]
fn test_post_and_comment_validation() {
    let dto: PostDto = serde_json::from_value(json!({ "title": "T" })).unwrap();
    assert_eq!(error_message(dto.validate().unwrap_err()), "Title and content are required");

    let dto: PostDto = serde_json::from_value(json!({ "title": "T", "content": "C" })).unwrap();
    assert_eq!(dto.validate().unwrap(), ("T".to_string(), "C".to_string()));

    assert_eq!(
        error_message(CommentDto::default().validate().unwrap_err()),
        "Comment text is required"
    );
}

#[test]
fn test_post_list_item_flattens_post_fields() {
    let item = PostListItem {
        post: PostView {
            id: 1,
            title: "T".to_string(),
            content: "C".to_string(),
            author: "alice".to_string(),
            created_at: DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z").unwrap().with_timezone(&Utc),
            total_likes: 2,
        },
        total_comments: 3,
    };

    let value = serde_json::to_value(&item).unwrap();

    assert_eq!(
        value,
        json!({
            "id": 1,
            "title": "T",
            "content": "C",
            "author": "alice",
            "created_at": "2025-01-01T00:00:00Z",
            "total_likes": 2,
            "total_comments": 3
        })
    );
}

#[test]
fn test_pagination_view_from_page() {
    let page = crate::pagination::Paginator::new(12, 5).page(2);

    let value = serde_json::to_value(PaginationView::from(&page)).unwrap();

    assert_eq!(
        value,
        json!({
            "current_page": 2,
            "total_pages": 3,
            "total_posts": 12,
            "has_next": true,
            "has_previous": true
        })
    );
}
