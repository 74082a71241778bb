use super::*;
use crate::repo::create_company;
use crate::test_utils::setup_jobs_db;

fn company(pool: &DbPool) -> Company {
    create_company(pool, "Acme".to_string(), "Berlin".to_string(), "Widgets".to_string()).unwrap()
}

#[test]
fn test_create_job_post() {
    let pool = setup_jobs_db();
    let company = company(&pool);

    let job = create_job_post(
        &pool,
        company.get_id(),
        "Engineer".to_string(),
        "Builds things".to_string(),
        50_000,
        "Remote".to_string(),
    ).unwrap();

    assert_eq!(job.get_company_id(), company.get_id());
    assert_eq!(job.get_title(), "Engineer");
    assert_eq!(job.get_salary(), 50_000);
}

#[test]
fn test_create_job_post_unknown_company_fails() {
    let pool = setup_jobs_db();

    let result = create_job_post(&pool, 999, "T".to_string(), "D".to_string(), 10, "L".to_string());

    assert!(result.is_err());
}

#[test]
fn test_non_positive_salary_rejected_by_database() {
    let pool = setup_jobs_db();
    let company = company(&pool);

    let result = create_job_post(&pool, company.get_id(), "T".to_string(), "D".to_string(), 0, "L".to_string());

    assert!(result.is_err());
}

#[test]
fn test_get_job_with_company() {
    let pool = setup_jobs_db();
    let company = company(&pool);
    let job = create_job_post(&pool, company.get_id(), "T".to_string(), "D".to_string(), 10, "L".to_string()).unwrap();

    let (found_job, found_company) = get_job_with_company(&pool, job.get_id()).unwrap().unwrap();

    assert_eq!(found_job, job);
    assert_eq!(found_company, company);
    assert!(get_job_with_company(&pool, job.get_id() + 1).unwrap().is_none());
}

#[test]
fn test_list_jobs_newest_first() {
    let pool = setup_jobs_db();
    let company = company(&pool);

    let ids: Vec<i32> = (0..3)
        .map(|i| {
            create_job_post(&pool, company.get_id(), format!("Job {}", i), "D".to_string(), 10, "L".to_string())
                .unwrap()
                .get_id()
        })
        .collect();

    let jobs = list_jobs_with_companies(&pool).unwrap();

    let listed: Vec<i32> = jobs.iter().map(|(job, _)| job.get_id()).collect();
    assert_eq!(listed, ids.into_iter().rev().collect::<Vec<_>>());
    assert!(jobs.iter().all(|(_, c)| c.get_id() == company.get_id()));
}

#[test]
fn test_deleting_company_cascades_to_jobs() {
    let pool = setup_jobs_db();
    let company = company(&pool);
    create_job_post(&pool, company.get_id(), "T".to_string(), "D".to_string(), 10, "L".to_string()).unwrap();

    let conn = &mut pool.get().unwrap();
    diesel::delete(companies::table.find(company.get_id())).execute(conn).unwrap();
    let remaining: i64 = job_posts::table.count().get_result(conn).unwrap();

    assert_eq!(remaining, 0);
}
