use crate::*;
use proptest::prelude::*;
use diesel::RunQueryDsl;
use std::sync::Arc;

/// Sets up a test database for a service with its migrations applied
///
/// ### Returns
///
/// An Arc-wrapped connection pool over a fresh in-memory database
pub fn setup_test_db(service: Service) -> Arc<db::DbPool> {
    // Plain ":memory:" gives each connection its own separate database, so
    // migrations run on one connection wouldn't be visible on others. A
    // unique URI with cache=shared gives every connection in this pool the
    // same database while keeping tests isolated from each other.
    let unique_id = uuid::Uuid::new_v4();
    let database_url = format!("file:test_{}?mode=memory&cache=shared", unique_id);
    let pool = db::init_pool(&database_url).expect("Failed to create pool");

    let mut conn = pool.get().expect("Failed to get connection");
    run_migrations(service, &mut conn).expect("Failed to run migrations");

    Arc::new(pool)
}

/// Test database with the job board schema
pub fn setup_jobs_db() -> Arc<db::DbPool> {
    setup_test_db(Service::Jobs)
}

/// Test database with the blog schema
pub fn setup_blog_db() -> Arc<db::DbPool> {
    setup_test_db(Service::Blog)
}

/// Generates strings with a mix of printable text and surrounding or
/// embedded whitespace
pub fn arb_messy_string() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ \t\n]{1,4}",
        "[a-zA-Z0-9 ]{1,16}",
        "[ \t]{0,3}[a-zA-Z0-9]{1,12}[ \t\n]{0,3}",
        "\\PC{0,24}",
    ]
}

#[derive(diesel::QueryableByName, Debug)]
struct TableName {
    #[diesel(sql_type = diesel::sql_types::Text)]
    name: String,
}

fn table_names(pool: &db::DbPool) -> Vec<String> {
    let mut conn = pool.get().unwrap();
    diesel::sql_query("SELECT name FROM sqlite_master WHERE type='table'")
        .load::<TableName>(&mut conn)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect()
}

#[test]
fn test_jobs_db_has_only_job_tables() {
    let tables = table_names(&setup_jobs_db());

    for table in ["companies", "job_posts", "applicants", "__diesel_schema_migrations"] {
        assert!(tables.iter().any(|t| t == table), "Table '{}' not found", table);
    }
    assert!(!tables.iter().any(|t| t == "posts"));
}

#[test]
fn test_blog_db_has_only_blog_tables() {
    let tables = table_names(&setup_blog_db());

    for table in ["users", "sessions", "posts", "comments", "post_likes"] {
        assert!(tables.iter().any(|t| t == table), "Table '{}' not found", table);
    }
    assert!(!tables.iter().any(|t| t == "companies"));
}

#[test]
fn test_test_databases_are_isolated() {
    let first = setup_jobs_db();
    let second = setup_jobs_db();

    repo::create_company(&first, "Acme".to_string(), "Berlin".to_string(), "Widgets".to_string()).unwrap();

    assert_eq!(repo::list_companies(&first).unwrap().len(), 1);
    assert!(repo::list_companies(&second).unwrap().is_empty());
}

#[test]
fn test_migrations_are_idempotent() {
    let pool = setup_blog_db();
    let mut conn = pool.get().unwrap();

    assert!(run_migrations(Service::Blog, &mut conn).is_ok());
}
