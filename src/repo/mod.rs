/// Repository module
///
/// This module provides the data access layer for both services.
/// Every function takes the connection pool, checks out a connection and
/// returns `anyhow::Result`, leaving HTTP concerns to the handlers.

// Job board
mod company_repo;
mod job_repo;
mod applicant_repo;

// Blog
mod user_repo;
mod session_repo;
mod post_repo;
mod comment_repo;

// Re-export all repository functions
pub use company_repo::*;
pub use job_repo::*;
pub use applicant_repo::*;
pub use user_repo::*;
pub use session_repo::*;
pub use post_repo::*;
pub use comment_repo::*;

use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Whether a repository error was caused by a UNIQUE constraint
///
/// Lets callers turn a race on a unique column into the same response as
/// the pre-check would have produced.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<DieselError>(),
        Some(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _))
    )
}
