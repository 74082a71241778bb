/// Web API Handlers
///
/// This module contains the handlers for both services' endpoints.
/// Each handler is responsible for processing a specific type of HTTP request,
/// extracting the necessary data, calling the appropriate repository functions,
/// and returning a properly formatted response.

// Job board
mod company_handlers;
mod job_handlers;
mod applicant_handlers;

// Blog
mod auth_handlers;
mod post_handlers;
mod comment_handlers;

mod fallback_handlers;

// Re-export all handlers
pub use company_handlers::*;
pub use job_handlers::*;
pub use applicant_handlers::*;
pub use auth_handlers::*;
pub use post_handlers::*;
pub use comment_handlers::*;
pub use fallback_handlers::*;

#[cfg(test)]
mod tests;
