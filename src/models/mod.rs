/// Data models module
///
/// This module defines the database rows of both services and the
/// insertable records used to create them.

// Job board
mod company;
pub use company::{Company, NewCompany};

mod job_post;
pub use job_post::{JobPost, NewJobPost};

mod applicant;
pub use applicant::{Applicant, NewApplicant};

// Blog
mod user;
pub use user::{NewUser, User};

mod session;
pub use session::Session;

mod post;
pub use post::{NewPost, Post};

mod comment;
pub use comment::{Comment, NewComment};

mod post_like;
pub use post_like::PostLike;
