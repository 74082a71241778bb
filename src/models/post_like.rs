use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

/// A user's like on a post
///
/// The `(post_id, user_id)` pair is the primary key, so a user can like a
/// post at most once.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::post_likes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PostLike {
    post_id: i32,
    user_id: i32,
    created_at: NaiveDateTime,
}

impl PostLike {
    /// Creates a new like association
    ///
    /// ### Arguments
    ///
    /// * `post_id` - The liked post
    /// * `user_id` - The user doing the liking
    pub fn new(post_id: i32, user_id: i32) -> Self {
        Self {
            post_id,
            user_id,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[cfg(test)]

    pub fn get_post_id(&self) -> i32 {
        self.post_id
    }

    #[cfg(test)]

    pub fn get_user_id(&self) -> i32 {
        self.user_id
    }

    #[cfg(test)]

    pub fn get_created_at(&self) -> chrono::DateTime<Utc> {
        chrono::DateTime::from_naive_utc_and_offset(self.created_at, Utc)
    }
}
