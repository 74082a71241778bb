use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use super::Post;

/// A comment left on a post
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Eq)]
#[diesel(belongs_to(Post))]
#[diesel(table_name = crate::schema::comments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Comment {
    id: i32,
    post_id: i32,

    /// The user who wrote the comment (not necessarily the post's author)
    user_id: i32,

    text: String,
    created_at: NaiveDateTime,
}

impl Comment {
    pub fn get_id(&self) -> i32 {
        self.id
    }

    #[cfg(test)]

    pub fn get_post_id(&self) -> i32 {
        self.post_id
    }

    #[cfg(test)]

    pub fn get_user_id(&self) -> i32 {
        self.user_id
    }

    /// Whether `user_id` wrote this comment
    pub fn is_authored_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }

    pub fn get_text(&self) -> String {
        self.text.clone()
    }

    pub fn get_created_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_at, Utc)
    }
}

/// Insertable form of a comment
#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment {
    post_id: i32,
    user_id: i32,
    text: String,
    created_at: NaiveDateTime,
}

impl NewComment {
    pub fn new(post_id: i32, user_id: i32, text: String) -> Self {
        Self {
            post_id,
            user_id,
            text,
            created_at: Utc::now().naive_utc(),
        }
    }
}
