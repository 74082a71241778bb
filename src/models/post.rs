use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use super::User;

/// A blog post
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Eq)]
#[diesel(belongs_to(User, foreign_key = author_id))]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Post {
    id: i32,

    /// The user who wrote the post
    author_id: i32,

    title: String,

    content: String,

    created_at: NaiveDateTime,
}

impl Post {
    pub fn get_id(&self) -> i32 {
        self.id
    }

    #[cfg(test)]

    pub fn get_author_id(&self) -> i32 {
        self.author_id
    }

    /// Whether `user_id` wrote this post
    pub fn is_authored_by(&self, user_id: i32) -> bool {
        self.author_id == user_id
    }

    pub fn get_title(&self) -> String {
        self.title.clone()
    }

    pub fn get_content(&self) -> String {
        self.content.clone()
    }

    pub fn get_created_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_at, Utc)
    }
}

/// Insertable form of a post
#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::posts)]
pub struct NewPost {
    author_id: i32,
    title: String,
    content: String,
    created_at: NaiveDateTime,
}

impl NewPost {
    pub fn new(author_id: i32, title: String, content: String) -> Self {
        Self {
            author_id,
            title,
            content,
            created_at: Utc::now().naive_utc(),
        }
    }
}
