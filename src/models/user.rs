use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use std::fmt;

/// A registered blog user
///
/// The password is only ever held as an argon2 PHC string and is never
/// exposed through a getter that could end up in a response.
#[derive(Queryable, Selectable, Identifiable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    id: i32,
    username: String,
    email: String,
    password_hash: String,
    date_joined: NaiveDateTime,
}

impl User {
    pub fn get_id(&self) -> i32 {
        self.id
    }

    pub fn get_username(&self) -> String {
        self.username.clone()
    }

    pub fn get_email(&self) -> String {
        self.email.clone()
    }

    /// Gets the stored password hash, for verification only
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("date_joined", &self.date_joined)
            .finish()
    }
}

/// Insertable form of a user; the password must already be hashed
#[derive(Insertable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    username: String,
    email: String,
    password_hash: String,
    date_joined: NaiveDateTime,
}

impl NewUser {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            username,
            email,
            password_hash,
            date_joined: Utc::now().naive_utc(),
        }
    }
}
