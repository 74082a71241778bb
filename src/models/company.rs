use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

/// A company that publishes job posts
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::companies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Company {
    /// Database-assigned identifier
    id: i32,

    /// Display name of the company
    name: String,

    /// Where the company is based
    location: String,

    /// Free-text description
    description: String,

    /// When this company was created
    created_at: NaiveDateTime,
}

impl Company {
    pub fn get_id(&self) -> i32 {
        self.id
    }

    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    pub fn get_location(&self) -> String {
        self.location.clone()
    }

    pub fn get_description(&self) -> String {
        self.description.clone()
    }

    /// Gets the creation timestamp as a DateTime<Utc>
    pub fn get_created_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_at, Utc)
    }
}

/// Insertable form of a company, before the database assigns its ID
#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::companies)]
pub struct NewCompany {
    name: String,
    location: String,
    description: String,
    created_at: NaiveDateTime,
}

impl NewCompany {
    /// Creates a new company record stamped with the current time
    ///
    /// ### Arguments
    ///
    /// * `name` - The company name
    /// * `location` - Where the company is based
    /// * `description` - Free-text description
    pub fn new(name: String, location: String, description: String) -> Self {
        Self {
            name,
            location,
            description,
            created_at: Utc::now().naive_utc(),
        }
    }
}
