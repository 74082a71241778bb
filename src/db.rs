use anyhow::Result;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Per-connection SQLite settings.
///
/// SQLite only enforces foreign keys (and therefore `ON DELETE CASCADE`) when
/// the pragma is enabled on the connection, so every pooled connection gets
/// it on checkout.
#[derive(Debug, Clone, Copy)]
pub struct SqlitePragmas {
    pub busy_timeout_ms: u32,
}

impl Default for SqlitePragmas {
    fn default() -> Self {
        Self { busy_timeout_ms: 5_000 }
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout_ms
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn init_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .connection_customizer(Box::new(SqlitePragmas::default()))
        .build(manager)?;
    Ok(pool)
}
