//! SQLite pool for the course store.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;
use log::error;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// How long a writer waits on a locked course database.
const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

/// Pragmas run on every pooled SQLite connection.
#[derive(Debug, Clone, Copy)]
pub struct SqlitePragmas {
    /// WAL journal so list queries are not blocked by writers.
    pub wal: bool,
    pub busy_timeout: Option<Duration>,
}

impl Default for SqlitePragmas {
    fn default() -> Self {
        Self {
            wal: true,
            busy_timeout: Some(BUSY_TIMEOUT),
        }
    }
}

impl SqlitePragmas {
    /// The batch executed when a connection is handed out.
    pub fn statements(&self) -> String {
        let mut batch = String::new();
        if self.wal {
            batch.push_str("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;");
        }
        if let Some(timeout) = self.busy_timeout {
            batch.push_str(&format!(" PRAGMA busy_timeout = {};", timeout.as_millis()));
        }
        batch
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        let batch = self.statements();
        if batch.is_empty() {
            return Ok(());
        }
        conn.batch_execute(&batch)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds the course store pool for `database_url`.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(SqlitePragmas::default()))
        .build(manager)
}

pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get()
        .inspect_err(|e| error!("Failed to check out course store connection: {e}"))
}
