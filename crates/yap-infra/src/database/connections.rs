use std::time::Duration;

use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the SQLite database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Bound on waiting for a pooled connection. Exceeding it surfaces as a
    /// retryable busy error.
    pub acquire_timeout: Duration,
    /// Bound on waiting for SQLite's writer lock, applied to every connection.
    pub busy_timeout: Duration,
}

impl DatabaseConfig {
    /// A private in-memory database on a single connection, so every query
    /// sees the same data.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_secs(5),
        }
    }
}

/// Connection pool for the yap database.
pub struct DatabaseConnections {
    pub main: DbConn,
}

impl DatabaseConnections {
    /// Connect with the journal, sync, foreign key and busy settings applied to
    /// each pooled connection as it opens.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let busy_timeout = config.busy_timeout;
        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false)
            .map_sqlx_sqlite_opts(move |opts: SqliteConnectOptions| {
                opts.journal_mode(SqliteJournalMode::Wal)
                    .synchronous(SqliteSynchronous::Normal)
                    .foreign_keys(true)
                    .busy_timeout(busy_timeout)
            })
            .to_owned();

        let main = Database::connect(opts).await?;

        tracing::info!(
            pool = config.max_connections,
            busy_timeout_ms = busy_timeout.as_millis() as u64,
            "Database connected"
        );

        Ok(Self { main })
    }

    /// Round-trip a trivial query, used by the health endpoint.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.main.ping().await
    }
}
