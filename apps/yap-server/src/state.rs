//! Application state - shared across all handlers.

use std::sync::Arc;

use migration::{DbErr, Migrator, MigratorTrait};
use yap_core::ports::{CsrfTokenService, ScoreReader, VoteLedger, YapRepository};
use yap_infra::InMemoryYapStore;
use yap_infra::csrf::JwtCsrfTokenService;
use yap_infra::database::{DatabaseConfig, DatabaseConnections, SqliteYapStore};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub yaps: Arc<dyn YapRepository>,
    pub ledger: Arc<dyn VoteLedger>,
    pub scores: Arc<dyn ScoreReader>,
    pub csrf: Arc<dyn CsrfTokenService>,
    pub config: Arc<AppConfig>,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// A configured database that cannot be opened or migrated is an error;
    /// the in-memory store is only used when no database is configured.
    pub async fn new(config: AppConfig) -> Result<Self, DbErr> {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            let state = Self::in_memory(config);
            tracing::info!("Application state initialized (in-memory)");
            return Ok(state);
        };

        let conn = Self::connect(db_config, config.auto_migrate)
            .await
            .inspect_err(|e| tracing::error!("Failed to initialize database: {}", e))?;

        let store = Arc::new(SqliteYapStore::new(conn.main.clone()));
        let mut state = Self::with_store(store, config);
        state.db = Some(conn);
        tracing::info!("Application state initialized (sqlite)");
        Ok(state)
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(config: AppConfig) -> Self {
        Self::with_store(Arc::new(InMemoryYapStore::new()), config)
    }

    /// Wire one store into all three storage ports.
    pub fn with_store<S>(store: Arc<S>, config: AppConfig) -> Self
    where
        S: YapRepository + VoteLedger + ScoreReader + 'static,
    {
        let csrf = Arc::new(JwtCsrfTokenService::new(config.csrf.clone()));

        Self {
            yaps: store.clone(),
            ledger: store.clone(),
            scores: store,
            csrf,
            config: Arc::new(config),
            db: None,
        }
    }

    async fn connect(
        db_config: &DatabaseConfig,
        auto_migrate: bool,
    ) -> Result<Arc<DatabaseConnections>, DbErr> {
        let conn = DatabaseConnections::init(db_config).await?;
        if auto_migrate {
            Migrator::up(&conn.main, None).await?;
            tracing::info!("Database migrations applied");
        }
        Ok(Arc::new(conn))
    }
}
