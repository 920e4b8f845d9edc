//! Database connection management and the SQLite store.

#[cfg(feature = "sqlite")]
mod connections;
#[cfg(feature = "sqlite")]
mod sqlite_repo;

#[cfg(feature = "sqlite")]
pub mod entity;

#[cfg(feature = "sqlite")]
pub use connections::{DatabaseConfig, DatabaseConnections};

#[cfg(feature = "sqlite")]
pub use sqlite_repo::SqliteYapStore;
