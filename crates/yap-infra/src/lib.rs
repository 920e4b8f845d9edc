//! # Yap Infrastructure
//!
//! Concrete implementations of the ports defined in `yap-core`:
//! the SQLite post store / vote ledger / score reader, an in-memory
//! equivalent, and the JWT-backed CSRF token service.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `sqlite` - SQLite storage via SeaORM
//! - `csrf` - HS256 CSRF tokens via jsonwebtoken
//!
//! With default features off only the in-memory store is built.

pub mod database;
pub mod memory;

#[cfg(feature = "csrf")]
pub mod csrf;

// Re-exports - In-Memory
pub use memory::InMemoryYapStore;

#[cfg(feature = "sqlite")]
pub use database::{DatabaseConfig, DatabaseConnections, SqliteYapStore};

#[cfg(feature = "csrf")]
pub use csrf::{CsrfConfig, JwtCsrfTokenService};
