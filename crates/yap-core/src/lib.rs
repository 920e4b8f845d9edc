//! # Yap Core
//!
//! The domain layer of yap: validated posts, the append-only vote ledger model,
//! the score fold and the ports that storage and the CSRF guard implement.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

pub use error::{DomainError, RepoError};
pub use validation::ValidationError;
