//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;

pub use auth::{AuthError, CsrfTokenService, NAMESPACE_CREATE, NAMESPACE_VOTE};
pub use repository::{ScoreReader, VoteLedger, YapRepository};
