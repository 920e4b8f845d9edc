//! Anti-forgery token ports.

use chrono::{DateTime, Utc};

use crate::domain::SessionId;

/// Action namespace for creating a yap.
pub const NAMESPACE_CREATE: &str = "yap:create";

/// Action namespace for voting on a yap.
pub const NAMESPACE_VOTE: &str = "yap:vote";

/// Issues and checks CSRF tokens bound to a session and an action namespace.
///
/// Implementations keep no state per token; validity is recomputed from the
/// token, the secret and the presented session.
pub trait CsrfTokenService: Send + Sync {
    /// Issue a token as of `now`.
    fn issue_at(
        &self,
        session: &SessionId,
        namespace: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError>;

    /// Check a token as of `now`, reporting why it was rejected.
    fn validate_at(
        &self,
        token: &str,
        session: &SessionId,
        namespace: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AuthError>;

    fn issue(&self, session: &SessionId, namespace: &str) -> Result<String, AuthError> {
        self.issue_at(session, namespace, Utc::now())
    }

    /// Fails closed: any malformed, expired or mismatched token is `false`.
    fn verify(&self, token: &str, session: &SessionId, namespace: &str) -> bool {
        self.validate_at(token, session, namespace, Utc::now()).is_ok()
    }
}

/// Authorization errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing session")]
    MissingSession,

    #[error("Token was issued for another session")]
    SessionMismatch,

    #[error("Token was issued for another action")]
    NamespaceMismatch,

    #[error("Token signing failed: {0}")]
    Signing(String),
}
