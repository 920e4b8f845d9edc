//! HS256 CSRF token service.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use yap_core::domain::SessionId;
use yap_core::ports::{AuthError, CsrfTokenService};

/// Secret used when none is configured. Only acceptable for local development.
pub const DEFAULT_SECRET: &str = "change-me-in-production";

/// Tokens issued up to this many seconds in the future are still accepted.
const CLOCK_SKEW_SECS: i64 = 60;

/// CSRF token service configuration.
#[derive(Debug, Clone)]
pub struct CsrfConfig {
    pub secret: String,
    pub ttl: TimeDelta,
}

impl CsrfConfig {
    pub fn is_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            ttl: TimeDelta::hours(24),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sid: String, // session value
    act: String, // action namespace
    iat: i64,
    exp: i64,
}

/// CSRF tokens as compact HS256 JWTs binding a session and an action namespace.
///
/// Nothing is stored per token. Validity is recomputed from the signature and
/// the claims on every check.
pub struct JwtCsrfTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: CsrfConfig,
}

impl JwtCsrfTokenService {
    pub fn new(config: CsrfConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Expiry is checked against the caller's clock in validate_at
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }

    /// Token lifetime in seconds, also used as the session cookie max-age.
    pub fn ttl_seconds(&self) -> i64 {
        self.config.ttl.num_seconds()
    }
}

impl CsrfTokenService for JwtCsrfTokenService {
    fn issue_at(
        &self,
        session: &SessionId,
        namespace: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        if session.is_empty() {
            return Err(AuthError::MissingSession);
        }

        let claims = Claims {
            sid: session.as_str().to_string(),
            act: namespace.to_string(),
            iat: now.timestamp(),
            exp: (now + self.config.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    fn validate_at(
        &self,
        token: &str,
        session: &SessionId,
        namespace: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        if session.is_empty() {
            return Err(AuthError::MissingSession);
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?
            .claims;

        if claims.sid != session.as_str() {
            return Err(AuthError::SessionMismatch);
        }
        if claims.act != namespace {
            return Err(AuthError::NamespaceMismatch);
        }

        let now_ts = now.timestamp();
        if now_ts >= claims.exp {
            return Err(AuthError::TokenExpired);
        }
        if claims.iat > now_ts + CLOCK_SKEW_SECS {
            return Err(AuthError::InvalidToken("issued in the future".to_string()));
        }

        Ok(())
    }
}
