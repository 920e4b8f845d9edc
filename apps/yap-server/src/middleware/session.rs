//! Anonymous session cookie and the CSRF guard for mutating routes.

use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use std::future::{Ready, ready};

use yap_core::domain::SessionId;
use yap_core::ports::CsrfTokenService;

use crate::config::SessionConfig;
use crate::middleware::error::AppError;
use crate::state::AppState;

/// Session cookie presented with the request, if any.
///
/// Extraction never fails; an absent or empty cookie is `None`.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<SessionId>);

impl FromRequest for MaybeSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state,
            None => {
                return ready(Err(AppError::Internal(
                    "AppState not found in app data".to_string(),
                )));
            }
        };

        let session = req
            .cookie(&state.config.session.cookie_name)
            .and_then(|cookie| SessionId::from_cookie(cookie.value()));

        ready(Ok(MaybeSession(session)))
    }
}

/// Return the presented session, or mint a new one together with the cookie
/// that carries it. At most one cookie is produced per call.
pub fn ensure_session(
    presented: Option<SessionId>,
    config: &SessionConfig,
) -> (SessionId, Option<Cookie<'static>>) {
    match presented {
        Some(session) => (session, None),
        None => {
            let session = SessionId::generate();
            tracing::debug!("Issuing new session cookie");
            let cookie = session_cookie(&session, config);
            (session, Some(cookie))
        }
    }
}

pub fn session_cookie(session: &SessionId, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), session.as_str().to_string())
        .path("/")
        .secure(config.secure)
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(config.max_age_secs))
        .finish()
}

/// Reject the request unless `token` was issued for this session and
/// namespace. Must run before any storage call on a mutating route.
pub fn require_csrf(
    csrf: &dyn CsrfTokenService,
    session: Option<&SessionId>,
    token: &str,
    namespace: &str,
) -> Result<SessionId, AppError> {
    let Some(session) = session else {
        tracing::warn!(namespace, "CSRF check failed: no session cookie");
        return Err(AppError::Unauthorized);
    };

    match csrf.validate_at(token, session, namespace, chrono::Utc::now()) {
        Ok(()) => Ok(session.clone()),
        Err(e) => {
            tracing::warn!(namespace, reason = %e, "CSRF check failed");
            Err(AppError::Unauthorized)
        }
    }
}
