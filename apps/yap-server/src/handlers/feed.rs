//! Feed handlers: list yaps, post a yap, view one yap.

use actix_web::{HttpResponse, http::header, web};

use yap_core::domain::{ScoredYap, Yap};
use yap_core::ports::{NAMESPACE_CREATE, NAMESPACE_VOTE};
use yap_core::validation::{parse_yap_id, validate_content};
use yap_shared::ApiResponse;
use yap_shared::dto::{CreateYapForm, CsrfTokens, FeedResponse, YapResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::{MaybeSession, ensure_session, require_csrf};
use crate::state::AppState;

pub(crate) fn to_response(scored: ScoredYap) -> YapResponse {
    YapResponse {
        id: scored.yap.id().to_string(),
        content: scored.yap.content().to_string(),
        region: scored.yap.region().to_string(),
        score: scored.score,
    }
}

/// 303 back to the feed after a successful mutation.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// GET /
///
/// Establishes a session if absent and hands out fresh tokens for the
/// create and vote forms.
pub async fn index(state: web::Data<AppState>, session: MaybeSession) -> AppResult<HttpResponse> {
    let (session, new_cookie) = ensure_session(session.0, &state.config.session);

    let issue = |namespace: &str| {
        state
            .csrf
            .issue(&session, namespace)
            .map_err(|e| AppError::Internal(e.to_string()))
    };
    let csrf = CsrfTokens {
        create: issue(NAMESPACE_CREATE)?,
        vote: issue(NAMESPACE_VOTE)?,
    };

    let yaps: Vec<YapResponse> = state
        .scores
        .list_feed()
        .await?
        .into_iter()
        .map(to_response)
        .collect();

    let body = FeedResponse {
        yaps,
        regions: state.config.regions.codes().map(String::from).collect(),
        csrf,
    };

    let mut resp = HttpResponse::Ok();
    if let Some(cookie) = new_cookie {
        resp.cookie(cookie);
    }
    Ok(resp.json(ApiResponse::ok(body)))
}

/// POST /
pub async fn create_yap(
    state: web::Data<AppState>,
    session: MaybeSession,
    form: web::Form<CreateYapForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    require_csrf(
        state.csrf.as_ref(),
        session.0.as_ref(),
        &form.csrf,
        NAMESPACE_CREATE,
    )?;

    let content = validate_content(&form.content)?;
    let region = state.config.regions.validate(&form.region)?;

    let yap = state.yaps.insert(Yap::new(content, region)).await?;
    tracing::info!(yap_id = %yap.id(), region = %yap.region(), "Yap created");

    Ok(see_other("/"))
}

/// GET /yap/{id}
pub async fn view_yap(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_yap_id(&path.into_inner())?;

    let scored = state
        .scores
        .find_scored(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("yap with id {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(scored))))
}
