//! Vote casting.

use actix_web::{HttpResponse, web};

use yap_core::ports::NAMESPACE_VOTE;
use yap_core::validation::{parse_yap_id, validate_direction};
use yap_shared::dto::VoteForm;

use super::feed::see_other;
use crate::middleware::error::AppResult;
use crate::middleware::session::{MaybeSession, require_csrf};
use crate::state::AppState;

/// POST /{id}/vote/{direction}
///
/// Appends one vote. Corrections are made by voting the other way.
pub async fn cast_vote(
    state: web::Data<AppState>,
    session: MaybeSession,
    path: web::Path<(String, String)>,
    form: web::Form<VoteForm>,
) -> AppResult<HttpResponse> {
    let (raw_id, raw_direction) = path.into_inner();

    require_csrf(
        state.csrf.as_ref(),
        session.0.as_ref(),
        &form.csrf,
        NAMESPACE_VOTE,
    )?;

    let yap_id = parse_yap_id(&raw_id)?;
    let direction = validate_direction(&raw_direction)?;

    state.ledger.cast_vote(yap_id, direction).await?;
    tracing::info!(yap_id = %yap_id, direction = %direction, "Vote cast");

    Ok(see_other("/"))
}
