use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    engine::lifecycle::MatchPatch,
    model::{
        api::{DeleteMatchDto, ErrorDto, MatchUpdateDto, UpdateMatchRequest},
        matches::MatchId,
    },
    server::{error::Error, model::app::AppState, service::matches::MatchService},
};

pub static MATCH_TAG: &str = "match";

/// Update the status, scores, schedule or participants of a match
///
/// Omitted fields are left untouched, `null` clears a field. The winner is derived from the
/// scores. A failed calendar update still returns 200 with `calendar.status = "failed"`.
///
/// # Responses
/// - 200 (OK): The updated match and the calendar outcome
/// - 400 (Bad Request): The update would leave the match in an invalid state
/// - 404 (Not Found): Unknown match
/// - 500 (Internal Server Error): Database error
#[utoipa::path(
    put,
    path = "/api/matches/{id}",
    tag = MATCH_TAG,
    params(("id" = i32, Path, description = "Match ID")),
    request_body = UpdateMatchRequest,
    responses(
        (status = 200, description = "Match updated", body = MatchUpdateDto),
        (status = 400, description = "Invalid update", body = ErrorDto),
        (status = 404, description = "Match not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_match(
    State(state): State<AppState>,
    Path(match_id): Path<MatchId>,
    Json(request): Json<UpdateMatchRequest>,
) -> Result<impl IntoResponse, Error> {
    let patch = MatchPatch::try_from(request)?;

    let report = MatchService::new(
        &state.db,
        state.calendar.as_deref(),
        state.config.calendar_event_minutes,
    )
    .update_match(match_id, patch)
    .await?;

    if report.calendar.is_degraded() {
        tracing::warn!(match_id = %match_id, "Match updated without calendar sync");
    }

    Ok((StatusCode::OK, Json(report)))
}

#[utoipa::path(
    delete,
    path = "/api/matches/{id}",
    tag = MATCH_TAG,
    params(("id" = i32, Path, description = "Match ID")),
    responses(
        (status = 200, description = "Match deleted", body = DeleteMatchDto),
        (status = 404, description = "Match not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_match(
    State(state): State<AppState>,
    Path(match_id): Path<MatchId>,
) -> Result<impl IntoResponse, Error> {
    let report = MatchService::new(
        &state.db,
        state.calendar.as_deref(),
        state.config.calendar_event_minutes,
    )
    .delete_match(match_id)
    .await?;

    Ok((StatusCode::OK, Json(report)))
}
