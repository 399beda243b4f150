use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    model::{
        api::{ErrorDto, TournamentSummaryDto},
        tournament::TournamentId,
    },
    server::{
        error::Error,
        model::{app::AppState, viewer::ViewerIdentity},
        service::ranking::RankingService,
    },
};

pub static TOURNAMENT_TAG: &str = "tournament";

/// A tournament, its seasons and the podium of the latest completed season
///
/// Private tournaments are only visible to authenticated viewers.
#[utoipa::path(
    get,
    path = "/api/tournaments/{id}/summary",
    tag = TOURNAMENT_TAG,
    params(("id" = i32, Path, description = "Tournament ID")),
    responses(
        (status = 200, description = "Tournament summary", body = TournamentSummaryDto),
        (status = 404, description = "Tournament not found or private", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_tournament_summary(
    State(state): State<AppState>,
    identity: Option<Extension<ViewerIdentity>>,
    Path(tournament_id): Path<TournamentId>,
) -> Result<impl IntoResponse, Error> {
    let viewer = ViewerIdentity::viewer(identity.as_ref().map(|Extension(id)| id));

    let summary = RankingService::new(&state.db)
        .tournament_summary(tournament_id, viewer)
        .await?;

    Ok((StatusCode::OK, Json(summary)))
}
