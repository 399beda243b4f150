use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    model::{
        api::{AchievementsDto, ErrorDto},
        team::TeamId,
    },
    server::{
        error::Error,
        model::{app::AppState, viewer::ViewerIdentity},
        service::ranking::RankingService,
    },
};

pub static TEAM_TAG: &str = "team";

/// Seasons in which a team finished first or last
///
/// Private teams are only visible to authenticated viewers.
#[utoipa::path(
    get,
    path = "/api/teams/{id}/achievements",
    tag = TEAM_TAG,
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team achievements", body = AchievementsDto),
        (status = 404, description = "Team not found or private", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_team_achievements(
    State(state): State<AppState>,
    identity: Option<Extension<ViewerIdentity>>,
    Path(team_id): Path<TeamId>,
) -> Result<impl IntoResponse, Error> {
    let viewer = ViewerIdentity::viewer(identity.as_ref().map(|Extension(id)| id));

    let achievements = RankingService::new(&state.db)
        .team_achievements(team_id, viewer)
        .await?;

    Ok((StatusCode::OK, Json(achievements)))
}
