use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    engine::ranking::HallKind,
    model::api::{ErrorDto, HallOfFameDto, HallOfFameQuery},
    server::{
        error::Error,
        model::{app::AppState, viewer::ViewerIdentity},
        service::ranking::RankingService,
    },
};

pub static HALL_TAG: &str = "hall";

/// People whose teams most often finished first (`fame`) or last (`shame`)
///
/// Private teams and people are only listed for authenticated viewers.
#[utoipa::path(
    get,
    path = "/api/hall-of-fame",
    tag = HALL_TAG,
    params(HallOfFameQuery),
    responses(
        (status = 200, description = "Top entries of the hall", body = HallOfFameDto),
        (status = 400, description = "Unknown hall kind", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_hall_of_fame(
    State(state): State<AppState>,
    identity: Option<Extension<ViewerIdentity>>,
    Query(query): Query<HallOfFameQuery>,
) -> Result<impl IntoResponse, Error> {
    let kind = query
        .kind
        .as_deref()
        .map(str::parse::<HallKind>)
        .transpose()?
        .unwrap_or(HallKind::Fame);
    let viewer = ViewerIdentity::viewer(identity.as_ref().map(|Extension(id)| id));

    let hall = RankingService::new(&state.db)
        .hall_of_fame(kind, viewer)
        .await?;

    Ok((StatusCode::OK, Json(hall)))
}
