use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::Utc;

use crate::{
    model::{
        api::{
            AdvanceReportDto, CalendarSyncDto, ErrorDto, GenerateScheduleRequest,
            RandomizeTeamsDto, RandomizeTeamsRequest, ResetReportDto, ScheduleReportDto,
            SeasonSummaryDto, StandingsDto,
        },
        season::SeasonId,
    },
    server::{
        error::Error,
        model::{app::AppState, viewer::ViewerIdentity},
        service::{
            calendar::CalendarService,
            ranking::RankingService,
            roster::RosterService,
            schedule::{GenerateOptions, ScheduleService},
            standings::StandingsService,
        },
    },
};

pub static SEASON_TAG: &str = "season";

/// Generate the match schedule of a season
///
/// With `regenerate` the existing matches and their calendar events are removed first,
/// otherwise a season that already has matches is rejected.
///
/// # Responses
/// - 201 (Created): The generated matches
/// - 400 (Bad Request): Fewer than 2 teams are linked to the season
/// - 404 (Not Found): Unknown season
/// - 409 (Conflict): The season already has matches
/// - 500 (Internal Server Error): Database error
#[utoipa::path(
    post,
    path = "/api/seasons/{id}/matches/generate",
    tag = SEASON_TAG,
    params(("id" = i32, Path, description = "Season ID")),
    request_body = GenerateScheduleRequest,
    responses(
        (status = 201, description = "Schedule generated", body = ScheduleReportDto),
        (status = 400, description = "Too few teams", body = ErrorDto),
        (status = 404, description = "Season not found", body = ErrorDto),
        (status = 409, description = "Season already has matches", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn generate_schedule(
    State(state): State<AppState>,
    Path(season_id): Path<SeasonId>,
    Json(request): Json<GenerateScheduleRequest>,
) -> Result<impl IntoResponse, Error> {
    let service = ScheduleService::new(&state.db, state.calendar.as_deref());
    let options = GenerateOptions {
        shuffle: request.shuffle,
    };

    let report = if request.regenerate {
        service.regenerate(season_id, options).await?
    } else {
        service.generate(season_id, options).await?
    };

    Ok((StatusCode::CREATED, Json(report)))
}

/// Delete every match of a season along with the calendar events
#[utoipa::path(
    post,
    path = "/api/seasons/{id}/matches/reset",
    tag = SEASON_TAG,
    params(("id" = i32, Path, description = "Season ID")),
    responses(
        (status = 200, description = "Schedule reset", body = ResetReportDto),
        (status = 404, description = "Season not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reset_schedule(
    State(state): State<AppState>,
    Path(season_id): Path<SeasonId>,
) -> Result<impl IntoResponse, Error> {
    let report = ScheduleService::new(&state.db, state.calendar.as_deref())
        .reset(season_id)
        .await?;

    Ok((StatusCode::OK, Json(report)))
}

/// Create the bracket rounds that can be determined from the recorded results
#[utoipa::path(
    post,
    path = "/api/seasons/{id}/matches/advance",
    tag = SEASON_TAG,
    params(("id" = i32, Path, description = "Season ID")),
    responses(
        (status = 200, description = "Newly created matches, empty when nothing could advance", body = AdvanceReportDto),
        (status = 400, description = "A completed bracket match ended in a draw", body = ErrorDto),
        (status = 404, description = "Season not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn advance_bracket(
    State(state): State<AppState>,
    Path(season_id): Path<SeasonId>,
) -> Result<impl IntoResponse, Error> {
    let report = ScheduleService::new(&state.db, state.calendar.as_deref())
        .advance(season_id)
        .await?;

    Ok((StatusCode::OK, Json(report)))
}

#[utoipa::path(
    get,
    path = "/api/seasons/{id}/standings",
    tag = SEASON_TAG,
    params(("id" = i32, Path, description = "Season ID")),
    responses(
        (status = 200, description = "Ranked standings", body = StandingsDto),
        (status = 404, description = "Season not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_standings(
    State(state): State<AppState>,
    Path(season_id): Path<SeasonId>,
) -> Result<impl IntoResponse, Error> {
    let standings = StandingsService::new(&state.db).get(season_id).await?;

    Ok((StatusCode::OK, Json(standings)))
}

/// Standings, podium and the next match of a season
#[utoipa::path(
    get,
    path = "/api/seasons/{id}/summary",
    tag = SEASON_TAG,
    params(("id" = i32, Path, description = "Season ID")),
    responses(
        (status = 200, description = "Season summary", body = SeasonSummaryDto),
        (status = 404, description = "Season not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_season_summary(
    State(state): State<AppState>,
    Path(season_id): Path<SeasonId>,
) -> Result<impl IntoResponse, Error> {
    let summary = RankingService::new(&state.db)
        .season_summary(season_id, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(summary)))
}

/// Create calendar events for every match of a season that has none
///
/// Failures of individual matches are counted rather than aborting the sync.
#[utoipa::path(
    post,
    path = "/api/seasons/{id}/calendar/sync",
    tag = SEASON_TAG,
    params(("id" = i32, Path, description = "Season ID")),
    responses(
        (status = 200, description = "Synced and failed match counts", body = CalendarSyncDto),
        (status = 404, description = "Season not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn sync_calendar(
    State(state): State<AppState>,
    Path(season_id): Path<SeasonId>,
) -> Result<impl IntoResponse, Error> {
    let report = CalendarService::new(
        &state.db,
        state.calendar.as_deref(),
        state.config.calendar_event_minutes,
    )
    .sync_season(season_id)
    .await?;

    Ok((StatusCode::OK, Json(report)))
}

/// Randomise people into teams for a season
///
/// # Responses
/// - 200 (OK): A preview, nothing was written
/// - 201 (Created): Teams were created or reused and linked to the season
/// - 400 (Bad Request): No buckets or no people to assign
/// - 404 (Not Found): Unknown season or person
/// - 500 (Internal Server Error): Database error
#[utoipa::path(
    post,
    path = "/api/seasons/{id}/teams/randomize",
    tag = SEASON_TAG,
    params(("id" = i32, Path, description = "Season ID")),
    request_body = RandomizeTeamsRequest,
    responses(
        (status = 200, description = "Preview of the assignment", body = RandomizeTeamsDto),
        (status = 201, description = "Teams created and linked", body = RandomizeTeamsDto),
        (status = 400, description = "Invalid assignment", body = ErrorDto),
        (status = 404, description = "Season or person not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn randomize_teams(
    State(state): State<AppState>,
    Path(season_id): Path<SeasonId>,
    identity: Option<Extension<ViewerIdentity>>,
    Json(request): Json<RandomizeTeamsRequest>,
) -> Result<impl IntoResponse, Error> {
    let status = if request.preview {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    let owner_id = identity.as_ref().map(|Extension(id)| id.user_id.as_str());

    let result = RosterService::new(&state.db)
        .randomize(season_id, request, owner_id)
        .await?;

    Ok((status, Json(result)))
}
