//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every endpoint is registered through utoipa-axum so its OpenAPI description lands in one
//! document, and Swagger UI serves that document at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `POST /api/seasons/{id}/matches/generate` - Generate or regenerate a season's schedule
/// - `POST /api/seasons/{id}/matches/reset` - Delete a season's matches and calendar events
/// - `POST /api/seasons/{id}/matches/advance` - Create newly determinable bracket rounds
/// - `GET /api/seasons/{id}/standings` - Ranked standings
/// - `GET /api/seasons/{id}/summary` - Standings, podium and next match
/// - `POST /api/seasons/{id}/calendar/sync` - Create missing calendar events
/// - `POST /api/seasons/{id}/teams/randomize` - Randomise people into season teams
/// - `PUT /api/matches/{id}` - Update a match
/// - `DELETE /api/matches/{id}` - Delete a match
/// - `GET /api/tournaments/{id}/summary` - Tournament seasons and podium
/// - `GET /api/teams/{id}/achievements` - Seasons a team won or finished last
/// - `GET /api/hall-of-fame` - Hall of fame or shame
///
/// The OpenAPI document is available at `/api/docs/openapi.json`.
///
/// # Returns
/// An Axum `Router<AppState>` ready to be given its state and served.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Tourney", description = "Tournament scheduling and standings API"), tags(
        (name = controller::season::SEASON_TAG, description = "Season schedule, standings and team routes"),
        (name = controller::matches::MATCH_TAG, description = "Match lifecycle routes"),
        (name = controller::tournament::TOURNAMENT_TAG, description = "Tournament routes"),
        (name = controller::team::TEAM_TAG, description = "Team routes"),
        (name = controller::hall::HALL_TAG, description = "Hall of fame and shame"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::season::generate_schedule))
        .routes(routes!(controller::season::reset_schedule))
        .routes(routes!(controller::season::advance_bracket))
        .routes(routes!(controller::season::get_standings))
        .routes(routes!(controller::season::get_season_summary))
        .routes(routes!(controller::season::sync_calendar))
        .routes(routes!(controller::season::randomize_teams))
        .routes(routes!(
            controller::matches::update_match,
            controller::matches::delete_match
        ))
        .routes(routes!(controller::tournament::get_tournament_summary))
        .routes(routes!(controller::team::get_team_achievements))
        .routes(routes!(controller::hall::get_hall_of_fame))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
