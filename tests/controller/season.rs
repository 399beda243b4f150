use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use tourney::{
    engine::roster::RosterEntry,
    model::api::{GenerateScheduleRequest, RandomizeTeamsRequest},
    server::{
        controller::season::{
            advance_bracket, generate_schedule, get_season_summary, get_standings,
            randomize_teams, reset_schedule, sync_calendar,
        },
        model::viewer::ViewerIdentity,
    },
};

use super::*;

fn request(shuffle: bool, regenerate: bool) -> Json<GenerateScheduleRequest> {
    Json(GenerateScheduleRequest {
        shuffle,
        regenerate,
    })
}

mod generate_schedule {
    use super::*;

    /// Expect 201 Created for a fresh schedule
    #[tokio::test]
    async fn created() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 4).build().await?;

        let result = generate_schedule(
            State(test.app_state(None)),
            Path(test.season(0).season.id),
            request(false, false),
        )
        .await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);

        Ok(())
    }

    /// Expect 409 Conflict when matches exist and 201 Created when regenerating
    #[tokio::test]
    async fn conflict_unless_regenerating() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("cup", 4).build().await?;
        let season_id = test.season(0).season.id;
        let state = test.app_state(None);

        let first = generate_schedule(State(state.clone()), Path(season_id), request(false, false))
            .await
            .into_response();
        let second = generate_schedule(State(state.clone()), Path(season_id), request(true, false))
            .await
            .into_response();
        let third = generate_schedule(State(state), Path(season_id), request(true, true))
            .await
            .into_response();

        assert_eq!(first.status(), StatusCode::CREATED);
        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert_eq!(third.status(), StatusCode::CREATED);

        Ok(())
    }

    /// Expect 400 Bad Request with a single team
    #[tokio::test]
    async fn too_few_teams() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 1).build().await?;

        let resp = generate_schedule(
            State(test.app_state(None)),
            Path(test.season(0).season.id),
            request(false, false),
        )
        .await
        .into_response();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    /// Expect 404 Not Found for an unknown season
    #[tokio::test]
    async fn unknown_season() -> Result<(), TestError> {
        let test = test_setup_with_tournament_tables!()?;

        let resp = generate_schedule(State(test.app_state(None)), Path(12), request(false, false))
            .await
            .into_response();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}

mod reset_and_advance {
    use super::*;

    /// Expect 200 OK for a reset, even when no calendar is configured
    #[tokio::test]
    async fn reset_ok() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        test.fixtures()
            .insert_mock_match(fixture.season.id, 1, Some(ids[0]), Some(ids[1]))
            .await?;

        let resp = reset_schedule(State(test.app_state(None)), Path(fixture.season.id))
            .await
            .into_response();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(test.fixtures().get_matches(fixture.season.id).await?.is_empty());

        Ok(())
    }

    /// Expect 400 Bad Request when a bracket match ended in a draw
    #[tokio::test]
    async fn advance_rejects_draw() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("cup", 2).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        test.fixtures()
            .insert_completed_match(fixture.season.id, 1, (ids[0], ids[1]), (1, 1))
            .await?;

        let resp = advance_bracket(State(test.app_state(None)), Path(fixture.season.id))
            .await
            .into_response();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }
}

mod read_endpoints {
    use super::*;

    /// Expect 200 OK for the standings and summary of a known season
    #[tokio::test]
    async fn ok_for_known_season() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let season_id = test.season(0).season.id;
        let state = test.app_state(None);

        let standings = get_standings(State(state.clone()), Path(season_id))
            .await
            .into_response();
        let summary = get_season_summary(State(state), Path(season_id))
            .await
            .into_response();

        assert_eq!(standings.status(), StatusCode::OK);
        assert_eq!(summary.status(), StatusCode::OK);

        Ok(())
    }

    /// Expect 404 Not Found for an unknown season
    #[tokio::test]
    async fn not_found_for_unknown_season() -> Result<(), TestError> {
        let test = test_setup_with_tournament_tables!()?;
        let state = test.app_state(None);

        let standings = get_standings(State(state.clone()), Path(3))
            .await
            .into_response();
        let summary = get_season_summary(State(state), Path(3)).await.into_response();

        assert_eq!(standings.status(), StatusCode::NOT_FOUND);
        assert_eq!(summary.status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}

mod sync_calendar {
    use super::*;

    /// Expect 200 OK with events created through the configured calendar
    #[tokio::test]
    async fn syncs_with_calendar() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        test.fixtures()
            .insert_mock_match(fixture.season.id, 1, Some(ids[0]), Some(ids[1]))
            .await?;
        let calendar = MockCalendar::new();

        let resp = sync_calendar(State(test.app_state(Some(&calendar))), Path(fixture.season.id))
            .await
            .into_response();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(calendar.calls().len(), 1);

        Ok(())
    }
}

mod randomize_teams {
    use super::*;

    fn randomize(entries: Vec<RosterEntry>, preview: bool) -> Json<RandomizeTeamsRequest> {
        Json(RandomizeTeamsRequest {
            team_count: 2,
            entries,
            buckets: None,
            preview,
        })
    }

    /// Expect 200 OK for a preview and 201 Created once committed
    #[tokio::test]
    async fn preview_then_commit() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 0).build().await?;
        let season_id = test.season(0).season.id;
        let mut entries = Vec::new();
        for name in ["Ana", "Bo"] {
            let person = test.fixtures().insert_mock_person(name, None, false).await?;
            entries.push(RosterEntry::auto(person.id));
        }
        let state = test.app_state(None);

        let preview = randomize_teams(
            State(state.clone()),
            Path(season_id),
            None,
            randomize(entries.clone(), true),
        )
        .await
        .into_response();
        let commit = randomize_teams(
            State(state),
            Path(season_id),
            Some(Extension(ViewerIdentity {
                user_id: "owner-1".to_string(),
            })),
            randomize(entries, false),
        )
        .await
        .into_response();

        assert_eq!(preview.status(), StatusCode::OK);
        assert_eq!(commit.status(), StatusCode::CREATED);

        Ok(())
    }

    /// Expect 400 Bad Request without anyone to assign
    #[tokio::test]
    async fn rejects_empty_selection() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 0).build().await?;

        let resp = randomize_teams(
            State(test.app_state(None)),
            Path(test.season(0).season.id),
            None,
            randomize(Vec::new(), true),
        )
        .await
        .into_response();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }
}
