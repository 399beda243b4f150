use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension,
};
use tourney::{
    model::api::HallOfFameQuery,
    server::{
        controller::{
            hall::get_hall_of_fame, team::get_team_achievements,
            tournament::get_tournament_summary,
        },
        model::viewer::ViewerIdentity,
    },
};

use super::*;

fn signed_in() -> Option<Extension<ViewerIdentity>> {
    Some(Extension(ViewerIdentity {
        user_id: "viewer".to_string(),
    }))
}

mod get_hall_of_fame {
    use super::*;

    /// Expect 200 OK for both halls, with and without a viewer
    #[tokio::test]
    async fn ok_for_known_kinds() -> Result<(), TestError> {
        let test = test_setup_with_tournament_tables!()?;
        let state = test.app_state(None);

        let fame = get_hall_of_fame(
            State(state.clone()),
            None,
            Query(HallOfFameQuery::default()),
        )
        .await
        .into_response();
        let shame = get_hall_of_fame(
            State(state),
            signed_in(),
            Query(HallOfFameQuery {
                kind: Some("shame".to_string()),
            }),
        )
        .await
        .into_response();

        assert_eq!(fame.status(), StatusCode::OK);
        assert_eq!(shame.status(), StatusCode::OK);

        Ok(())
    }

    /// Expect 400 Bad Request for an unknown kind
    #[tokio::test]
    async fn rejects_unknown_kind() -> Result<(), TestError> {
        let test = test_setup_with_tournament_tables!()?;

        let resp = get_hall_of_fame(
            State(test.app_state(None)),
            None,
            Query(HallOfFameQuery {
                kind: Some("glory".to_string()),
            }),
        )
        .await
        .into_response();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }
}

mod get_tournament_summary {
    use super::*;

    /// Expect 200 OK for a known tournament and 404 Not Found otherwise
    #[tokio::test]
    async fn known_and_unknown() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let state = test.app_state(None);

        let known = get_tournament_summary(State(state.clone()), None, Path(test.season(0).tournament.id))
            .await
            .into_response();
        let unknown = get_tournament_summary(State(state), None, Path(404))
            .await
            .into_response();

        assert_eq!(known.status(), StatusCode::OK);
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

        Ok(())
    }

    /// Expect 404 Not Found for a private tournament without a viewer and 200 OK with one
    #[tokio::test]
    async fn private_tournament() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let tournament = test
            .fixtures()
            .set_tournament_private(test.season(0).tournament.clone(), true)
            .await?;
        let state = test.app_state(None);

        let anonymous = get_tournament_summary(State(state.clone()), None, Path(tournament.id))
            .await
            .into_response();
        let authenticated = get_tournament_summary(State(state), signed_in(), Path(tournament.id))
            .await
            .into_response();

        assert_eq!(anonymous.status(), StatusCode::NOT_FOUND);
        assert_eq!(authenticated.status(), StatusCode::OK);

        Ok(())
    }
}

mod get_team_achievements {
    use super::*;

    /// Expect 200 OK for a known team and 404 Not Found otherwise
    #[tokio::test]
    async fn known_and_unknown() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let state = test.app_state(None);

        let known = get_team_achievements(State(state.clone()), None, Path(test.season(0).teams[0].id))
            .await
            .into_response();
        let unknown = get_team_achievements(State(state), None, Path(404))
            .await
            .into_response();

        assert_eq!(known.status(), StatusCode::OK);
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

        Ok(())
    }

    /// Expect 404 Not Found for a private team without a viewer and 200 OK with one
    #[tokio::test]
    async fn private_team() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let team = test
            .fixtures()
            .set_team_private(test.season(0).teams[0].clone(), true)
            .await?;
        let state = test.app_state(None);

        let anonymous = get_team_achievements(State(state.clone()), None, Path(team.id))
            .await
            .into_response();
        let authenticated = get_team_achievements(State(state), signed_in(), Path(team.id))
            .await
            .into_response();

        assert_eq!(anonymous.status(), StatusCode::NOT_FOUND);
        assert_eq!(authenticated.status(), StatusCode::OK);

        Ok(())
    }
}
