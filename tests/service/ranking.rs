use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue};
use tourney::{
    engine::ranking::{AchievementKind, HallKind, Viewer},
    server::{
        error::{team::TeamError, tournament::TournamentError, Error},
        service::ranking::RankingService,
    },
};

use super::*;

/// Marks the fixture season completed, created `days_ago`, with standings in the given order.
async fn complete_season(
    test: &TestContext,
    fixture: &SeasonFixture,
    points: &[i32],
    show_loser: bool,
    days_ago: i64,
) -> Result<(), TestError> {
    for (team, &pts) in fixture.teams.iter().zip(points) {
        test.fixtures()
            .insert_mock_standing(fixture.season.id, team.id, pts, 0)
            .await?;
    }
    test.fixtures()
        .update_mock_season(fixture.season.clone(), "completed", show_loser, days_ago)
        .await?;

    Ok(())
}

mod season_summary {
    use super::*;

    /// Expect ranked standings, the champion and the earliest upcoming match
    #[tokio::test]
    async fn podium_and_next_match() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 3).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        test.fixtures()
            .insert_mock_standing(fixture.season.id, ids[0], 1, 0)
            .await?;
        test.fixtures()
            .insert_mock_standing(fixture.season.id, ids[1], 6, 2)
            .await?;
        test.fixtures()
            .insert_mock_standing(fixture.season.id, ids[2], 3, -2)
            .await?;
        test.fixtures()
            .insert_mock_match(fixture.season.id, 1, Some(ids[0]), Some(ids[1]))
            .await?;
        let later = test
            .fixtures()
            .insert_mock_match(fixture.season.id, 2, Some(ids[1]), Some(ids[2]))
            .await?;
        let now = Utc::now();
        let mut scheduled: entity::season_match::ActiveModel = later.clone().into();
        scheduled.scheduled_at = ActiveValue::Set(Some((now + Duration::days(2)).naive_utc()));
        scheduled.update(&test.db).await?;
        let service = RankingService::new(&test.db);

        let summary = service.season_summary(fixture.season.id, now).await.unwrap();

        let order: Vec<i32> = summary.standings.iter().map(|s| s.team_id).collect();
        assert_eq!(order, vec![ids[1], ids[2], ids[0]]);
        assert_eq!(summary.podium.champion.map(|s| s.team_id), Some(ids[1]));
        assert_eq!(summary.podium.last_place, None);
        assert_eq!(summary.next_match.map(|m| m.id), Some(later.id));

        Ok(())
    }

    /// Expect no next match once every match is completed
    #[tokio::test]
    async fn no_next_match_when_all_completed() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        test.fixtures()
            .insert_completed_match(fixture.season.id, 1, (ids[0], ids[1]), (2, 0))
            .await?;
        let service = RankingService::new(&test.db);

        let summary = service
            .season_summary(fixture.season.id, Utc::now())
            .await
            .unwrap();

        assert!(summary.next_match.is_none());

        Ok(())
    }
}

mod tournament_summary {
    use super::*;

    /// Expect the podium of the most recently created completed season
    #[tokio::test]
    async fn uses_latest_completed_season() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_season("league", 2)
            .with_season("league", 2)
            .build()
            .await?;
        let older = test.season(0).clone();
        let newer = test.season(1).clone();
        // Move the second season under the first tournament
        let mut moved: entity::season::ActiveModel = newer.season.clone().into();
        moved.tournament_id = ActiveValue::Set(older.tournament.id);
        let moved_season = moved.update(&test.db).await?;
        let newer = SeasonFixture {
            season: moved_season,
            ..newer
        };
        complete_season(&test, &older, &[3, 0], false, 10).await?;
        complete_season(&test, &newer, &[0, 3], false, 1).await?;
        let service = RankingService::new(&test.db);

        let summary = service
            .tournament_summary(older.tournament.id, Viewer::Anonymous)
            .await
            .unwrap();

        assert_eq!(summary.seasons.len(), 2);
        assert_eq!(summary.podium.season_id, Some(newer.season.id));
        assert_eq!(
            summary.podium.champion.map(|s| s.team_id),
            Some(newer.teams[1].id)
        );

        Ok(())
    }

    /// Expect an empty podium without a completed season
    #[tokio::test]
    async fn empty_podium_without_completed_season() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("cup", 2).build().await?;
        let service = RankingService::new(&test.db);

        let summary = service
            .tournament_summary(test.season(0).tournament.id, Viewer::Anonymous)
            .await
            .unwrap();

        assert_eq!(summary.podium.season_id, None);
        assert_eq!(summary.podium.champion, None);

        Ok(())
    }

    /// Expect a private tournament to be hidden from anonymous viewers only
    #[tokio::test]
    async fn private_tournament_requires_authentication() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let tournament = test
            .fixtures()
            .set_tournament_private(test.season(0).tournament.clone(), true)
            .await?;
        let service = RankingService::new(&test.db);

        let anonymous = service
            .tournament_summary(tournament.id, Viewer::Anonymous)
            .await;
        let authenticated = service
            .tournament_summary(tournament.id, Viewer::Authenticated)
            .await
            .unwrap();

        assert!(matches!(
            anonymous,
            Err(Error::TournamentError(TournamentError::NotFound(id))) if id == tournament.id
        ));
        assert_eq!(authenticated.tournament.id, tournament.id);

        Ok(())
    }

    /// Expect NotFound for an unknown tournament
    #[tokio::test]
    async fn unknown_tournament() -> Result<(), TestError> {
        let test = test_setup_with_tournament_tables!()?;
        let service = RankingService::new(&test.db);

        let result = service.tournament_summary(77, Viewer::Authenticated).await;

        assert!(matches!(
            result,
            Err(Error::TournamentError(TournamentError::NotFound(77)))
        ));

        Ok(())
    }
}

mod hall_of_fame {
    use super::*;

    /// Expect champions counted per completed season and last places in the hall of shame
    #[tokio::test]
    async fn counts_completed_seasons() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_season("league", 2)
            .with_season("league", 2)
            .with_season("league", 2)
            .build()
            .await?;
        let ana = test.fixtures().insert_mock_person("Ana", None, false).await?;
        let bo = test.fixtures().insert_mock_person("Bo", None, false).await?;
        for index in 0..3 {
            let fixture = test.season(index);
            test.fixtures()
                .insert_team_member(fixture.teams[0].id, ana.id, 1)
                .await?;
            test.fixtures()
                .insert_team_member(fixture.teams[1].id, bo.id, 1)
                .await?;
        }
        complete_season(&test, test.season(0), &[3, 0], false, 3).await?;
        complete_season(&test, test.season(1), &[3, 0], false, 2).await?;
        // Still running, ignored
        test.fixtures()
            .insert_mock_standing(test.season(2).season.id, test.season(2).teams[1].id, 9, 0)
            .await?;
        let service = RankingService::new(&test.db);

        let fame = service
            .hall_of_fame(HallKind::Fame, Viewer::Authenticated)
            .await
            .unwrap();
        let shame = service
            .hall_of_fame(HallKind::Shame, Viewer::Authenticated)
            .await
            .unwrap();

        let fame: Vec<(&str, u32)> = fame.entries.iter().map(|e| (e.name.as_str(), e.count)).collect();
        let shame: Vec<(&str, u32)> =
            shame.entries.iter().map(|e| (e.name.as_str(), e.count)).collect();
        assert_eq!(fame, vec![("Ana", 2)]);
        assert_eq!(shame, vec![("Bo", 2)]);

        Ok(())
    }

    /// Expect private people to be hidden from anonymous viewers only
    #[tokio::test]
    async fn hides_private_people_from_anonymous() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let fixture = test.season(0);
        let ana = test.fixtures().insert_mock_person("Ana", None, false).await?;
        let cy = test.fixtures().insert_mock_person("Cy", None, true).await?;
        test.fixtures()
            .insert_team_member(fixture.teams[0].id, ana.id, 1)
            .await?;
        test.fixtures()
            .insert_team_member(fixture.teams[0].id, cy.id, 2)
            .await?;
        complete_season(&test, fixture, &[3, 0], false, 1).await?;
        let service = RankingService::new(&test.db);

        let anonymous = service
            .hall_of_fame(HallKind::Fame, Viewer::Anonymous)
            .await
            .unwrap();
        let signed_in = service
            .hall_of_fame(HallKind::Fame, Viewer::Authenticated)
            .await
            .unwrap();

        assert_eq!(anonymous.entries.len(), 1);
        assert_eq!(anonymous.entries[0].person_id, ana.id);
        assert_eq!(signed_in.entries.len(), 2);

        Ok(())
    }
}

mod team_achievements {
    use super::*;

    /// Expect champion and last place entries following each season's flags
    #[tokio::test]
    async fn lists_first_and_last_finishes() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_season("league", 2)
            .with_season("league", 2)
            .build()
            .await?;
        let first = test.season(0).clone();
        let second = test.season(1).clone();
        // Team 1 of the first season finishes last in the second one
        test.fixtures()
            .insert_mock_standing(second.season.id, first.teams[0].id, 0, -3)
            .await?;
        test.fixtures()
            .insert_mock_standing(second.season.id, second.teams[0].id, 3, 3)
            .await?;
        test.fixtures()
            .update_mock_season(second.season.clone(), "completed", true, 1)
            .await?;
        complete_season(&test, &first, &[3, 0], true, 5).await?;
        let service = RankingService::new(&test.db);

        let result = service
            .team_achievements(first.teams[0].id, Viewer::Anonymous)
            .await
            .unwrap();

        let kinds: Vec<(i32, AchievementKind, &str)> = result
            .achievements
            .iter()
            .map(|a| (a.season_id, a.kind, a.label.as_str()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (first.season.id, AchievementKind::Champion, "Champion"),
                (second.season.id, AchievementKind::LastPlace, "Last Place"),
            ]
        );

        Ok(())
    }

    /// Expect a private team to be hidden from anonymous viewers only
    #[tokio::test]
    async fn private_team_requires_authentication() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let team = test
            .fixtures()
            .set_team_private(test.season(0).teams[0].clone(), true)
            .await?;
        let service = RankingService::new(&test.db);

        let anonymous = service.team_achievements(team.id, Viewer::Anonymous).await;
        let authenticated = service
            .team_achievements(team.id, Viewer::Authenticated)
            .await
            .unwrap();

        assert!(matches!(
            anonymous,
            Err(Error::TeamError(TeamError::NotFound(id))) if id == team.id
        ));
        assert_eq!(authenticated.team_id, team.id);

        Ok(())
    }

    /// Expect NotFound for an unknown team
    #[tokio::test]
    async fn unknown_team() -> Result<(), TestError> {
        let test = test_setup_with_tournament_tables!()?;
        let service = RankingService::new(&test.db);

        let result = service.team_achievements(31, Viewer::Authenticated).await;

        assert!(matches!(
            result,
            Err(Error::TeamError(TeamError::NotFound(31)))
        ));

        Ok(())
    }
}
