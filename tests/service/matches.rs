use chrono::{TimeZone, Utc};
use tourney::{
    engine::{lifecycle::MatchPatch, ValidationError},
    model::{api::CalendarOutcome, matches::MatchStatus},
    server::{
        data::matches::MatchRepository,
        error::{matches::MatchError, Error},
        service::matches::MatchService,
    },
};

use super::*;
use crate::util::VanishingMatchCalendar;

mod update_match {
    use super::*;

    /// Expect completing a league match to recompute standings
    #[tokio::test]
    async fn completing_league_match_updates_standings() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        let m = test
            .fixtures()
            .insert_mock_match(fixture.season.id, 1, Some(ids[0]), Some(ids[1]))
            .await?;
        let service = MatchService::new(&test.db, None, 120);

        let report = service
            .update_match(m.id, MatchPatch::result(MatchStatus::Completed, 3, 1))
            .await
            .unwrap();

        assert_eq!(report.updated.winner_id, Some(ids[0]));
        assert_eq!(report.calendar, CalendarOutcome::Disabled);

        let standings = test.fixtures().get_standings(fixture.season.id).await?;
        let winner = standings.iter().find(|s| s.team_id == ids[0]).unwrap();
        let loser = standings.iter().find(|s| s.team_id == ids[1]).unwrap();
        assert_eq!((winner.points, winner.goal_difference), (3, 2));
        assert_eq!((loser.points, loser.lost), (0, 1));

        Ok(())
    }

    /// Expect reopening a completed match to remove it from the standings
    #[tokio::test]
    async fn reopening_match_reverts_standings() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        let m = test
            .fixtures()
            .insert_mock_match(fixture.season.id, 1, Some(ids[0]), Some(ids[1]))
            .await?;
        let service = MatchService::new(&test.db, None, 120);

        service
            .update_match(m.id, MatchPatch::result(MatchStatus::Completed, 1, 0))
            .await
            .unwrap();
        let report = service
            .update_match(m.id, MatchPatch::status(MatchStatus::Scheduled))
            .await
            .unwrap();

        assert_eq!(report.updated.team1_score, None);
        assert_eq!(report.updated.winner_id, None);
        let standings = test.fixtures().get_standings(fixture.season.id).await?;
        assert_eq!(standings.len(), 2);
        assert!(standings.iter().all(|s| s.played == 0 && s.points == 0));

        Ok(())
    }

    /// Expect cup matches to leave standings alone
    #[tokio::test]
    async fn cup_match_skips_standings() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("cup", 2).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        let m = test
            .fixtures()
            .insert_mock_match(fixture.season.id, 1, Some(ids[0]), Some(ids[1]))
            .await?;
        let service = MatchService::new(&test.db, None, 120);

        service
            .update_match(m.id, MatchPatch::result(MatchStatus::Completed, 1, 0))
            .await
            .unwrap();

        assert!(test
            .fixtures()
            .get_standings(fixture.season.id)
            .await?
            .is_empty());

        Ok(())
    }

    /// Expect scores on a scheduled match to be rejected without writing anything
    #[tokio::test]
    async fn rejects_score_while_scheduled() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        let m = test
            .fixtures()
            .insert_mock_match(fixture.season.id, 1, Some(ids[0]), Some(ids[1]))
            .await?;
        let service = MatchService::new(&test.db, None, 120);

        let result = service
            .update_match(m.id, MatchPatch::result(MatchStatus::Scheduled, 1, 0))
            .await;

        assert!(matches!(
            result,
            Err(Error::ValidationError(ValidationError::ScoreWhileScheduled))
        ));
        let stored = MatchRepository::new(&test.db).get(m.id).await?.unwrap();
        assert_eq!(stored.team1_score, None);

        Ok(())
    }

    /// Expect NotFound for an unknown match
    #[tokio::test]
    async fn unknown_match() -> Result<(), TestError> {
        let test = test_setup_with_tournament_tables!()?;
        let service = MatchService::new(&test.db, None, 120);

        let result = service
            .update_match(7, MatchPatch::status(MatchStatus::InProgress))
            .await;

        assert!(matches!(
            result,
            Err(Error::MatchError(MatchError::NotFound(7)))
        ));

        Ok(())
    }

    /// Expect an empty patch to change nothing and skip the calendar
    #[tokio::test]
    async fn empty_patch_is_noop() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        let m = test
            .fixtures()
            .insert_mock_match(fixture.season.id, 1, Some(ids[0]), Some(ids[1]))
            .await?;
        let calendar = TestCalendar::default();
        let service = MatchService::new(&test.db, Some(&calendar), 120);

        let report = service
            .update_match(m.id, MatchPatch::default())
            .await
            .unwrap();

        assert_eq!(report.calendar, CalendarOutcome::NotRequired);
        assert!(calendar.0.calls().is_empty());

        Ok(())
    }

    /// Expect scheduling a match to create a calendar event and store its reference
    #[tokio::test]
    async fn scheduling_creates_event() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        let m = test
            .fixtures()
            .insert_mock_match(fixture.season.id, 1, Some(ids[0]), Some(ids[1]))
            .await?;
        let calendar = TestCalendar::default();
        let service = MatchService::new(&test.db, Some(&calendar), 120);
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap();

        let report = service
            .update_match(
                m.id,
                MatchPatch {
                    scheduled_at: Some(Some(at)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(
            report.calendar,
            CalendarOutcome::Synced {
                event_id: "event-1".to_string()
            }
        );
        assert_eq!(
            calendar.0.calls(),
            vec![CalendarCall::Create {
                summary: "Test Cup - Season 1: Team 1 vs Team 2".to_string()
            }]
        );

        let stored = MatchRepository::new(&test.db).get(m.id).await?.unwrap();
        assert_eq!(stored.scheduled_at, Some(at));
        assert_eq!(stored.calendar_event_id.as_deref(), Some("event-1"));
        assert_eq!(stored.calendar_provider.as_deref(), Some(MockCalendar::PROVIDER));

        Ok(())
    }

    /// Expect rescheduling to update the existing event instead of creating another
    #[tokio::test]
    async fn rescheduling_updates_event() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        let m = test
            .fixtures()
            .insert_mock_match(fixture.season.id, 1, Some(ids[0]), Some(ids[1]))
            .await?;
        let calendar = TestCalendar::default();
        let service = MatchService::new(&test.db, Some(&calendar), 120);
        let first = Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2025, 6, 2, 18, 0, 0).unwrap();

        for at in [first, second] {
            service
                .update_match(
                    m.id,
                    MatchPatch {
                        scheduled_at: Some(Some(at)),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
        }

        let calls = calendar.0.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(
            &calls[1],
            CalendarCall::Update { event_id, .. } if event_id == "event-1"
        ));

        Ok(())
    }

    /// Expect clearing the schedule to delete the event and its reference
    #[tokio::test]
    async fn unscheduling_removes_event() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        let m = test
            .fixtures()
            .insert_mock_match(fixture.season.id, 1, Some(ids[0]), Some(ids[1]))
            .await?;
        let calendar = TestCalendar::default();
        let service = MatchService::new(&test.db, Some(&calendar), 120);

        service
            .update_match(
                m.id,
                MatchPatch {
                    scheduled_at: Some(Some(Utc::now())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let report = service
            .update_match(
                m.id,
                MatchPatch {
                    scheduled_at: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(report.calendar, CalendarOutcome::Removed);
        assert_eq!(
            calendar.0.calls().last(),
            Some(&CalendarCall::Delete {
                event_id: "event-1".to_string()
            })
        );
        let stored = MatchRepository::new(&test.db).get(m.id).await?.unwrap();
        assert_eq!(stored.calendar_event_id, None);
        assert_eq!(stored.scheduled_at, None);

        Ok(())
    }

    /// Expect a failing calendar to degrade the result without failing the update
    #[tokio::test]
    async fn calendar_failure_is_degraded_success() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        let m = test
            .fixtures()
            .insert_mock_match(fixture.season.id, 1, Some(ids[0]), Some(ids[1]))
            .await?;
        let calendar = TestCalendar(MockCalendar::failing());
        let service = MatchService::new(&test.db, Some(&calendar), 120);
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap();

        let report = service
            .update_match(
                m.id,
                MatchPatch {
                    scheduled_at: Some(Some(at)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(report.calendar.is_degraded());
        let stored = MatchRepository::new(&test.db).get(m.id).await?.unwrap();
        assert_eq!(stored.scheduled_at, Some(at));
        assert_eq!(stored.calendar_event_id, None);

        Ok(())
    }

    /// Expect a database failure while storing the event reference to degrade the result
    /// rather than fail an update that was already committed
    #[tokio::test]
    async fn calendar_storage_failure_is_degraded_success() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        let m = test
            .fixtures()
            .insert_mock_match(fixture.season.id, 1, Some(ids[0]), Some(ids[1]))
            .await?;
        let calendar = VanishingMatchCalendar {
            inner: TestCalendar::default(),
            db: test.db.clone(),
            summary: "Test Cup - Season 1: Team 1 vs Team 2".to_string(),
            match_id: m.id,
        };
        let service = MatchService::new(&test.db, Some(&calendar), 120);
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap();

        let report = service
            .update_match(
                m.id,
                MatchPatch {
                    scheduled_at: Some(Some(at)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(matches!(report.calendar, CalendarOutcome::Failed { .. }));
        assert_eq!(report.updated.scheduled_at, Some(at));
        assert_eq!(
            calendar.inner.0.calls().last(),
            Some(&CalendarCall::Delete {
                event_id: "event-1".to_string()
            })
        );

        Ok(())
    }

    /// Expect concurrent results in one league season to both reach the standings
    #[tokio::test]
    async fn concurrent_results_both_reach_standings() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 3).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        let first = test
            .fixtures()
            .insert_mock_match(fixture.season.id, 1, Some(ids[0]), Some(ids[1]))
            .await?;
        let second = test
            .fixtures()
            .insert_mock_match(fixture.season.id, 2, Some(ids[0]), Some(ids[2]))
            .await?;
        let service = MatchService::new(&test.db, None, 120);

        let (a, b) = tokio::join!(
            service.update_match(first.id, MatchPatch::result(MatchStatus::Completed, 2, 0)),
            service.update_match(second.id, MatchPatch::result(MatchStatus::Completed, 1, 0))
        );
        a.unwrap();
        b.unwrap();

        let standings = test.fixtures().get_standings(fixture.season.id).await?;
        let leader = standings.iter().find(|s| s.team_id == ids[0]).unwrap();
        assert_eq!((leader.played, leader.points, leader.goal_difference), (2, 6, 3));
        assert_eq!(standings.iter().map(|s| s.played).sum::<i32>(), 4);

        Ok(())
    }
}

mod delete_match {
    use super::*;

    /// Expect deleting a completed league match to remove its result from the standings
    #[tokio::test]
    async fn recomputes_standings() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        let m = test
            .fixtures()
            .insert_completed_match(fixture.season.id, 1, (ids[0], ids[1]), (2, 0))
            .await?;
        let service = MatchService::new(&test.db, None, 120);

        let report = service.delete_match(m.id).await.unwrap();

        assert_eq!(report.match_id, m.id);
        assert_eq!(report.calendar, CalendarOutcome::NotRequired);
        assert!(test.fixtures().get_matches(fixture.season.id).await?.is_empty());
        let standings = test.fixtures().get_standings(fixture.season.id).await?;
        assert!(standings.iter().all(|s| s.played == 0));

        Ok(())
    }

    /// Expect the calendar event to be removed along with the match
    #[tokio::test]
    async fn removes_calendar_event() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("cup", 2).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        let m = test
            .fixtures()
            .insert_mock_match(fixture.season.id, 1, Some(ids[0]), Some(ids[1]))
            .await?;
        MatchRepository::new(&test.db)
            .set_calendar_event(m.id, Some(("event-3", "mock")))
            .await?;
        let calendar = TestCalendar::default();
        let service = MatchService::new(&test.db, Some(&calendar), 120);

        let report = service.delete_match(m.id).await.unwrap();

        assert_eq!(report.calendar, CalendarOutcome::Removed);
        assert_eq!(
            calendar.0.calls(),
            vec![CalendarCall::Delete {
                event_id: "event-3".to_string()
            }]
        );

        Ok(())
    }

    /// Expect NotFound for an unknown match
    #[tokio::test]
    async fn unknown_match() -> Result<(), TestError> {
        let test = test_setup_with_tournament_tables!()?;
        let service = MatchService::new(&test.db, None, 120);

        let result = service.delete_match(3).await;

        assert!(matches!(
            result,
            Err(Error::MatchError(MatchError::NotFound(3)))
        ));

        Ok(())
    }
}
