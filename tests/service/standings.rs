use tourney::server::{
    error::{season::SeasonError, Error},
    service::standings::StandingsService,
};

use super::*;

mod recompute {
    use super::*;

    /// Expect stored rows to be replaced by the aggregation of completed matches
    #[tokio::test]
    async fn replaces_stale_rows() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 3).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        let season_id = fixture.season.id;
        test.fixtures()
            .insert_mock_standing(season_id, ids[2], 99, 50)
            .await?;
        test.fixtures()
            .insert_completed_match(season_id, 1, (ids[0], ids[1]), (1, 1))
            .await?;
        test.fixtures()
            .insert_completed_match(season_id, 2, (ids[1], ids[2]), (2, 0))
            .await?;
        let service = StandingsService::new(&test.db);

        let result = service.recompute(season_id).await.unwrap();

        let ranked: Vec<(i32, i32)> = result
            .standings
            .iter()
            .map(|s| (s.team_id, s.points))
            .collect();
        assert_eq!(ranked, vec![(ids[1], 4), (ids[0], 1), (ids[2], 0)]);
        assert_eq!(test.fixtures().get_standings(season_id).await?.len(), 3);

        Ok(())
    }

    /// Expect recomputing twice to yield the same rows
    #[tokio::test]
    async fn is_idempotent() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        test.fixtures()
            .insert_completed_match(fixture.season.id, 1, (ids[0], ids[1]), (0, 2))
            .await?;
        let service = StandingsService::new(&test.db);

        let first = service.recompute(fixture.season.id).await.unwrap();
        let second = service.recompute(fixture.season.id).await.unwrap();

        assert_eq!(first.standings, second.standings);

        Ok(())
    }

    /// Expect concurrent recomputations to both succeed with one consistent table
    #[tokio::test]
    async fn concurrent_recomputations_agree() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 2).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        test.fixtures()
            .insert_completed_match(fixture.season.id, 1, (ids[0], ids[1]), (3, 0))
            .await?;
        let first = StandingsService::new(&test.db);
        let second = StandingsService::new(&test.db);

        let (a, b) = tokio::join!(
            first.recompute(fixture.season.id),
            second.recompute(fixture.season.id)
        );

        assert_eq!(a.unwrap().standings, b.unwrap().standings);
        assert_eq!(
            test.fixtures()
                .get_standings(fixture.season.id)
                .await?
                .len(),
            2
        );

        Ok(())
    }
}

mod get {
    use super::*;

    /// Expect stored standings ranked by points, then goal difference
    #[tokio::test]
    async fn ranks_stored_rows() -> Result<(), TestError> {
        let test = TestBuilder::new().with_season("league", 3).build().await?;
        let fixture = test.season(0);
        let ids = fixture.team_ids();
        let season_id = fixture.season.id;
        test.fixtures().insert_mock_standing(season_id, ids[0], 3, 1).await?;
        test.fixtures().insert_mock_standing(season_id, ids[1], 3, 4).await?;
        test.fixtures().insert_mock_standing(season_id, ids[2], 6, -2).await?;
        let service = StandingsService::new(&test.db);

        let result = service.get(season_id).await.unwrap();

        let order: Vec<i32> = result.standings.iter().map(|s| s.team_id).collect();
        assert_eq!(order, vec![ids[2], ids[1], ids[0]]);

        Ok(())
    }

    /// Expect NotFound for an unknown season
    #[tokio::test]
    async fn unknown_season() -> Result<(), TestError> {
        let test = test_setup_with_tournament_tables!()?;
        let service = StandingsService::new(&test.db);

        let result = service.get(9).await;

        assert!(matches!(
            result,
            Err(Error::SeasonError(SeasonError::NotFound(9)))
        ));

        Ok(())
    }
}
