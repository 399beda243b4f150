use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};

use crate::{
    engine::standings::{rank, recompute_standings_for},
    model::{
        api::StandingsDto,
        season::{Season, SeasonId},
        standing::Standing,
    },
    server::{
        data::{
            matches::MatchRepository, season::SeasonRepository,
            season_team::SeasonTeamRepository, standing::StandingRepository,
        },
        error::{season::SeasonError, Error},
        service::retry::RetryContext,
    },
};

pub struct StandingsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StandingsService<'a> {
    /// Creates a new instance of [`StandingsService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stored standings of a season, ranked
    pub async fn get(&self, season_id: SeasonId) -> Result<StandingsDto, Error> {
        if SeasonRepository::new(self.db).get(season_id).await?.is_none() {
            return Err(SeasonError::NotFound(season_id).into());
        }

        let standings = StandingRepository::new(self.db)
            .get_by_season(season_id)
            .await?;

        Ok(StandingsDto {
            season_id,
            standings: rank(standings),
        })
    }

    /// Recomputes a season's standings from its completed matches and replaces the stored rows.
    ///
    /// Reading the matches and replacing the rows happen in the same revision-guarded
    /// transaction, so two concurrent recomputations cannot interleave their writes.
    pub async fn recompute(&self, season_id: SeasonId) -> Result<StandingsDto, Error> {
        RetryContext::new()
            .execute_with_retry(
                &format!("standings recomputation for season {}", season_id),
                || self.try_recompute(season_id),
            )
            .await
    }

    async fn try_recompute(&self, season_id: SeasonId) -> Result<StandingsDto, Error> {
        let (season, revision) = SeasonRepository::new(self.db)
            .get(season_id)
            .await?
            .ok_or(SeasonError::NotFound(season_id))?;

        let txn = self.db.begin().await?;

        if !SeasonRepository::new(&txn)
            .bump_revision(season_id, revision)
            .await?
        {
            return Err(SeasonError::StaleRevision {
                season_id,
                revision,
            }
            .into());
        }

        let standings = replace_standings(&txn, &season).await?;

        txn.commit().await?;

        Ok(StandingsDto {
            season_id,
            standings: rank(standings),
        })
    }
}

/// Recomputes the standings of `season` from its completed matches and replaces the stored
/// rows, all through `db`. Callers pass an open transaction guarded by the season revision.
pub(crate) async fn replace_standings<C: ConnectionTrait>(
    db: &C,
    season: &Season,
) -> Result<Vec<Standing>, DbErr> {
    let teams = SeasonTeamRepository::new(db).get_team_ids(season.id).await?;
    let completed = MatchRepository::new(db)
        .get_completed_by_season(season.id)
        .await?;

    let standings = recompute_standings_for(season.id, &teams, &completed, season.points());

    StandingRepository::new(db)
        .replace_for_season(season.id, &standings)
        .await?;

    tracing::debug!(
        season_id = %season.id,
        completed = completed.len(),
        "Recomputed standings"
    );

    Ok(standings)
}
