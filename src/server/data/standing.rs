use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::{season::SeasonId, standing::Standing, team::TeamId};

/// Outcome of [`StandingRepository::create_missing`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatedStandings {
    pub created: Vec<TeamId>,
    /// Teams that already had a row; those rows were left untouched
    pub kept: Vec<TeamId>,
}

pub struct StandingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StandingRepository<'a, C> {
    /// Creates a new instance of [`StandingRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Standings of a season in roster order; callers rank them
    pub async fn get_by_season(&self, season_id: SeasonId) -> Result<Vec<Standing>, DbErr> {
        self.get_by_seasons(&[season_id]).await
    }

    /// Standings of the given seasons, grouped by season and in roster order within each
    ///
    /// Rows of teams no longer linked to their season come last, by team id.
    pub async fn get_by_seasons(&self, season_ids: &[SeasonId]) -> Result<Vec<Standing>, DbErr> {
        if season_ids.is_empty() {
            return Ok(Vec::new());
        }

        let positions: HashMap<(SeasonId, TeamId), i32> = entity::prelude::SeasonTeam::find()
            .filter(entity::season_team::Column::SeasonId.is_in(season_ids.iter().copied()))
            .all(self.db)
            .await?
            .into_iter()
            .map(|link| ((link.season_id, link.team_id), link.position))
            .collect();

        let mut standings: Vec<Standing> = entity::prelude::Standing::find()
            .filter(entity::standing::Column::SeasonId.is_in(season_ids.iter().copied()))
            .order_by_asc(entity::standing::Column::SeasonId)
            .order_by_asc(entity::standing::Column::TeamId)
            .all(self.db)
            .await?
            .into_iter()
            .map(to_standing)
            .collect();

        standings.sort_by_key(|s| {
            let position = positions.get(&(s.season_id, s.team_id)).copied();
            (s.season_id, position.is_none(), position, s.team_id)
        });

        Ok(standings)
    }

    /// Inserts rows for teams of the season that have none yet
    ///
    /// Existing rows are never overwritten, their team ids are reported as kept.
    pub async fn create_missing(
        &self,
        season_id: SeasonId,
        standings: &[Standing],
    ) -> Result<CreatedStandings, DbErr> {
        let existing: Vec<TeamId> = entity::prelude::Standing::find()
            .filter(entity::standing::Column::SeasonId.eq(season_id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|s| s.team_id)
            .collect();

        let (kept, missing): (Vec<&Standing>, Vec<&Standing>) = standings
            .iter()
            .filter(|s| s.season_id == season_id)
            .partition(|s| existing.contains(&s.team_id));

        let result = CreatedStandings {
            created: missing.iter().map(|s| s.team_id).collect(),
            kept: kept.iter().map(|s| s.team_id).collect(),
        };

        self.insert(missing).await?;

        Ok(result)
    }

    /// Replaces every row of the season with `standings`
    pub async fn replace_for_season(
        &self,
        season_id: SeasonId,
        standings: &[Standing],
    ) -> Result<(), DbErr> {
        entity::prelude::Standing::delete_many()
            .filter(entity::standing::Column::SeasonId.eq(season_id))
            .exec(self.db)
            .await?;

        self.insert(standings.iter().filter(|s| s.season_id == season_id).collect())
            .await
    }

    async fn insert(&self, standings: Vec<&Standing>) -> Result<(), DbErr> {
        if standings.is_empty() {
            return Ok(());
        }

        let now = Utc::now().naive_utc();
        let models = standings
            .into_iter()
            .map(|s| entity::standing::ActiveModel {
                season_id: ActiveValue::Set(s.season_id),
                team_id: ActiveValue::Set(s.team_id),
                played: ActiveValue::Set(s.played),
                won: ActiveValue::Set(s.won),
                drawn: ActiveValue::Set(s.drawn),
                lost: ActiveValue::Set(s.lost),
                goals_for: ActiveValue::Set(s.goals_for),
                goals_against: ActiveValue::Set(s.goals_against),
                goal_difference: ActiveValue::Set(s.goal_difference),
                points: ActiveValue::Set(s.points),
                updated_at: ActiveValue::Set(now),
            });

        entity::prelude::Standing::insert_many(models)
            .exec_without_returning(self.db)
            .await?;

        Ok(())
    }
}

fn to_standing(model: entity::standing::Model) -> Standing {
    Standing {
        team_id: model.team_id,
        season_id: model.season_id,
        played: model.played,
        won: model.won,
        drawn: model.drawn,
        lost: model.lost,
        goals_for: model.goals_for,
        goals_against: model.goals_against,
        goal_difference: model.goal_difference,
        points: model.points,
    }
}
