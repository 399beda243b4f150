use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::{season::SeasonId, team::TeamId};

pub struct SeasonTeamRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SeasonTeamRepository<'a, C> {
    /// Creates a new instance of [`SeasonTeamRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Teams linked to the season in link order
    pub async fn get_team_ids(&self, season_id: SeasonId) -> Result<Vec<TeamId>, DbErr> {
        Ok(entity::prelude::SeasonTeam::find()
            .filter(entity::season_team::Column::SeasonId.eq(season_id))
            .order_by_asc(entity::season_team::Column::Position)
            .order_by_asc(entity::season_team::Column::TeamId)
            .all(self.db)
            .await?
            .into_iter()
            .map(|link| link.team_id)
            .collect())
    }

    /// Appends links for teams not yet in the season and returns the newly linked ids
    pub async fn link_many(
        &self,
        season_id: SeasonId,
        team_ids: &[TeamId],
    ) -> Result<Vec<TeamId>, DbErr> {
        let existing = entity::prelude::SeasonTeam::find()
            .filter(entity::season_team::Column::SeasonId.eq(season_id))
            .all(self.db)
            .await?;

        let mut next_position = existing.iter().map(|l| l.position).max().unwrap_or(0) + 1;
        let mut linked: Vec<TeamId> = Vec::new();

        for &team_id in team_ids {
            if existing.iter().any(|l| l.team_id == team_id) || linked.contains(&team_id) {
                continue;
            }
            linked.push(team_id);
        }

        if linked.is_empty() {
            return Ok(linked);
        }

        let now = Utc::now().naive_utc();
        let models: Vec<entity::season_team::ActiveModel> = linked
            .iter()
            .map(|&team_id| {
                let position = next_position;
                next_position += 1;

                entity::season_team::ActiveModel {
                    season_id: ActiveValue::Set(season_id),
                    team_id: ActiveValue::Set(team_id),
                    position: ActiveValue::Set(position),
                    created_at: ActiveValue::Set(now),
                }
            })
            .collect();

        entity::prelude::SeasonTeam::insert_many(models)
            .exec_without_returning(self.db)
            .await?;

        Ok(linked)
    }
}
