use sea_orm::{
    sea_query::Expr, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::{
        season::{Season, SeasonId},
        tournament::TournamentId,
    },
    server::data::decode_err,
};

pub struct SeasonRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SeasonRepository<'a, C> {
    /// Creates a new instance of [`SeasonRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets a season along with its current revision
    pub async fn get(&self, season_id: SeasonId) -> Result<Option<(Season, i32)>, DbErr> {
        let Some(model) = entity::prelude::Season::find_by_id(season_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let revision = model.revision;

        Ok(Some((to_season(model)?, revision)))
    }

    /// Seasons of a tournament, oldest first
    pub async fn get_by_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Vec<Season>, DbErr> {
        entity::prelude::Season::find()
            .filter(entity::season::Column::TournamentId.eq(tournament_id))
            .order_by_asc(entity::season::Column::CreatedAt)
            .order_by_asc(entity::season::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(to_season)
            .collect()
    }

    pub async fn get_all(&self) -> Result<Vec<Season>, DbErr> {
        entity::prelude::Season::find()
            .order_by_asc(entity::season::Column::CreatedAt)
            .order_by_asc(entity::season::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(to_season)
            .collect()
    }

    /// Bumps the season's revision if it still equals `revision`
    ///
    /// # Returns
    /// - `Ok(true)` - The revision matched and is now `revision + 1`
    /// - `Ok(false)` - Another writer moved the revision first, or the season is gone
    pub async fn bump_revision(&self, season_id: SeasonId, revision: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Season::update_many()
            .col_expr(entity::season::Column::Revision, Expr::value(revision + 1))
            .filter(entity::season::Column::Id.eq(season_id))
            .filter(entity::season::Column::Revision.eq(revision))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}

pub(crate) fn to_season(model: entity::season::Model) -> Result<Season, DbErr> {
    Ok(Season {
        id: model.id,
        tournament_id: model.tournament_id,
        name: model.name,
        format: model.format.parse().map_err(decode_err)?,
        points_win: model.points_win,
        points_draw: model.points_draw,
        points_loss: model.points_loss,
        priority_mode: model.priority_mode.parse().map_err(decode_err)?,
        status: model.status.parse().map_err(decode_err)?,
        show_champion: model.show_champion,
        show_loser: model.show_loser,
        champion_label: model.champion_label,
        loser_label: model.loser_label,
        created_at: model.created_at.and_utc(),
    })
}
