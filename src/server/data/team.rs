use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::model::team::{Team, TeamId};

pub struct TeamRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TeamRepository<'a, C> {
    /// Creates a new instance of [`TeamRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a public team without images
    pub async fn create(&self, name: &str, owner_id: Option<&str>) -> Result<Team, DbErr> {
        let model = entity::team::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            logo_url: ActiveValue::Set(None),
            banner_url: ActiveValue::Set(None),
            is_private: ActiveValue::Set(false),
            owner_id: ActiveValue::Set(owner_id.map(str::to_string)),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(to_team(model))
    }

    pub async fn get(&self, team_id: TeamId) -> Result<Option<Team>, DbErr> {
        Ok(entity::prelude::Team::find_by_id(team_id)
            .one(self.db)
            .await?
            .map(to_team))
    }

    /// Teams with the given ids ordered by id; unknown ids are skipped
    pub async fn get_many(&self, team_ids: &[TeamId]) -> Result<Vec<Team>, DbErr> {
        if team_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(entity::prelude::Team::find()
            .filter(entity::team::Column::Id.is_in(team_ids.iter().copied()))
            .order_by_asc(entity::team::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(to_team)
            .collect())
    }

    pub async fn get_all(&self) -> Result<Vec<Team>, DbErr> {
        Ok(entity::prelude::Team::find()
            .order_by_asc(entity::team::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(to_team)
            .collect())
    }
}

fn to_team(model: entity::team::Model) -> Team {
    Team {
        id: model.id,
        name: model.name,
        logo_url: model.logo_url,
        banner_url: model.banner_url,
        is_private: model.is_private,
        owner_id: model.owner_id,
    }
}
