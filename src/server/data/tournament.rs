use sea_orm::{ConnectionTrait, DbErr, EntityTrait};

use crate::model::tournament::{Tournament, TournamentId};

pub struct TournamentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TournamentRepository<'a, C> {
    /// Creates a new instance of [`TournamentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get(&self, tournament_id: TournamentId) -> Result<Option<Tournament>, DbErr> {
        Ok(entity::prelude::Tournament::find_by_id(tournament_id)
            .one(self.db)
            .await?
            .map(to_tournament))
    }
}

fn to_tournament(model: entity::tournament::Model) -> Tournament {
    Tournament {
        id: model.id,
        name: model.name,
        is_private: model.is_private,
        show_champion: model.show_champion,
        show_loser: model.show_loser,
        champion_label: model.champion_label,
        loser_label: model.loser_label,
        owner_id: model.owner_id,
        created_at: model.created_at.and_utc(),
    }
}
