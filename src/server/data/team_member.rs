use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::{
    person::PersonId,
    team::{TeamId, TeamMembership},
};

pub struct TeamMemberRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TeamMemberRepository<'a, C> {
    /// Creates a new instance of [`TeamMemberRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Every membership in roster order
    pub async fn get_all(&self) -> Result<Vec<TeamMembership>, DbErr> {
        Ok(entity::prelude::TeamMember::find()
            .order_by_asc(entity::team_member::Column::TeamId)
            .order_by_asc(entity::team_member::Column::CreatedAt)
            .order_by_asc(entity::team_member::Column::PersonId)
            .all(self.db)
            .await?
            .into_iter()
            .map(to_membership)
            .collect())
    }

    /// Memberships of the given teams, grouped in the order of `team_ids`, each in roster order
    pub async fn get_by_teams(&self, team_ids: &[TeamId]) -> Result<Vec<TeamMembership>, DbErr> {
        if team_ids.is_empty() {
            return Ok(Vec::new());
        }

        let memberships: Vec<TeamMembership> = entity::prelude::TeamMember::find()
            .filter(entity::team_member::Column::TeamId.is_in(team_ids.iter().copied()))
            .order_by_asc(entity::team_member::Column::CreatedAt)
            .order_by_asc(entity::team_member::Column::PersonId)
            .all(self.db)
            .await?
            .into_iter()
            .map(to_membership)
            .collect();

        let mut seen = Vec::with_capacity(team_ids.len());
        Ok(team_ids
            .iter()
            .filter(|id| {
                let first = !seen.contains(*id);
                seen.push(**id);
                first
            })
            .flat_map(|&team_id| memberships.iter().filter(move |m| m.team_id == team_id))
            .cloned()
            .collect())
    }

    /// Adds members to a team in the given order
    pub async fn add_many(&self, team_id: TeamId, person_ids: &[PersonId]) -> Result<(), DbErr> {
        if person_ids.is_empty() {
            return Ok(());
        }

        let now = Utc::now().naive_utc();
        let models = person_ids
            .iter()
            .enumerate()
            .map(|(offset, &person_id)| entity::team_member::ActiveModel {
                team_id: ActiveValue::Set(team_id),
                person_id: ActiveValue::Set(person_id),
                // Roster order follows insertion order
                created_at: ActiveValue::Set(now + chrono::Duration::milliseconds(offset as i64)),
            });

        entity::prelude::TeamMember::insert_many(models)
            .exec_without_returning(self.db)
            .await?;

        Ok(())
    }
}

fn to_membership(model: entity::team_member::Model) -> TeamMembership {
    TeamMembership {
        team_id: model.team_id,
        person_id: model.person_id,
        created_at: model.created_at.and_utc(),
    }
}
