use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::model::person::{Person, PersonId};

pub struct PersonRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PersonRepository<'a, C> {
    /// Creates a new instance of [`PersonRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// People with the given ids ordered by id; unknown ids are skipped
    pub async fn get_many(&self, person_ids: &[PersonId]) -> Result<Vec<Person>, DbErr> {
        if person_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(entity::prelude::Person::find()
            .filter(entity::person::Column::Id.is_in(person_ids.iter().copied()))
            .order_by_asc(entity::person::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(to_person)
            .collect())
    }

    pub async fn get_all(&self) -> Result<Vec<Person>, DbErr> {
        Ok(entity::prelude::Person::find()
            .order_by_asc(entity::person::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(to_person)
            .collect())
    }
}

fn to_person(model: entity::person::Model) -> Person {
    Person {
        id: model.id,
        name: model.name,
        role: model.role,
        avatar_url: model.avatar_url,
        email: model.email,
        whatsapp: model.whatsapp,
        is_private: model.is_private,
        owner_id: model.owner_id,
    }
}
