use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "team")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub is_private: bool,
    pub owner_id: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::team_member::Entity")]
    TeamMember,
    #[sea_orm(has_many = "super::season_team::Entity")]
    SeasonTeam,
    #[sea_orm(has_many = "super::standing::Entity")]
    Standing,
}

impl Related<super::team_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamMember.def()
    }
}

impl Related<super::season_team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeasonTeam.def()
    }
}

impl Related<super::standing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Standing.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
