use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "season")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tournament_id: i32,
    pub name: String,
    /// `league`, `cup` or `double_elimination`
    pub format: String,
    pub points_win: i32,
    pub points_draw: i32,
    pub points_loss: i32,
    /// `none`, `highest` or `lowest`
    pub priority_mode: String,
    /// `draft`, `active` or `completed`
    pub status: String,
    pub show_champion: bool,
    pub show_loser: bool,
    pub champion_label: String,
    pub loser_label: String,
    /// Bumped by every schedule or standings write, compared before writing
    pub revision: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tournament::Entity",
        from = "Column::TournamentId",
        to = "super::tournament::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Tournament,
    #[sea_orm(has_many = "super::season_match::Entity")]
    SeasonMatch,
    #[sea_orm(has_many = "super::season_team::Entity")]
    SeasonTeam,
    #[sea_orm(has_many = "super::standing::Entity")]
    Standing,
}

impl Related<super::tournament::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tournament.def()
    }
}

impl Related<super::season_match::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeasonMatch.def()
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
