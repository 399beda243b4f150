use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "season_match")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub season_id: i32,
    pub round: i32,
    pub match_number: i32,
    /// `upper` or `lower`, double elimination only
    pub bracket_position: Option<String>,
    pub team1_id: Option<i32>,
    pub team2_id: Option<i32>,
    pub team1_score: Option<i32>,
    pub team2_score: Option<i32>,
    pub winner_id: Option<i32>,
    /// `scheduled`, `in_progress` or `completed`; older rows may hold `ongoing`
    pub status: String,
    pub scheduled_at: Option<DateTime>,
    pub calendar_event_id: Option<String>,
    pub calendar_provider: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::season::Entity",
        from = "Column::SeasonId",
        to = "super::season::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Season,
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::Team1Id",
        to = "super::team::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Team1,
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::Team2Id",
        to = "super::team::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Team2,
}

impl Related<super::season::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Season.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
