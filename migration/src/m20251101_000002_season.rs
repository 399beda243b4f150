use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_tournament::Tournament;

static IDX_SEASON_TOURNAMENT_ID: &str = "idx-season-tournament_id";
static FK_SEASON_TOURNAMENT_ID: &str = "fk-season-tournament_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Season::Table)
                    .if_not_exists()
                    .col(pk_auto(Season::Id))
                    .col(integer(Season::TournamentId))
                    .col(string(Season::Name))
                    .col(string_len(Season::Format, 32))
                    .col(integer(Season::PointsWin).default(3))
                    .col(integer(Season::PointsDraw).default(1))
                    .col(integer(Season::PointsLoss).default(0))
                    .col(string_len(Season::PriorityMode, 16).default("none"))
                    .col(string_len(Season::Status, 16).default("draft"))
                    .col(boolean(Season::ShowChampion).default(true))
                    .col(boolean(Season::ShowLoser).default(false))
                    .col(string(Season::ChampionLabel).default("Champion"))
                    .col(string(Season::LoserLabel).default("Last Place"))
                    .col(integer(Season::Revision).default(0))
                    .col(timestamp(Season::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SEASON_TOURNAMENT_ID)
                    .table(Season::Table)
                    .col(Season::TournamentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SEASON_TOURNAMENT_ID)
                    .from_tbl(Season::Table)
                    .from_col(Season::TournamentId)
                    .to_tbl(Tournament::Table)
                    .to_col(Tournament::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_SEASON_TOURNAMENT_ID)
                    .table(Season::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SEASON_TOURNAMENT_ID)
                    .table(Season::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Season::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Season {
    Table,
    Id,
    TournamentId,
    Name,
    Format,
    PointsWin,
    PointsDraw,
    PointsLoss,
    PriorityMode,
    Status,
    ShowChampion,
    ShowLoser,
    ChampionLabel,
    LoserLabel,
    Revision,
    CreatedAt,
}
