use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000002_season::Season, m20251101_000003_team::Team};

static IDX_SEASON_TEAM_TEAM_ID: &str = "idx-season_team-team_id";
static FK_SEASON_TEAM_SEASON_ID: &str = "fk-season_team-season_id";
static FK_SEASON_TEAM_TEAM_ID: &str = "fk-season_team-team_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SeasonTeam::Table)
                    .if_not_exists()
                    .col(integer(SeasonTeam::SeasonId))
                    .col(integer(SeasonTeam::TeamId))
                    .col(integer(SeasonTeam::Position))
                    .col(timestamp(SeasonTeam::CreatedAt))
                    .primary_key(
                        Index::create()
                            .col(SeasonTeam::SeasonId)
                            .col(SeasonTeam::TeamId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SEASON_TEAM_TEAM_ID)
                    .table(SeasonTeam::Table)
                    .col(SeasonTeam::TeamId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SEASON_TEAM_SEASON_ID)
                    .from_tbl(SeasonTeam::Table)
                    .from_col(SeasonTeam::SeasonId)
                    .to_tbl(Season::Table)
                    .to_col(Season::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SEASON_TEAM_TEAM_ID)
                    .from_tbl(SeasonTeam::Table)
                    .from_col(SeasonTeam::TeamId)
                    .to_tbl(Team::Table)
                    .to_col(Team::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for fk in [FK_SEASON_TEAM_TEAM_ID, FK_SEASON_TEAM_SEASON_ID] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(fk)
                        .table(SeasonTeam::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SEASON_TEAM_TEAM_ID)
                    .table(SeasonTeam::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SeasonTeam::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum SeasonTeam {
    Table,
    SeasonId,
    TeamId,
    Position,
    CreatedAt,
}
