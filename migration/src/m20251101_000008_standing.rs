use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000002_season::Season, m20251101_000003_team::Team};

static FK_STANDING_SEASON_ID: &str = "fk-standing-season_id";
static FK_STANDING_TEAM_ID: &str = "fk-standing-team_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The composite primary key keeps one standing per team per season
        manager
            .create_table(
                Table::create()
                    .table(Standing::Table)
                    .if_not_exists()
                    .col(integer(Standing::SeasonId))
                    .col(integer(Standing::TeamId))
                    .col(integer(Standing::Played).default(0))
                    .col(integer(Standing::Won).default(0))
                    .col(integer(Standing::Drawn).default(0))
                    .col(integer(Standing::Lost).default(0))
                    .col(integer(Standing::GoalsFor).default(0))
                    .col(integer(Standing::GoalsAgainst).default(0))
                    .col(integer(Standing::GoalDifference).default(0))
                    .col(integer(Standing::Points).default(0))
                    .col(timestamp(Standing::UpdatedAt))
                    .primary_key(
                        Index::create()
                            .col(Standing::SeasonId)
                            .col(Standing::TeamId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_STANDING_SEASON_ID)
                    .from_tbl(Standing::Table)
                    .from_col(Standing::SeasonId)
                    .to_tbl(Season::Table)
                    .to_col(Season::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_STANDING_TEAM_ID)
                    .from_tbl(Standing::Table)
                    .from_col(Standing::TeamId)
                    .to_tbl(Team::Table)
                    .to_col(Team::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for fk in [FK_STANDING_TEAM_ID, FK_STANDING_SEASON_ID] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(fk)
                        .table(Standing::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Standing::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Standing {
    Table,
    SeasonId,
    TeamId,
    Played,
    Won,
    Drawn,
    Lost,
    GoalsFor,
    GoalsAgainst,
    GoalDifference,
    Points,
    UpdatedAt,
}
