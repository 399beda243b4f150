use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000002_season::Season, m20251101_000003_team::Team};

static IDX_SEASON_MATCH_SLOT: &str = "idx-season_match-season_id-bracket_position-round-match_number";
static FK_SEASON_MATCH_SEASON_ID: &str = "fk-season_match-season_id";
static FK_SEASON_MATCH_TEAM1_ID: &str = "fk-season_match-team1_id";
static FK_SEASON_MATCH_TEAM2_ID: &str = "fk-season_match-team2_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SeasonMatch::Table)
                    .if_not_exists()
                    .col(pk_auto(SeasonMatch::Id))
                    .col(integer(SeasonMatch::SeasonId))
                    .col(integer(SeasonMatch::Round))
                    .col(integer(SeasonMatch::MatchNumber))
                    .col(string_len_null(SeasonMatch::BracketPosition, 16))
                    .col(integer_null(SeasonMatch::Team1Id))
                    .col(integer_null(SeasonMatch::Team2Id))
                    .col(integer_null(SeasonMatch::Team1Score))
                    .col(integer_null(SeasonMatch::Team2Score))
                    .col(integer_null(SeasonMatch::WinnerId))
                    .col(string_len(SeasonMatch::Status, 16).default("scheduled"))
                    .col(timestamp_null(SeasonMatch::ScheduledAt))
                    .col(string_null(SeasonMatch::CalendarEventId))
                    .col(string_null(SeasonMatch::CalendarProvider))
                    .col(timestamp(SeasonMatch::CreatedAt))
                    .col(timestamp(SeasonMatch::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // One match per bracket slot; a concurrent duplicate generation fails here
        manager
            .create_index(
                Index::create()
                    .name(IDX_SEASON_MATCH_SLOT)
                    .table(SeasonMatch::Table)
                    .col(SeasonMatch::SeasonId)
                    .col(SeasonMatch::BracketPosition)
                    .col(SeasonMatch::Round)
                    .col(SeasonMatch::MatchNumber)
                    .unique()
                    .nulls_not_distinct()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SEASON_MATCH_SEASON_ID)
                    .from_tbl(SeasonMatch::Table)
                    .from_col(SeasonMatch::SeasonId)
                    .to_tbl(Season::Table)
                    .to_col(Season::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            (FK_SEASON_MATCH_TEAM1_ID, SeasonMatch::Team1Id),
            (FK_SEASON_MATCH_TEAM2_ID, SeasonMatch::Team2Id),
        ] {
            manager
                .create_foreign_key(
                    ForeignKey::create()
                        .name(name)
                        .from_tbl(SeasonMatch::Table)
                        .from_col(column)
                        .to_tbl(Team::Table)
                        .to_col(Team::Id)
                        .on_delete(ForeignKeyAction::SetNull)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for fk in [
            FK_SEASON_MATCH_TEAM2_ID,
            FK_SEASON_MATCH_TEAM1_ID,
            FK_SEASON_MATCH_SEASON_ID,
        ] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(fk)
                        .table(SeasonMatch::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SEASON_MATCH_SLOT)
                    .table(SeasonMatch::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SeasonMatch::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum SeasonMatch {
    Table,
    Id,
    SeasonId,
    Round,
    MatchNumber,
    BracketPosition,
    Team1Id,
    Team2Id,
    Team1Score,
    Team2Score,
    WinnerId,
    Status,
    ScheduledAt,
    CalendarEventId,
    CalendarProvider,
    CreatedAt,
    UpdatedAt,
}
