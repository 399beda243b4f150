use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000003_team::Team, m20251101_000004_person::Person};

static IDX_TEAM_MEMBER_PERSON_ID: &str = "idx-team_member-person_id";
static FK_TEAM_MEMBER_TEAM_ID: &str = "fk-team_member-team_id";
static FK_TEAM_MEMBER_PERSON_ID: &str = "fk-team_member-person_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TeamMember::Table)
                    .if_not_exists()
                    .col(integer(TeamMember::TeamId))
                    .col(integer(TeamMember::PersonId))
                    .col(timestamp(TeamMember::CreatedAt))
                    .primary_key(
                        Index::create()
                            .col(TeamMember::TeamId)
                            .col(TeamMember::PersonId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TEAM_MEMBER_PERSON_ID)
                    .table(TeamMember::Table)
                    .col(TeamMember::PersonId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_TEAM_MEMBER_TEAM_ID)
                    .from_tbl(TeamMember::Table)
                    .from_col(TeamMember::TeamId)
                    .to_tbl(Team::Table)
                    .to_col(Team::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_TEAM_MEMBER_PERSON_ID)
                    .from_tbl(TeamMember::Table)
                    .from_col(TeamMember::PersonId)
                    .to_tbl(Person::Table)
                    .to_col(Person::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for fk in [FK_TEAM_MEMBER_PERSON_ID, FK_TEAM_MEMBER_TEAM_ID] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(fk)
                        .table(TeamMember::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TEAM_MEMBER_PERSON_ID)
                    .table(TeamMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TeamMember::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum TeamMember {
    Table,
    TeamId,
    PersonId,
    CreatedAt,
}
