use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tournament::Table)
                    .if_not_exists()
                    .col(pk_auto(Tournament::Id))
                    .col(string(Tournament::Name))
                    .col(boolean(Tournament::IsPrivate).default(false))
                    .col(boolean(Tournament::ShowChampion).default(true))
                    .col(boolean(Tournament::ShowLoser).default(false))
                    .col(string(Tournament::ChampionLabel).default("Champion"))
                    .col(string(Tournament::LoserLabel).default("Last Place"))
                    .col(string_null(Tournament::OwnerId))
                    .col(timestamp(Tournament::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tournament::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Tournament {
    Table,
    Id,
    Name,
    IsPrivate,
    ShowChampion,
    ShowLoser,
    ChampionLabel,
    LoserLabel,
    OwnerId,
    CreatedAt,
}
