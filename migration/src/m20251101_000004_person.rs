use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Person::Table)
                    .if_not_exists()
                    .col(pk_auto(Person::Id))
                    .col(string(Person::Name))
                    .col(string_null(Person::Role))
                    .col(string_null(Person::AvatarUrl))
                    .col(string_null(Person::Email))
                    .col(string_null(Person::Whatsapp))
                    .col(boolean(Person::IsPrivate).default(false))
                    .col(string_null(Person::OwnerId))
                    .col(timestamp(Person::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Person::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Person {
    Table,
    Id,
    Name,
    Role,
    AvatarUrl,
    Email,
    Whatsapp,
    IsPrivate,
    OwnerId,
    CreatedAt,
}
