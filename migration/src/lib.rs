pub use sea_orm_migration::prelude::*;

mod m20251101_000001_tournament;
mod m20251101_000002_season;
mod m20251101_000003_team;
mod m20251101_000004_person;
mod m20251101_000005_team_member;
mod m20251101_000006_season_team;
mod m20251101_000007_season_match;
mod m20251101_000008_standing;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_tournament::Migration),
            Box::new(m20251101_000002_season::Migration),
            Box::new(m20251101_000003_team::Migration),
            Box::new(m20251101_000004_person::Migration),
            Box::new(m20251101_000005_team_member::Migration),
            Box::new(m20251101_000006_season_team::Migration),
            Box::new(m20251101_000007_season_match::Migration),
            Box::new(m20251101_000008_standing::Migration),
        ]
    }
}
