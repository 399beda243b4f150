//! Test context structure and utilities.
//!
//! The context returned by [`TestBuilder`](crate::TestBuilder) owns an in-memory SQLite database.
//! SQLite in memory is a single connection: inside a transaction every query must go through
//! the transaction handle.

use sea_orm::{
    sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection, DbBackend,
    Schema,
};

use crate::{error::TestError, fixtures::SeasonFixture};

pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
    /// Seasons queued with [`TestBuilder::with_season`](crate::TestBuilder::with_season), in
    /// declaration order
    pub seasons: Vec<SeasonFixture>,
}

impl TestContext {
    /// Connects a fresh in-memory database without any tables.
    pub async fn new() -> Result<Self, TestError> {
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            db,
            seasons: Vec::new(),
        })
    }

    /// Executes CREATE TABLE statements in order.
    pub async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// The queued season at `index`.
    ///
    /// # Panics
    /// Panics if fewer seasons were queued
    pub fn season(&self, index: usize) -> &SeasonFixture {
        &self.seasons[index]
    }
}

/// CREATE TABLE statements for every tournament table, parents first.
pub fn tournament_tables() -> Vec<TableCreateStatement> {
    let schema = Schema::new(DbBackend::Sqlite);

    vec![
        schema.create_table_from_entity(entity::prelude::Tournament),
        schema.create_table_from_entity(entity::prelude::Season),
        schema.create_table_from_entity(entity::prelude::Team),
        schema.create_table_from_entity(entity::prelude::Person),
        schema.create_table_from_entity(entity::prelude::TeamMember),
        schema.create_table_from_entity(entity::prelude::SeasonTeam),
        schema.create_table_from_entity(entity::prelude::SeasonMatch),
        schema.create_table_from_entity(entity::prelude::Standing),
    ]
}
