//! Declarative test builder.
//!
//! Configuration methods only queue work; everything is applied in order by `build()`.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::tournament_tables, error::TestError, TestContext};

/// Builder for declarative test initialization.
#[derive(Default)]
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_tournament_tables: bool,
    // (format, team count)
    seasons: Vec<(String, usize)>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates every tournament table before any custom table.
    pub fn with_tournament_tables(mut self) -> Self {
        self.include_tournament_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// ```no_run
    /// use tourney_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), tourney_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Team)
    ///     .with_table(Person)
    ///     .with_table(TeamMember)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Queues a tournament with one draft season of `format` and `team_count` linked teams
    /// named `Team 1`, `Team 2`, ... in link order. Implies the tournament tables.
    pub fn with_season(mut self, format: &str, team_count: usize) -> Self {
        self.include_tournament_tables = true;
        self.seasons.push((format.to_string(), team_count));
        self
    }

    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        let mut all_tables = Vec::new();
        if self.include_tournament_tables {
            all_tables.extend(tournament_tables());
        }
        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        for (format, team_count) in self.seasons {
            let fixture = setup
                .fixtures()
                .insert_season_with_teams(&format, team_count)
                .await?;
            setup.seasons.push(fixture);
        }

        Ok(setup)
    }
}
