//! Test utilities for the tournament server.
//!
//! Tests are set up in two phases: a [`TestBuilder`] declares tables and fixtures, and
//! `build()` returns a [`TestContext`] holding an in-memory SQLite database with them applied.
//! [`MockCalendar`] stands in for the external calendar and records every call.

pub mod builder;
pub mod calendar;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use calendar::{CalendarCall, MockCalendar};
pub use context::TestContext;
pub use error::TestError;

#[doc(hidden)]
pub use entity;
#[doc(hidden)]
pub use sea_orm;

pub mod prelude {
    pub use crate::{
        fixtures::SeasonFixture, test_setup_with_tables, test_setup_with_tournament_tables,
        CalendarCall, MockCalendar, TestBuilder, TestContext, TestError,
    };
}

/// Creates a [`TestContext`] with tables for the given entities.
///
/// ```ignore
/// let test = test_setup_with_tables!(entity::prelude::Team, entity::prelude::Person)?;
/// ```
#[macro_export]
macro_rules! test_setup_with_tables {
    () => {{
        $crate::TestContext::new().await
    }};

    ($($entity:expr),+ $(,)?) => {{
        async {
            let setup = $crate::TestContext::new().await?;

            let schema = $crate::sea_orm::Schema::new($crate::sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                $(schema.create_table_from_entity($entity),)+
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}

/// Creates a [`TestContext`] with every tournament table.
#[macro_export]
macro_rules! test_setup_with_tournament_tables {
    () => {{
        async {
            let setup = $crate::TestContext::new().await?;
            setup.with_tables($crate::context::tournament_tables()).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}
