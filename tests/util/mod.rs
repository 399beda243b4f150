//! Glue between the test utilities and the server crate.
//!
//! `tourney-test-utils` cannot depend on the server crate, so the calendar trait and the
//! conversion into [`AppState`] are implemented here.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tourney::{
    model::matches::MatchId,
    server::{
        calendar::{CalendarClient, CalendarError, CalendarEvent},
        config::Config,
        data::matches::MatchRepository,
        model::app::AppState,
    },
};
use tourney_test_utils::prelude::*;

/// [`MockCalendar`] exposed through the server's calendar trait.
#[derive(Debug, Clone, Default)]
pub struct TestCalendar(pub MockCalendar);

#[async_trait]
impl CalendarClient for TestCalendar {
    fn provider(&self) -> &str {
        MockCalendar::PROVIDER
    }

    async fn create_event(&self, event: &CalendarEvent) -> Result<String, CalendarError> {
        self.0.create(&event.summary).map_err(CalendarError::Provider)
    }

    async fn update_event(
        &self,
        event_id: &str,
        event: &CalendarEvent,
    ) -> Result<(), CalendarError> {
        self.0
            .update(event_id, &event.summary)
            .map_err(CalendarError::Provider)
    }

    async fn delete_event(&self, event_id: &str) -> Result<(), CalendarError> {
        self.0.delete(event_id).map_err(CalendarError::Provider)
    }
}

/// Deletes a match from the database while its event is being created, so storing the event
/// reference afterwards fails for that match. Every call is forwarded to the inner calendar.
pub struct VanishingMatchCalendar {
    pub inner: TestCalendar,
    pub db: DatabaseConnection,
    /// Summary of the event whose match disappears
    pub summary: String,
    pub match_id: MatchId,
}

#[async_trait]
impl CalendarClient for VanishingMatchCalendar {
    fn provider(&self) -> &str {
        self.inner.provider()
    }

    async fn create_event(&self, event: &CalendarEvent) -> Result<String, CalendarError> {
        if event.summary == self.summary {
            MatchRepository::new(&self.db)
                .delete(self.match_id)
                .await
                .map_err(|e| CalendarError::Provider(e.to_string()))?;
        }
        self.inner.create_event(event).await
    }

    async fn update_event(
        &self,
        event_id: &str,
        event: &CalendarEvent,
    ) -> Result<(), CalendarError> {
        self.inner.update_event(event_id, event).await
    }

    async fn delete_event(&self, event_id: &str) -> Result<(), CalendarError> {
        self.inner.delete_event(event_id).await
    }
}

pub trait TestContextExt {
    /// Application state over the test database, with `calendar` as the calendar provider
    fn app_state(&self, calendar: Option<&MockCalendar>) -> AppState;
}

impl TestContextExt for TestContext {
    fn app_state(&self, calendar: Option<&MockCalendar>) -> AppState {
        let calendar = calendar
            .map(|mock| Arc::new(TestCalendar(mock.clone())) as Arc<dyn CalendarClient>);

        AppState::new(
            self.db.clone(),
            calendar,
            Config {
                database_url: "sqlite::memory:".to_string(),
                ..Config::default()
            },
        )
    }
}
