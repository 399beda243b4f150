use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{calendar::CalendarClient, config::Config};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Absent when no external calendar is configured
    pub calendar: Option<Arc<dyn CalendarClient>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        calendar: Option<Arc<dyn CalendarClient>>,
        config: Config,
    ) -> Self {
        Self {
            db,
            calendar,
            config: Arc::new(config),
        }
    }
}
