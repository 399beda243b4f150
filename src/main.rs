use std::{process::ExitCode, sync::Arc};

use tracing_subscriber::EnvFilter;

use tourney::server::{
    calendar::CalendarClient, config::Config, error::Error, model::app::AppState, router, startup,
};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Server stopped: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: Config) -> Result<(), Error> {
    let db = startup::connect_to_database(&config).await?;
    let listener = startup::bind(&config).await?;

    // No calendar provider ships with the server, syncing reports the calendar as disabled
    let calendar: Option<Arc<dyn CalendarClient>> = None;

    tracing::info!("Starting server on {}", config.bind_address);

    let app = router::routes().with_state(AppState::new(db, calendar, config));

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::InternalError(e.to_string()))
}
