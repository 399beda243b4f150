use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;

use crate::server::{config::Config, error::Error};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    tracing::info!("Connected to database and applied migrations");

    Ok(db)
}

/// Bind the HTTP listener to the configured address
pub async fn bind(config: &Config) -> Result<TcpListener, Error> {
    TcpListener::bind(&config.bind_address).await.map_err(|e| {
        Error::InternalError(format!(
            "Failed to bind to {}: {}",
            config.bind_address, e
        ))
    })
}
