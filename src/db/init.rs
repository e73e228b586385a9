use crate::config::Config;
use crate::db::{redact, DatabaseConnection, DatabaseKind, Db as _};

/// Connects to the database described by `config` and applies migrations.
///
/// # Errors
/// Errors if a required setting is missing or the connection fails.
/// Connections can fail if the database server is not running, the
/// credentials are rejected, or the database file cannot be created.
pub async fn connect(config: &Config) -> anyhow::Result<DatabaseConnection> {
    let db_url = config.database_url()?;
    let connection = DatabaseConnection::connect(&db_url).await.map_err(|err| {
        anyhow::anyhow!("Failed to connect to {}: {err}", redact(&db_url))
    })?;
    tracing::info!(driver = %config.database.driver, "Connected to database");
    migrate(&connection).await?;
    Ok(connection)
}

/// Applies the embedded migrations for the connection's backend.
///
/// # Errors
/// Errors if a migration fails to apply.
pub async fn migrate(connection: &DatabaseConnection) -> anyhow::Result<()> {
    match connection.kind {
        DatabaseKind::Sqlite => {
            sqlx::migrate!("./migrations/sqlite")
                .run(&connection.pool)
                .await?;
        }
        DatabaseKind::Postgres => {
            sqlx::migrate!("./migrations/postgres")
                .run(&connection.pool)
                .await?;
        }
    }
    tracing::debug!("Migrations applied");
    Ok(())
}
