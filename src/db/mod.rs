//! Database related module.
use async_trait::async_trait;
use sqlx::Transaction;
use std::str::FromStr;

use sqlx::any::{self, AnyPoolOptions};
use sqlx::AnyPool;
use sqlx::ConnectOptions;
use tracing::instrument;

/// Database initialization.
pub mod init;
/// Models for the database.
pub mod models;

/// Upper bound of pooled connections. Every user action holds at most one.
const MAX_CONNECTIONS: u32 = 5;

#[async_trait]
/// Generic Database
pub trait Db {
    /// Connects to a database.
    ///
    /// # Errors
    /// Errors if connection to database fails.
    async fn connect(url: &str) -> anyhow::Result<DatabaseConnection>;
}

#[async_trait]
/// Generic transaction
pub trait Tx {
    /// Begin a transaction.
    async fn begin(pool: AnyPool) -> anyhow::Result<DatabaseTransaction>;
    /// Commit a transaction.
    async fn commit(self) -> anyhow::Result<()>;
    /// Rollback a transaction.
    async fn rollback(self) -> anyhow::Result<()>;
}

/// Type of database connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    /// Sqlite database.
    Sqlite,
    /// Postgres database.
    Postgres,
}

/// Database connection.
#[derive(Debug, Clone)]
pub struct DatabaseConnection {
    /// Database connection pool.
    pub pool: AnyPool,
    /// Type of database connection.
    pub kind: DatabaseKind,
}

/// Database transaction.
///
/// Dropping an uncommitted transaction rolls it back, so a transaction is
/// released on every exit path even when neither `commit` nor `rollback`
/// is reached.
pub struct DatabaseTransaction {
    /// Database transaction.
    pub tx: Transaction<'static, sqlx::Any>,
}

#[async_trait]
impl Db for DatabaseConnection {
    /// Connects to a database.
    ///
    /// # Errors
    /// Errors if connection to database fails.
    #[instrument(level = "trace", skip(db_url))]
    async fn connect(db_url: &str) -> anyhow::Result<Self> {
        let kind = match db_url {
            url if url.starts_with("sqlite:") => DatabaseKind::Sqlite,
            url if url.starts_with("postgres://") || url.starts_with("postgresql://") => {
                DatabaseKind::Postgres
            }
            _ => anyhow::bail!("Unsupported database URL: {}", redact(db_url)),
        };
        any::install_default_drivers();
        let options = any::AnyConnectOptions::from_str(db_url)?.disable_statement_logging();
        let pool = AnyPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;
        Ok(Self { pool, kind })
    }
}

impl DatabaseConnection {
    /// Begin a transaction on a connection taken from this pool.
    ///
    /// # Errors
    /// Errors if no connection can be acquired.
    pub async fn begin(&self) -> anyhow::Result<DatabaseTransaction> {
        DatabaseTransaction::begin(self.pool.clone()).await
    }
}

#[async_trait]
impl Tx for DatabaseTransaction {
    /// Begin a transaction.
    async fn begin(pool: AnyPool) -> anyhow::Result<Self> {
        let tx = pool.begin().await?;
        Ok(Self { tx })
    }
    /// Commit a transaction.
    async fn commit(self) -> anyhow::Result<()> {
        self.tx.commit().await?;
        Ok(())
    }

    /// Rollback a transaction.
    async fn rollback(self) -> anyhow::Result<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}

/// Strip the password from a database URL before it ends up in a log line
/// or an error message.
#[must_use]
pub fn redact(db_url: &str) -> String {
    let Some((scheme, rest)) = db_url.split_once("://") else {
        return db_url.to_owned();
    };
    let Some((credentials, host)) = rest.split_once('@') else {
        return db_url.to_owned();
    };
    let user = credentials.split(':').next().unwrap_or_default();
    format!("{scheme}://{user}:***@{host}")
}
