use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod manager;

/// Trait for managing publishers.
#[async_trait]
pub trait Manager {
    /// Find all publishers ordered by name.
    async fn find_all_publishers(&self) -> anyhow::Result<Vec<Publisher>>;
    /// Find a publisher by id.
    async fn find_publisher_by_id(&self, id: i64) -> anyhow::Result<Option<Publisher>>;
}

/// Trait for managing transactional publishers.
#[async_trait]
pub trait TxManager {
    /// Insert a publisher and return its id.
    async fn create_publisher(&mut self, publisher: &NewPublisher) -> anyhow::Result<i64>;
    /// Overwrite a publisher. Returns the number of updated rows.
    async fn update_publisher(&mut self, id: i64, publisher: &NewPublisher)
        -> anyhow::Result<u64>;
    /// Delete a publisher. Returns the number of deleted rows.
    async fn delete_publisher(&mut self, id: i64) -> anyhow::Result<u64>;
    /// Insert a bulk of publishers.
    async fn insert_bulk(&mut self, publishers: Vec<NewPublisher>) -> anyhow::Result<()>;
}

#[derive(sqlx::FromRow, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// Model for a publisher.
pub struct Publisher {
    /// Surrogate key.
    pub id: i64,
    /// Name of the publisher.
    pub name: String,
    /// Postal address.
    pub address: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Website URL.
    pub website: Option<String>,
}

/// A publisher that is not stored yet.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPublisher {
    /// Name of the publisher.
    pub name: String,
    /// Postal address.
    pub address: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Website URL.
    pub website: Option<String>,
}

impl NewPublisher {
    /// Create a publisher with only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
