use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod manager;

/// Trait for managing genres.
#[async_trait]
pub trait Manager {
    /// Find all genres ordered by name.
    async fn find_all_genres(&self) -> anyhow::Result<Vec<Genre>>;
}

/// Trait for managing transactional genres.
#[async_trait]
pub trait TxManager {
    /// Insert a bulk of genres.
    async fn insert_bulk(&mut self, genres: Vec<NewGenre>) -> anyhow::Result<()>;
}

#[derive(sqlx::FromRow, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// Model for a genre.
pub struct Genre {
    /// Surrogate key.
    pub id: i64,
    /// Name of the genre.
    pub name: String,
}

/// A genre that is not stored yet.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewGenre {
    /// Name of the genre.
    pub name: String,
}
