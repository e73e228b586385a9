use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod manager;

/// Trait for aggregate, read-only reports.
#[async_trait]
pub trait Manager {
    /// Per-publisher statistics, ordered by publisher name.
    async fn find_publisher_report(&self) -> anyhow::Result<Vec<PublisherReport>>;
}

#[derive(sqlx::FromRow, Deserialize, Serialize, Debug, Clone, PartialEq)]
/// One row of the publisher report.
pub struct PublisherReport {
    /// Name of the publisher.
    pub publisher_name: String,
    /// Number of books of the publisher.
    pub books_count: i64,
    /// Average rating of the publisher's rated books.
    pub avg_rating: Option<f64>,
    /// Number of distinct authors actively credited on any of the publisher's books.
    pub active_authors: i64,
}
