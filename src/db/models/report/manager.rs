//! Manager for reports.
use super::PublisherReport;
use crate::db::{DatabaseConnection, DatabaseKind};
use async_trait::async_trait;

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Per-publisher statistics.
    ///
    /// Publishers without books are included with zero counts and no average.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_publisher_report(&self) -> anyhow::Result<Vec<PublisherReport>> {
        let statement = "
            WITH publisher_books AS (
                SELECT p.id AS publisher_id, p.name AS publisher_name,
                       COUNT(b.id) AS books_count, AVG(b.rating) AS avg_rating
                FROM publisher p
                LEFT JOIN book b ON b.publisher = p.id
                GROUP BY p.id, p.name
            ),
            publisher_authors AS (
                SELECT p.id AS publisher_id, COUNT(DISTINCT ba.author_id) AS active_authors
                FROM publisher p
                LEFT JOIN book b ON b.publisher = p.id
                LEFT JOIN book_author ba ON ba.book_id = b.id AND ba.is_active = 1
                GROUP BY p.id
            )
            SELECT pb.publisher_name, pb.books_count, pb.avg_rating, pa.active_authors
            FROM publisher_books pb
            JOIN publisher_authors pa ON pa.publisher_id = pb.publisher_id
            ORDER BY pb.publisher_name, pb.publisher_id
        ";
        let rows = match self.kind {
            DatabaseKind::Postgres | DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, PublisherReport>(statement)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows)
    }
}
