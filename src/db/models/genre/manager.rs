//! Manager for the genre model.
use super::{Genre, NewGenre};
use crate::db::{models::BATCH_SIZE, DatabaseConnection, DatabaseKind, DatabaseTransaction};
use async_trait::async_trait;
use sqlx::QueryBuilder;

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Find all genres ordered by name.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_all_genres(&self) -> anyhow::Result<Vec<Genre>> {
        let statement = "
            SELECT id, name
            FROM genre
            ORDER BY name
        ";
        let rows = match self.kind {
            DatabaseKind::Postgres | DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Genre>(statement)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows)
    }
}

#[async_trait]
impl super::TxManager for DatabaseTransaction {
    /// Insert a bulk of genres into the database.
    ///
    /// # Errors
    /// Errors if the genres cannot be inserted into the database.
    async fn insert_bulk(&mut self, genres: Vec<NewGenre>) -> anyhow::Result<()> {
        for chunk in genres.chunks(BATCH_SIZE) {
            let mut query_builder = QueryBuilder::new("INSERT INTO genre ( name ) ");
            query_builder.push_values(chunk, |mut bindings, genre| {
                bindings.push_bind(genre.name.clone());
            });
            let query = query_builder.build();
            query.execute(&mut *self.tx).await?;
        }
        Ok(())
    }
}
