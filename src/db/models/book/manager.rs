//! Manager for the book model.
use super::{Book, NewBook};
use crate::db::{DatabaseConnection, DatabaseKind, DatabaseTransaction};
use async_trait::async_trait;

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Find all books ordered by name.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_all_books(&self) -> anyhow::Result<Vec<Book>> {
        let statement = "
            SELECT id, name, publisher, publishment_date, rating, binding
            FROM book
            ORDER BY name, id
        ";
        let rows = match self.kind {
            DatabaseKind::Postgres | DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Book>(statement)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Find a book by id.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_book_by_id(&self, id: i64) -> anyhow::Result<Option<Book>> {
        let statement = "
            SELECT id, name, publisher, publishment_date, rating, binding
            FROM book
            WHERE id = $1
        ";
        let row = match self.kind {
            DatabaseKind::Postgres | DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Book>(statement)
                    .bind(id)
                    .fetch_optional(&mut *connection)
                    .await?
            }
        };
        Ok(row)
    }
}

#[async_trait]
impl super::TxManager for DatabaseTransaction {
    /// Insert a new book.
    ///
    /// # Errors
    /// Errors if the book cannot be inserted, e.g. the publisher does not exist.
    async fn create_book(&mut self, book: &NewBook) -> anyhow::Result<i64> {
        let statement = "
            INSERT INTO book ( name, publisher, publishment_date, rating, binding )
            VALUES ( $1, $2, $3, $4, $5 )
            RETURNING id
        ";
        let row = sqlx::query_as::<_, (i64,)>(statement)
            .bind(book.name.as_str())
            .bind(book.publisher)
            .bind(book.stored_date())
            .bind(book.rating)
            .bind(book.binding.as_str())
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row.0)
    }

    /// Overwrite the scalar fields of a book.
    ///
    /// # Errors
    /// Errors if the book cannot be updated.
    async fn update_book(&mut self, id: i64, book: &NewBook) -> anyhow::Result<u64> {
        let statement = "
            UPDATE book
            SET name = $1, publisher = $2, publishment_date = $3, rating = $4, binding = $5
            WHERE id = $6
        ";
        let result = sqlx::query(statement)
            .bind(book.name.as_str())
            .bind(book.publisher)
            .bind(book.stored_date())
            .bind(book.rating)
            .bind(book.binding.as_str())
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete a book row.
    ///
    /// The caller removes the book's ledger rows first, the foreign key
    /// from `book_author` forbids deleting a book that is still referenced.
    ///
    /// # Errors
    /// Errors if the book cannot be deleted.
    async fn delete_book(&mut self, id: i64) -> anyhow::Result<u64> {
        let statement = "
            DELETE FROM book
            WHERE id = $1
        ";
        let result = sqlx::query(statement)
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }
}
