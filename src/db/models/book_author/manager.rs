//! Manager for the authorship ledger.
use super::BookAuthor;
use crate::db::{DatabaseConnection, DatabaseKind, DatabaseTransaction};
use async_trait::async_trait;
use std::collections::BTreeSet;

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Ids of the authors currently credited for a book.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn fetch_active_authors(&self, book_id: i64) -> anyhow::Result<BTreeSet<i64>> {
        let statement = "
            SELECT author_id
            FROM book_author
            WHERE book_id = $1 AND is_active = 1
        ";
        let rows = match self.kind {
            DatabaseKind::Postgres | DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, (i64,)>(statement)
                    .bind(book_id)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows.into_iter().map(|row| row.0).collect())
    }

    /// Every ledger row of a book.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_links_by_book(&self, book_id: i64) -> anyhow::Result<Vec<BookAuthor>> {
        let statement = "
            SELECT id, book_id, author_id, is_active
            FROM book_author
            WHERE book_id = $1
            ORDER BY author_id
        ";
        let rows = match self.kind {
            DatabaseKind::Postgres | DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, BookAuthor>(statement)
                    .bind(book_id)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows)
    }
}

#[async_trait]
impl super::TxManager for DatabaseTransaction {
    /// Ids of the authors currently credited for a book.
    ///
    /// # Errors
    /// Errors if the statement fails.
    async fn fetch_active_authors(&mut self, book_id: i64) -> anyhow::Result<BTreeSet<i64>> {
        let statement = "
            SELECT author_id
            FROM book_author
            WHERE book_id = $1 AND is_active = 1
        ";
        let rows = sqlx::query_as::<_, (i64,)>(statement)
            .bind(book_id)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows.into_iter().map(|row| row.0).collect())
    }

    /// Id of the ledger row for a pair.
    ///
    /// # Errors
    /// Errors if the statement fails.
    async fn find_link_id(
        &mut self,
        book_id: i64,
        author_id: i64,
    ) -> anyhow::Result<Option<i64>> {
        let statement = "
            SELECT id
            FROM book_author
            WHERE book_id = $1 AND author_id = $2
        ";
        let row = sqlx::query_as::<_, (i64,)>(statement)
            .bind(book_id)
            .bind(author_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row.map(|row| row.0))
    }

    /// Credit `author_ids` for the book.
    ///
    /// Repeated ids are harmless: the second occurrence finds the row the
    /// first one created or reactivated.
    ///
    /// # Errors
    /// Errors if any statement fails, e.g. an author id does not exist. The
    /// transaction is then left for the caller to roll back.
    async fn assign_authors(
        &mut self,
        book_id: i64,
        author_ids: &[i64],
        overwrite: bool,
    ) -> anyhow::Result<()> {
        if overwrite {
            let statement = "
                UPDATE book_author
                SET is_active = 0
                WHERE book_id = $1
            ";
            sqlx::query(statement)
                .bind(book_id)
                .execute(&mut *self.tx)
                .await?;
        }
        for &author_id in author_ids {
            let existing = super::TxManager::find_link_id(self, book_id, author_id).await?;
            if let Some(link_id) = existing {
                let statement = "
                    UPDATE book_author
                    SET is_active = 1
                    WHERE id = $1
                ";
                sqlx::query(statement)
                    .bind(link_id)
                    .execute(&mut *self.tx)
                    .await?;
            } else {
                let statement = "
                    INSERT INTO book_author ( book_id, author_id, is_active )
                    VALUES ( $1, $2, 1 )
                ";
                sqlx::query(statement)
                    .bind(book_id)
                    .bind(author_id)
                    .execute(&mut *self.tx)
                    .await?;
            }
        }
        tracing::debug!(book_id, ?author_ids, overwrite, "Authors assigned");
        Ok(())
    }

    /// Deactivate every active link of the book.
    ///
    /// # Errors
    /// Errors if the statement fails.
    async fn deactivate_authors(&mut self, book_id: i64) -> anyhow::Result<u64> {
        let statement = "
            UPDATE book_author
            SET is_active = 0
            WHERE book_id = $1 AND is_active = 1
        ";
        let result = sqlx::query(statement)
            .bind(book_id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    /// Deactivate the active link of one pair, if any.
    ///
    /// # Errors
    /// Errors if the statement fails.
    async fn deactivate_authors_for_author(
        &mut self,
        book_id: i64,
        author_id: i64,
    ) -> anyhow::Result<u64> {
        let statement = "
            UPDATE book_author
            SET is_active = 0
            WHERE book_id = $1 AND author_id = $2 AND is_active = 1
        ";
        let result = sqlx::query(statement)
            .bind(book_id)
            .bind(author_id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    /// Hard-delete every ledger row of the book.
    ///
    /// # Errors
    /// Errors if the statement fails.
    async fn delete_by_book(&mut self, book_id: i64) -> anyhow::Result<u64> {
        let statement = "
            DELETE FROM book_author
            WHERE book_id = $1
        ";
        let result = sqlx::query(statement)
            .bind(book_id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }
}
