//! Manager for the author model.
use super::{Author, NewAuthor};
use crate::db::{models::BATCH_SIZE, DatabaseConnection, DatabaseKind, DatabaseTransaction};
use async_trait::async_trait;
use sqlx::QueryBuilder;

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Find all authors sorted by surname and name.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_all_authors(&self, active_only: bool) -> anyhow::Result<Vec<Author>> {
        let statement = if active_only {
            "
            SELECT id, surname, name, email, is_active
            FROM author
            WHERE is_active = 1
            ORDER BY surname, name
            "
        } else {
            "
            SELECT id, surname, name, email, is_active
            FROM author
            ORDER BY surname, name
            "
        };
        let rows = match self.kind {
            DatabaseKind::Postgres | DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Author>(statement)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Find an author by id.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_author_by_id(&self, id: i64) -> anyhow::Result<Option<Author>> {
        let statement = "
            SELECT id, surname, name, email, is_active
            FROM author
            WHERE id = $1
        ";
        let row = match self.kind {
            DatabaseKind::Postgres | DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Author>(statement)
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
    /// Insert a single author.
    ///
    /// # Errors
    /// Errors if the author cannot be inserted into the database.
    async fn create_author(&mut self, author: &NewAuthor) -> anyhow::Result<i64> {
        let statement = "
            INSERT INTO author ( surname, name, email, is_active )
            VALUES ( $1, $2, $3, $4 )
            RETURNING id
        ";
        let row = sqlx::query_as::<_, (i64,)>(statement)
            .bind(author.surname.as_str())
            .bind(author.name.as_str())
            .bind(author.email.clone())
            .bind(i64::from(author.is_active))
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row.0)
    }

    /// Insert a bulk of authors into the database.
    ///
    /// # Errors
    /// Errors if the authors cannot be inserted into the database.
    async fn insert_bulk(&mut self, authors: Vec<NewAuthor>) -> anyhow::Result<()> {
        for chunk in authors.chunks(BATCH_SIZE) {
            let mut query_builder =
                QueryBuilder::new("INSERT INTO author ( surname, name, email, is_active ) ");
            query_builder.push_values(chunk, |mut bindings, author| {
                bindings
                    .push_bind(author.surname.clone())
                    .push_bind(author.name.clone())
                    .push_bind(author.email.clone())
                    .push_bind(i64::from(author.is_active));
            });
            let query = query_builder.build();
            query.execute(&mut *self.tx).await?;
        }
        Ok(())
    }
}
