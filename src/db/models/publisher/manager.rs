//! Manager for the publisher model.
use super::{NewPublisher, Publisher};
use crate::db::{models::BATCH_SIZE, DatabaseConnection, DatabaseKind, DatabaseTransaction};
use async_trait::async_trait;
use sqlx::QueryBuilder;

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Find all publishers ordered by name.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_all_publishers(&self) -> anyhow::Result<Vec<Publisher>> {
        let statement = "
            SELECT id, name, address, phone_number, email, website
            FROM publisher
            ORDER BY name
        ";
        let rows = match self.kind {
            DatabaseKind::Postgres | DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Publisher>(statement)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Find a publisher by id.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_publisher_by_id(&self, id: i64) -> anyhow::Result<Option<Publisher>> {
        let statement = "
            SELECT id, name, address, phone_number, email, website
            FROM publisher
            WHERE id = $1
        ";
        let row = match self.kind {
            DatabaseKind::Postgres | DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Publisher>(statement)
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
    /// Insert a publisher.
    ///
    /// # Errors
    /// Errors if the publisher cannot be inserted into the database.
    async fn create_publisher(&mut self, publisher: &NewPublisher) -> anyhow::Result<i64> {
        let statement = "
            INSERT INTO publisher ( name, address, phone_number, email, website )
            VALUES ( $1, $2, $3, $4, $5 )
            RETURNING id
        ";
        let row = sqlx::query_as::<_, (i64,)>(statement)
            .bind(publisher.name.as_str())
            .bind(publisher.address.clone())
            .bind(publisher.phone_number.clone())
            .bind(publisher.email.clone())
            .bind(publisher.website.clone())
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row.0)
    }

    /// Overwrite a publisher.
    ///
    /// # Errors
    /// Errors if the publisher cannot be updated.
    async fn update_publisher(
        &mut self,
        id: i64,
        publisher: &NewPublisher,
    ) -> anyhow::Result<u64> {
        let statement = "
            UPDATE publisher
            SET name = $1, address = $2, phone_number = $3, email = $4, website = $5
            WHERE id = $6
        ";
        let result = sqlx::query(statement)
            .bind(publisher.name.as_str())
            .bind(publisher.address.clone())
            .bind(publisher.phone_number.clone())
            .bind(publisher.email.clone())
            .bind(publisher.website.clone())
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete a publisher.
    ///
    /// # Errors
    /// Errors if the publisher cannot be deleted, e.g. books still reference it.
    async fn delete_publisher(&mut self, id: i64) -> anyhow::Result<u64> {
        let statement = "
            DELETE FROM publisher
            WHERE id = $1
        ";
        let result = sqlx::query(statement)
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    /// Insert a bulk of publishers into the database.
    ///
    /// # Errors
    /// Errors if the publishers cannot be inserted into the database.
    async fn insert_bulk(&mut self, publishers: Vec<NewPublisher>) -> anyhow::Result<()> {
        for chunk in publishers.chunks(BATCH_SIZE) {
            let mut query_builder = QueryBuilder::new(
                "INSERT INTO publisher ( name, address, phone_number, email, website ) ",
            );
            query_builder.push_values(chunk, |mut bindings, publisher| {
                bindings
                    .push_bind(publisher.name.clone())
                    .push_bind(publisher.address.clone())
                    .push_bind(publisher.phone_number.clone())
                    .push_bind(publisher.email.clone())
                    .push_bind(publisher.website.clone());
            });
            let query = query_builder.build();
            query.execute(&mut *self.tx).await?;
        }
        Ok(())
    }
}
