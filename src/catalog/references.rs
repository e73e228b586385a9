//! Reference data edited by hand: authors and publishers.
use super::validation::{optional_text, validate_required};
use super::{finish, CatalogError, CatalogResult};
use crate::db::models::author::{NewAuthor, TxManager as _};
use crate::db::models::publisher::{NewPublisher, TxManager as _};
use crate::db::DatabaseConnection;

/// Normalize and check a publisher before it is written.
fn clean_publisher(publisher: &NewPublisher) -> CatalogResult<NewPublisher> {
    Ok(NewPublisher {
        name: validate_required(&publisher.name, "Publisher name")?,
        address: optional_text(publisher.address.as_deref()),
        phone_number: optional_text(publisher.phone_number.as_deref()),
        email: optional_text(publisher.email.as_deref()),
        website: optional_text(publisher.website.as_deref()),
    })
}

/// Add an author. Returns the new author's id.
///
/// # Errors
/// Errors if surname or name is blank, or the insert fails.
pub async fn create_author(conn: &DatabaseConnection, author: &NewAuthor) -> CatalogResult<i64> {
    let author = NewAuthor {
        surname: validate_required(&author.surname, "Surname")?,
        name: validate_required(&author.name, "Name")?,
        email: optional_text(author.email.as_deref()),
        is_active: author.is_active,
    };
    let mut tx = conn.begin().await?;
    let outcome = tx.create_author(&author).await.map_err(Into::into);
    finish(tx, "create author", outcome).await
}

/// Add a publisher. Returns the new publisher's id.
///
/// # Errors
/// Errors if the name is blank, or the insert fails.
pub async fn create_publisher(
    conn: &DatabaseConnection,
    publisher: &NewPublisher,
) -> CatalogResult<i64> {
    let publisher = clean_publisher(publisher)?;
    let mut tx = conn.begin().await?;
    let outcome = tx.create_publisher(&publisher).await.map_err(Into::into);
    finish(tx, "create publisher", outcome).await
}

/// Overwrite a publisher.
///
/// # Errors
/// Errors if the name is blank, the publisher does not exist, or the update fails.
pub async fn update_publisher(
    conn: &DatabaseConnection,
    publisher_id: i64,
    publisher: &NewPublisher,
) -> CatalogResult<()> {
    let publisher = clean_publisher(publisher)?;
    let mut tx = conn.begin().await?;
    let outcome = match tx.update_publisher(publisher_id, &publisher).await {
        Ok(0) => Err(CatalogError::NotFound {
            entity: "Publisher",
            id: publisher_id,
        }),
        Ok(_) => Ok(()),
        Err(err) => Err(err.into()),
    };
    finish(tx, "update publisher", outcome).await
}

/// Delete a publisher.
///
/// # Errors
/// Errors if the publisher does not exist or books still reference it.
pub async fn delete_publisher(conn: &DatabaseConnection, publisher_id: i64) -> CatalogResult<()> {
    let mut tx = conn.begin().await?;
    let outcome = match tx.delete_publisher(publisher_id).await {
        Ok(0) => Err(CatalogError::NotFound {
            entity: "Publisher",
            id: publisher_id,
        }),
        Ok(_) => Ok(()),
        Err(err) => Err(err.into()),
    };
    finish(tx, "delete publisher", outcome).await
}
