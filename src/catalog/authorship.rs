//! Transactional entry points to the authorship ledger.
use super::{finish, CatalogResult};
use crate::db::models::book_author::TxManager as _;
use crate::db::{DatabaseConnection, DatabaseTransaction};

/// Credit `author_ids` for a book in one transaction.
///
/// With `overwrite` the book's active authors become exactly `author_ids`;
/// without it the ids are added to the current ones.
///
/// # Errors
/// Errors if any statement fails; nothing is written then.
pub async fn assign_authors(
    conn: &DatabaseConnection,
    book_id: i64,
    author_ids: &[i64],
    overwrite: bool,
) -> CatalogResult<()> {
    let mut tx = conn.begin().await?;
    let outcome = tx
        .assign_authors(book_id, author_ids, overwrite)
        .await
        .map_err(Into::into);
    finish(tx, "assign authors", outcome).await
}

/// Remove every current author of a book, keeping the history rows.
///
/// # Errors
/// Errors if the statement fails.
pub async fn deactivate_authors(conn: &DatabaseConnection, book_id: i64) -> CatalogResult<u64> {
    let mut tx = conn.begin().await?;
    let outcome = tx.deactivate_authors(book_id).await.map_err(Into::into);
    finish(tx, "deactivate authors", outcome).await
}

/// Remove one current author of a book, keeping the history row.
/// Not an error if the author is not currently credited.
///
/// # Errors
/// Errors if the statement fails.
pub async fn deactivate_authors_for_author(
    conn: &DatabaseConnection,
    book_id: i64,
    author_id: i64,
) -> CatalogResult<u64> {
    let mut tx = conn.begin().await?;
    let outcome = tx
        .deactivate_authors_for_author(book_id, author_id)
        .await
        .map_err(Into::into);
    finish(tx, "deactivate author", outcome).await
}

/// Move credit for a book from one author to another in one transaction.
///
/// The book loses `from_author_id` and gains `to_author_id`; its other
/// authors are untouched and the `from_author_id` row stays in the ledger as
/// inactive. Transferring to the same author deactivates and reactivates the
/// same row and leaves the author set as it was.
///
/// # Errors
/// Errors if any statement fails, e.g. `to_author_id` does not exist; the
/// `from_author_id` credit is then kept.
pub async fn transfer_authorship(
    conn: &DatabaseConnection,
    book_id: i64,
    from_author_id: i64,
    to_author_id: i64,
) -> CatalogResult<()> {
    let mut tx = conn.begin().await?;
    let outcome = transfer_within(&mut tx, book_id, from_author_id, to_author_id).await;
    finish(tx, "transfer authorship", outcome).await
}

async fn transfer_within(
    tx: &mut DatabaseTransaction,
    book_id: i64,
    from_author_id: i64,
    to_author_id: i64,
) -> CatalogResult<()> {
    tx.deactivate_authors_for_author(book_id, from_author_id)
        .await?;
    tx.assign_authors(book_id, &[to_author_id], false).await?;
    tracing::debug!(book_id, from_author_id, to_author_id, "Authorship transferred");
    Ok(())
}
