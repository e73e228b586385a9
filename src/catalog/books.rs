//! Book record lifecycle: create, edit, delete.
use super::{finish, BookForm, CatalogError, CatalogResult};
use crate::db::models::book::{Book, Manager as _, NewBook, TxManager as _};
use crate::db::models::book_author::TxManager as _;
use crate::db::{DatabaseConnection, DatabaseTransaction};

/// Fetch a book, failing with [`CatalogError::NotFound`] if it does not exist.
///
/// # Errors
/// Errors if the book does not exist or the query fails.
pub async fn find_book(conn: &DatabaseConnection, book_id: i64) -> CatalogResult<Book> {
    conn.find_book_by_id(book_id)
        .await?
        .ok_or(CatalogError::NotFound {
            entity: "Book",
            id: book_id,
        })
}

/// Create a book credited to `author_ids`. Returns the new book's id.
///
/// # Errors
/// Errors if the form is invalid (nothing is attempted) or a statement fails
/// (nothing is written).
pub async fn create_book(
    conn: &DatabaseConnection,
    form: &BookForm,
    author_ids: &[i64],
) -> CatalogResult<i64> {
    let book = form.validate()?;
    let mut tx = conn.begin().await?;
    let outcome = create_within(&mut tx, &book, author_ids).await;
    finish(tx, "create book", outcome).await
}

async fn create_within(
    tx: &mut DatabaseTransaction,
    book: &NewBook,
    author_ids: &[i64],
) -> CatalogResult<i64> {
    let book_id = tx.create_book(book).await?;
    tx.assign_authors(book_id, author_ids, false).await?;
    tracing::debug!(book_id, name = %book.name, "Book created");
    Ok(book_id)
}

/// Overwrite a book's fields and replace its whole active author set with
/// `author_ids`.
///
/// # Errors
/// Errors if the form is invalid, the book does not exist, or a statement
/// fails. Nothing is written in any of these cases.
pub async fn update_book(
    conn: &DatabaseConnection,
    book_id: i64,
    form: &BookForm,
    author_ids: &[i64],
) -> CatalogResult<()> {
    let book = form.validate()?;
    let mut tx = conn.begin().await?;
    let outcome = update_within(&mut tx, book_id, &book, author_ids).await;
    finish(tx, "update book", outcome).await
}

async fn update_within(
    tx: &mut DatabaseTransaction,
    book_id: i64,
    book: &NewBook,
    author_ids: &[i64],
) -> CatalogResult<()> {
    if tx.update_book(book_id, book).await? == 0 {
        return Err(CatalogError::NotFound {
            entity: "Book",
            id: book_id,
        });
    }
    tx.assign_authors(book_id, author_ids, true).await?;
    Ok(())
}

/// Delete a book together with its whole ledger history.
///
/// Unlike revoking authorship this removes the `book_author` rows outright:
/// history is only kept for books that exist.
///
/// # Errors
/// Errors if the book does not exist or a statement fails; nothing is
/// deleted then.
pub async fn delete_book(conn: &DatabaseConnection, book_id: i64) -> CatalogResult<()> {
    let mut tx = conn.begin().await?;
    let outcome = delete_within(&mut tx, book_id).await;
    finish(tx, "delete book", outcome).await
}

async fn delete_within(tx: &mut DatabaseTransaction, book_id: i64) -> CatalogResult<()> {
    let links = tx.delete_by_book(book_id).await?;
    if tx.delete_book(book_id).await? == 0 {
        return Err(CatalogError::NotFound {
            entity: "Book",
            id: book_id,
        });
    }
    tracing::debug!(book_id, links, "Book deleted");
    Ok(())
}
