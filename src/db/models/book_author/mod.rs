//! The authorship ledger.
//!
//! `book_author` records every book-author pairing that was ever made.
//! Rows are never deleted while their book exists: revoking or transferring
//! authorship flips `is_active` to 0, and linking the same pair again flips
//! the existing row back to 1. At most one row exists per pair. The active
//! rows of a book are its current author list.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{any::AnyRow, FromRow, Row as _};
use std::collections::BTreeSet;

pub mod manager;

/// Trait for reading the ledger.
#[async_trait]
pub trait Manager {
    /// Ids of the authors currently credited for a book.
    async fn fetch_active_authors(&self, book_id: i64) -> anyhow::Result<BTreeSet<i64>>;
    /// Every ledger row of a book, active or historical, ordered by author.
    async fn find_links_by_book(&self, book_id: i64) -> anyhow::Result<Vec<BookAuthor>>;
}

/// Trait for writing the ledger inside a transaction.
///
/// The methods only issue statements; the caller owns the transaction and
/// decides when to commit, so several primitives can form one atomic change.
#[async_trait]
pub trait TxManager {
    /// Ids of the authors currently credited for a book, as seen by this transaction.
    async fn fetch_active_authors(&mut self, book_id: i64) -> anyhow::Result<BTreeSet<i64>>;
    /// Id of the ledger row for a pair, whatever its state.
    async fn find_link_id(&mut self, book_id: i64, author_id: i64)
        -> anyhow::Result<Option<i64>>;
    /// Credit `author_ids` for the book, reactivating existing rows and
    /// inserting missing ones. With `overwrite` every link of the book is
    /// deactivated first, so the result is exactly `author_ids`.
    async fn assign_authors(
        &mut self,
        book_id: i64,
        author_ids: &[i64],
        overwrite: bool,
    ) -> anyhow::Result<()>;
    /// Deactivate every active link of the book. Returns the number of rows flipped.
    async fn deactivate_authors(&mut self, book_id: i64) -> anyhow::Result<u64>;
    /// Deactivate the active link of one pair, if any. Returns the number of rows flipped.
    async fn deactivate_authors_for_author(
        &mut self,
        book_id: i64,
        author_id: i64,
    ) -> anyhow::Result<u64>;
    /// Hard-delete every ledger row of the book, active and historical.
    async fn delete_by_book(&mut self, book_id: i64) -> anyhow::Result<u64>;
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// Model for a ledger row.
pub struct BookAuthor {
    /// Surrogate key.
    pub id: i64,
    /// Foreign key reference to book id.
    pub book_id: i64,
    /// Foreign key reference to author id.
    pub author_id: i64,
    /// Whether the author is currently credited for the book.
    pub is_active: bool,
}

impl FromRow<'_, AnyRow> for BookAuthor {
    fn from_row(row: &AnyRow) -> anyhow::Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            book_id: row.try_get("book_id")?,
            author_id: row.try_get("author_id")?,
            is_active: row.try_get::<i64, _>("is_active")? != 0,
        })
    }
}
