use super::binding::Binding;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{any::AnyRow, FromRow, Row as _};

pub mod manager;

/// Storage format of `book.publishment_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trait for managing books.
#[async_trait]
pub trait Manager {
    /// Find all books ordered by name.
    async fn find_all_books(&self) -> anyhow::Result<Vec<Book>>;
    /// Find a book by id.
    async fn find_book_by_id(&self, id: i64) -> anyhow::Result<Option<Book>>;
}

/// Trait for managing transactional books.
#[async_trait]
pub trait TxManager {
    /// Insert a new book and return its id.
    async fn create_book(&mut self, book: &NewBook) -> anyhow::Result<i64>;
    /// Overwrite the scalar fields of a book. Returns the number of updated rows.
    async fn update_book(&mut self, id: i64, book: &NewBook) -> anyhow::Result<u64>;
    /// Delete a book row. Returns the number of deleted rows.
    async fn delete_book(&mut self, id: i64) -> anyhow::Result<u64>;
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
/// Model for a book.
pub struct Book {
    /// Surrogate key.
    pub id: i64,
    /// Title of the book.
    pub name: String,
    /// Foreign key reference to publisher id.
    pub publisher: i64,
    /// Publication date in %YYYY-%MM-%DD format, if known.
    pub publishment_date: Option<String>,
    /// Rating between 0.0 and 5.0, if rated.
    pub rating: Option<f64>,
    /// Binding of the book.
    pub binding: Binding,
}

impl FromRow<'_, AnyRow> for Book {
    fn from_row(row: &AnyRow) -> anyhow::Result<Self, sqlx::Error> {
        let binding: String = row.try_get("binding")?;
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            publisher: row.try_get("publisher")?,
            publishment_date: row.try_get("publishment_date")?,
            rating: row.try_get("rating")?,
            binding: Binding::from_string(&binding).map_err(|err| sqlx::Error::ColumnDecode {
                index: "binding".to_owned(),
                source: err.into(),
            })?,
        })
    }
}

/// Validated scalar fields of a book, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    /// Trimmed, non-empty title.
    pub name: String,
    /// Foreign key reference to publisher id.
    pub publisher: i64,
    /// Publication date, if known.
    pub publishment_date: Option<NaiveDate>,
    /// Rating in `[0.0, 5.0]`, if rated.
    pub rating: Option<f64>,
    /// Binding of the book.
    pub binding: Binding,
}

impl NewBook {
    /// Publication date in its stored form.
    #[must_use]
    pub fn stored_date(&self) -> Option<String> {
        self.publishment_date
            .map(|date| date.format(DATE_FORMAT).to_string())
    }
}
