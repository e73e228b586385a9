//! Errors surfaced by catalog operations.
use thiserror::Error;

/// Bad user input, detected before any database access.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A required text field is empty after trimming.
    #[error("{0} can't be empty")]
    Empty(&'static str),
    /// No publisher was chosen for a book.
    #[error("Choose a publisher")]
    MissingPublisher,
    /// Binding outside the allowed set.
    #[error("Invalid binding `{0}`, expected one of: hardcover, paperback, ebook")]
    Binding(String),
    /// Rating that does not parse as a number.
    #[error("Rating must be a number, got `{0}`")]
    RatingNotNumber(String),
    /// Rating outside `[0, 5]`.
    #[error("Rating must be between 0 and 5, got {0}")]
    RatingOutOfRange(f64),
    /// Date not written as `YYYY-MM-DD`.
    #[error("Date must be written as YYYY-MM-DD, got `{0}`")]
    DateFormat(String),
    /// Well-formed date that does not exist in the calendar.
    #[error("`{0}` is not a valid calendar date")]
    InvalidDate(String),
}

/// Failure of a catalog operation.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The input was rejected, nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The record the operation targets does not exist. The transaction was rolled back.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of record, e.g. "Book".
        entity: &'static str,
        /// Id that was looked up.
        id: i64,
    },
    /// Connection or statement failure. The transaction was rolled back.
    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

/// Result of a catalog operation.
pub type CatalogResult<T> = Result<T, CatalogError>;
