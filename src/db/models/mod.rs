//! This module contains all the sqlx structs for the database tables.

/// sqlx structs for author table.
pub mod author;
/// Book binding enum stored in the book table.
pub mod binding;
/// sqlx structs for book table.
pub mod book;
/// sqlx structs for the `book_author` authorship ledger.
pub mod book_author;
/// sqlx structs for genre table.
pub mod genre;
/// sqlx structs for publisher table.
pub mod publisher;
/// Read-only aggregate reports.
pub mod report;

/// Number of rows bound into a single bulk insert statement.
pub const BATCH_SIZE: usize = 100;
