//! User actions on the catalog.
//!
//! Every public function here is one user action: it validates its input,
//! begins one transaction, issues the statements of the action through the
//! model managers, and commits. On any failure the transaction is rolled
//! back explicitly and the error is returned, so the database is left
//! exactly as it was before the attempt.

use crate::db::{DatabaseTransaction, Tx as _};

pub mod authorship;
pub mod books;
pub mod error;
pub mod references;
pub mod validation;

pub use authorship::{
    assign_authors, deactivate_authors, deactivate_authors_for_author, transfer_authorship,
};
pub use books::{create_book, delete_book, find_book, update_book};
pub use error::{CatalogError, CatalogResult, ValidationError};
pub use references::{create_author, create_publisher, delete_publisher, update_publisher};
pub use validation::BookForm;

/// Commit `tx` if `outcome` succeeded, roll it back otherwise.
///
/// A failed rollback is logged and the operation's own error is returned.
async fn finish<T>(
    tx: DatabaseTransaction,
    action: &'static str,
    outcome: CatalogResult<T>,
) -> CatalogResult<T> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            tracing::info!(action, "Committed");
            Ok(value)
        }
        Err(err) => {
            tracing::warn!(action, error = %err, "Rolling back");
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(action, error = %rollback_err, "Rollback failed");
            }
            Err(err)
        }
    }
}
