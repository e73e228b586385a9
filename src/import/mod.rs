//! Bulk import of reference data from files.
//!
//! Each format has a pure parser that turns file contents into records plus
//! the positions of the entries it had to skip, and an `import_*` function
//! that reads the file and writes every parsed record in one transaction.
use crate::db::{DatabaseTransaction, Tx as _};
use serde::Serialize;
use std::path::Path;

pub mod csv;
pub mod json;
pub mod xml;

pub use self::csv::import_publishers;
pub use self::json::import_authors;
pub use self::xml::import_genres;

/// Parsed records together with the entries that were left out.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    /// Records ready to be inserted.
    pub records: Vec<T>,
    /// 1-based positions of skipped entries.
    pub skipped: Vec<usize>,
}

impl<T> Default for Parsed<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Outcome of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Number of inserted records.
    pub inserted: usize,
    /// 1-based positions of entries that were not imported.
    pub skipped: Vec<usize>,
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .map_err(|err| anyhow::anyhow!("Could not read {}: {err}", path.display()))
}

/// Commit the import if `outcome` succeeded, otherwise roll everything back.
///
/// A failed rollback is logged and the import's own error is returned.
async fn finish_import(
    tx: DatabaseTransaction,
    kind: &'static str,
    outcome: anyhow::Result<()>,
    summary: ImportSummary,
) -> anyhow::Result<ImportSummary> {
    match outcome {
        Ok(()) => {
            tx.commit().await?;
            tracing::info!(
                kind,
                inserted = summary.inserted,
                skipped = summary.skipped.len(),
                "Import committed"
            );
            Ok(summary)
        }
        Err(err) => {
            tracing::warn!(kind, error = %err, "Import failed, rolling back");
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(kind, error = %rollback_err, "Rollback failed");
            }
            Err(err)
        }
    }
}
