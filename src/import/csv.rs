//! Publishers from CSV.
use super::{finish_import, read_file, ImportSummary, Parsed};
use crate::catalog::validation::optional_text;
use crate::db::models::publisher::{NewPublisher, TxManager as _};
use crate::db::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;

/// One data row as written in the file.
#[derive(Debug, Deserialize)]
struct PublisherRow {
    name: Option<String>,
    address: Option<String>,
    #[serde(alias = "phone")]
    phone_number: Option<String>,
    email: Option<String>,
    website: Option<String>,
}

impl PublisherRow {
    fn into_publisher(self) -> Option<NewPublisher> {
        let name = optional_text(self.name.as_deref())?;
        Some(NewPublisher {
            name,
            address: optional_text(self.address.as_deref()),
            phone_number: optional_text(self.phone_number.as_deref()),
            email: optional_text(self.email.as_deref()),
            website: optional_text(self.website.as_deref()),
        })
    }
}

/// Parse publishers from CSV text with a header row.
///
/// The `name` column is required; `address`, `phone_number` (or `phone`),
/// `email` and `website` are optional. Short rows leave the missing columns
/// empty. Rows without a name are skipped.
///
/// # Errors
/// Errors if the header has no `name` column or a row is malformed.
pub fn parse_publishers(contents: &str) -> anyhow::Result<Parsed<NewPublisher>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(contents.as_bytes());
    if !reader.headers()?.iter().any(|header| header == "name") {
        anyhow::bail!("CSV header must contain a `name` column");
    }
    let mut parsed = Parsed::default();
    for (idx, row) in reader.deserialize::<PublisherRow>().enumerate() {
        let row_number = idx + 1;
        let row = row.map_err(|err| anyhow::anyhow!("Row {row_number}: {err}"))?;
        match row.into_publisher() {
            Some(publisher) => parsed.records.push(publisher),
            None => parsed.skipped.push(row_number),
        }
    }
    Ok(parsed)
}

/// Import publishers from a CSV file in one transaction.
///
/// # Errors
/// Errors if the file cannot be read or parsed, or the insert fails. Nothing
/// is imported then.
pub async fn import_publishers(
    conn: &DatabaseConnection,
    path: &Path,
) -> anyhow::Result<ImportSummary> {
    let parsed = parse_publishers(&read_file(path)?)?;
    let summary = ImportSummary {
        inserted: parsed.records.len(),
        skipped: parsed.skipped,
    };
    let mut tx = conn.begin().await?;
    let outcome = tx.insert_bulk(parsed.records).await;
    finish_import(tx, "publishers", outcome, summary).await
}
