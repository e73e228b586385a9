//! Authors from JSON.
use super::{finish_import, read_file, ImportSummary, Parsed};
use crate::catalog::validation::optional_text;
use crate::db::models::author::{NewAuthor, TxManager as _};
use crate::db::DatabaseConnection;
use serde_json::Value;
use std::path::Path;

/// Parse authors from a JSON array of objects.
///
/// Elements that are not objects, or have a blank `surname` or `name`, are
/// skipped. `is_active` defaults to true.
///
/// # Errors
/// Errors if the text is not JSON or the top level is not an array.
pub fn parse_authors(contents: &str) -> anyhow::Result<Parsed<NewAuthor>> {
    let Value::Array(items) = serde_json::from_str::<Value>(contents)? else {
        anyhow::bail!("Expected a JSON array of authors");
    };
    let mut parsed = Parsed::default();
    for (idx, item) in items.into_iter().enumerate() {
        match parse_author(item) {
            Some(author) => parsed.records.push(author),
            None => parsed.skipped.push(idx + 1),
        }
    }
    Ok(parsed)
}

fn parse_author(item: Value) -> Option<NewAuthor> {
    if !item.is_object() {
        return None;
    }
    let author: NewAuthor = serde_json::from_value(item).ok()?;
    Some(NewAuthor {
        surname: optional_text(Some(author.surname.as_str()))?,
        name: optional_text(Some(author.name.as_str()))?,
        email: optional_text(author.email.as_deref()),
        is_active: author.is_active,
    })
}

/// Import authors from a JSON file in one transaction.
///
/// # Errors
/// Errors if the file cannot be read or parsed, or the insert fails. Nothing
/// is imported then.
pub async fn import_authors(
    conn: &DatabaseConnection,
    path: &Path,
) -> anyhow::Result<ImportSummary> {
    let parsed = parse_authors(&read_file(path)?)?;
    let summary = ImportSummary {
        inserted: parsed.records.len(),
        skipped: parsed.skipped,
    };
    let mut tx = conn.begin().await?;
    let outcome = tx.insert_bulk(parsed.records).await;
    finish_import(tx, "authors", outcome, summary).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_authors_when_is_active_missing_expect_active() {
        let actual = parse_authors(r#"[{"surname": " Le Guin ", "name": "Ursula", "email": ""}]"#)
            .unwrap();
        assert_eq!(
            actual.records,
            vec![NewAuthor {
                surname: "Le Guin".into(),
                name: "Ursula".into(),
                email: None,
                is_active: true,
            }]
        );
    }

    #[test]
    fn test_parse_authors_when_flags_given_expect_bool_or_int_accepted() {
        let contents = r#"[
            {"surname": "Banks", "name": "Iain", "is_active": false},
            {"surname": "Cherryh", "name": "C. J.", "is_active": 1}
        ]"#;
        let actual = parse_authors(contents).unwrap();
        let flags: Vec<_> = actual.records.iter().map(|a| a.is_active).collect();
        assert_eq!(flags, vec![false, true]);
    }

    #[test]
    fn test_parse_authors_when_elements_invalid_expect_indexes_skipped() {
        let contents = r#"[
            {"surname": "Wolfe", "name": "Gene"},
            "not an author",
            {"surname": "Vance"},
            {"surname": "  ", "name": "Jack"}
        ]"#;
        let actual = parse_authors(contents).unwrap();
        assert_eq!(actual.records.len(), 1);
        assert_eq!(actual.skipped, vec![2, 3, 4]);
    }

    #[test]
    fn test_parse_authors_when_top_level_object_expect_error() {
        assert!(parse_authors(r#"{"surname": "Wolfe", "name": "Gene"}"#).is_err());
        assert!(parse_authors("[").is_err());
    }
}
