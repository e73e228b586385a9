use crate::common;
use biblio::db::models::author::Manager as _;
use biblio::db::models::genre::Manager as _;
use biblio::db::models::publisher::Manager as _;
use biblio::import::{self, ImportSummary};
use std::fs::write;

#[async_std::test]
async fn test_import_publishers_expect_valid_rows_inserted_and_blank_skipped() {
    let catalog = common::initialize().await;
    let path = catalog.path("publishers.csv");
    write(
        &path,
        "name,address,phone,email,website\nOrbit,London,,orbit@example.com,\n,Nowhere,,,\nDAW,New York,555-0100,,\n",
    )
    .unwrap();

    let actual = import::import_publishers(&catalog.conn, &path).await.unwrap();

    assert_eq!(
        actual,
        ImportSummary {
            inserted: 2,
            skipped: vec![2],
        }
    );
    let publishers = catalog.conn.find_all_publishers().await.unwrap();
    let names: Vec<_> = publishers.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["DAW", "Orbit"]);
    assert_eq!(publishers[0].phone_number.as_deref(), Some("555-0100"));
}

#[async_std::test]
async fn test_import_authors_expect_inactive_authors_hidden_from_active_list() {
    let catalog = common::initialize().await;
    let path = catalog.path("authors.json");
    write(
        &path,
        r#"[
            {"surname": "Butler", "name": "Octavia", "email": "ob@example.com"},
            {"surname": "Russ", "name": "Joanna", "is_active": 0},
            {"name": "Nobody"}
        ]"#,
    )
    .unwrap();

    let actual = import::import_authors(&catalog.conn, &path).await.unwrap();

    assert_eq!(actual.inserted, 2);
    assert_eq!(actual.skipped, vec![3]);
    assert_eq!(catalog.conn.find_all_authors(false).await.unwrap().len(), 2);
    let active = catalog.conn.find_all_authors(true).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].full_name(), "Butler Octavia");
}

#[async_std::test]
async fn test_import_genres_expect_sorted_genres() {
    let catalog = common::initialize().await;
    let path = catalog.path("genres.xml");
    write(
        &path,
        r#"<?xml version="1.0"?><genres><genre name="Space opera"/><genre>Cyberpunk</genre><genre/></genres>"#,
    )
    .unwrap();

    let actual = import::import_genres(&catalog.conn, &path).await.unwrap();

    assert_eq!(actual.inserted, 2);
    assert_eq!(actual.skipped, vec![3]);
    let names: Vec<_> = catalog
        .conn
        .find_all_genres()
        .await
        .unwrap()
        .into_iter()
        .map(|genre| genre.name)
        .collect();
    assert_eq!(names, vec!["Cyberpunk", "Space opera"]);
}

#[async_std::test]
async fn test_import_authors_when_not_an_array_expect_error_and_nothing_inserted() {
    let catalog = common::initialize().await;
    let path = catalog.path("authors.json");
    write(&path, r#"{"surname": "Butler", "name": "Octavia"}"#).unwrap();

    assert!(import::import_authors(&catalog.conn, &path).await.is_err());
    assert!(catalog.conn.find_all_authors(false).await.unwrap().is_empty());
}

#[async_std::test]
async fn test_import_publishers_when_file_missing_expect_error() {
    let catalog = common::initialize().await;
    let actual = import::import_publishers(&catalog.conn, &catalog.path("nope.csv")).await;
    assert!(actual.is_err());
}
