use crate::common;
use biblio::catalog::{self, CatalogError};
use biblio::db::models::book_author::Manager as _;
use std::collections::BTreeSet;

#[async_std::test]
async fn test_assign_authors_when_repeated_with_overwrite_expect_single_active_row() {
    let catalog = common::initialize().await;
    let conn = &catalog.conn;
    let author = common::add_author(conn, "Herbert", "Frank").await;
    let book = common::add_book(conn, "Dune", &[]).await;

    catalog::assign_authors(conn, book, &[author], true).await.unwrap();
    catalog::assign_authors(conn, book, &[author], true).await.unwrap();

    let links = conn.find_links_by_book(book).await.unwrap();
    assert_eq!(links.len(), 1);
    assert!(links[0].is_active);
    assert_eq!(
        conn.fetch_active_authors(book).await.unwrap(),
        BTreeSet::from([author])
    );
}

#[async_std::test]
async fn test_assign_authors_when_not_overwriting_expect_union() {
    let catalog = common::initialize().await;
    let conn = &catalog.conn;
    let first = common::add_author(conn, "Pratchett", "Terry").await;
    let second = common::add_author(conn, "Gaiman", "Neil").await;
    let book = common::add_book(conn, "Good Omens", &[first]).await;

    catalog::assign_authors(conn, book, &[second, second], false)
        .await
        .unwrap();

    assert_eq!(
        conn.fetch_active_authors(book).await.unwrap(),
        BTreeSet::from([first, second])
    );
    assert_eq!(conn.find_links_by_book(book).await.unwrap().len(), 2);
}

#[async_std::test]
async fn test_assign_authors_when_overwriting_expect_exact_set_and_history_kept() {
    let catalog = common::initialize().await;
    let conn = &catalog.conn;
    let first = common::add_author(conn, "Strugatsky", "Arkady").await;
    let second = common::add_author(conn, "Strugatsky", "Boris").await;
    let book = common::add_book(conn, "Roadside Picnic", &[first]).await;

    catalog::assign_authors(conn, book, &[second], true)
        .await
        .unwrap();

    assert_eq!(
        conn.fetch_active_authors(book).await.unwrap(),
        BTreeSet::from([second])
    );
    let links = conn.find_links_by_book(book).await.unwrap();
    let revoked: Vec<_> = links.iter().filter(|l| !l.is_active).map(|l| l.author_id).collect();
    assert_eq!(revoked, vec![first]);
}

#[async_std::test]
async fn test_assign_authors_when_empty_with_overwrite_expect_no_active_authors() {
    let catalog = common::initialize().await;
    let conn = &catalog.conn;
    let author = common::add_author(conn, "Lem", "Stanisław").await;
    let book = common::add_book(conn, "Solaris", &[author]).await;

    catalog::assign_authors(conn, book, &[], true).await.unwrap();

    assert!(conn.fetch_active_authors(book).await.unwrap().is_empty());
    assert_eq!(conn.find_links_by_book(book).await.unwrap().len(), 1);
}

#[async_std::test]
async fn test_deactivate_authors_expect_no_active_authors() {
    let catalog = common::initialize().await;
    let conn = &catalog.conn;
    let first = common::add_author(conn, "Niven", "Larry").await;
    let second = common::add_author(conn, "Pournelle", "Jerry").await;
    let book = common::add_book(conn, "The Mote in God's Eye", &[first, second]).await;

    let revoked = catalog::deactivate_authors(conn, book).await.unwrap();

    assert_eq!(revoked, 2);
    assert!(conn.fetch_active_authors(book).await.unwrap().is_empty());
    assert!(conn
        .find_links_by_book(book)
        .await
        .unwrap()
        .iter()
        .all(|link| !link.is_active));
}

#[async_std::test]
async fn test_deactivate_authors_for_author_when_not_credited_expect_noop() {
    let catalog = common::initialize().await;
    let conn = &catalog.conn;
    let author = common::add_author(conn, "Zelazny", "Roger").await;
    let stranger = common::add_author(conn, "Delany", "Samuel").await;
    let book = common::add_book(conn, "Lord of Light", &[author]).await;

    let revoked = catalog::deactivate_authors_for_author(conn, book, stranger)
        .await
        .unwrap();

    assert_eq!(revoked, 0);
    assert_eq!(
        conn.fetch_active_authors(book).await.unwrap(),
        BTreeSet::from([author])
    );
}

#[async_std::test]
async fn test_transfer_authorship_expect_from_replaced_by_to_and_history_kept() {
    let catalog = common::initialize().await;
    let conn = &catalog.conn;
    let from = common::add_author(conn, "Bachman", "Richard").await;
    let to = common::add_author(conn, "King", "Stephen").await;
    let other = common::add_author(conn, "Straub", "Peter").await;
    let book = common::add_book(conn, "The Talisman", &[from, other]).await;

    catalog::transfer_authorship(conn, book, from, to)
        .await
        .unwrap();

    assert_eq!(
        conn.fetch_active_authors(book).await.unwrap(),
        BTreeSet::from([to, other])
    );
    let links = conn.find_links_by_book(book).await.unwrap();
    let history = links.iter().find(|link| link.author_id == from).unwrap();
    assert!(!history.is_active);
}

#[async_std::test]
async fn test_transfer_authorship_when_to_was_revoked_expect_row_reactivated() {
    let catalog = common::initialize().await;
    let conn = &catalog.conn;
    let first = common::add_author(conn, "Moorcock", "Michael").await;
    let second = common::add_author(conn, "Ballard", "J. G.").await;
    let book = common::add_book(conn, "New Worlds", &[first, second]).await;
    catalog::deactivate_authors_for_author(conn, book, second)
        .await
        .unwrap();

    catalog::transfer_authorship(conn, book, first, second)
        .await
        .unwrap();

    assert_eq!(
        conn.fetch_active_authors(book).await.unwrap(),
        BTreeSet::from([second])
    );
    assert_eq!(conn.find_links_by_book(book).await.unwrap().len(), 2);
}

#[async_std::test]
async fn test_transfer_authorship_when_same_author_expect_unchanged() {
    let catalog = common::initialize().await;
    let conn = &catalog.conn;
    let author = common::add_author(conn, "Wolfe", "Gene").await;
    let book = common::add_book(conn, "The Shadow of the Torturer", &[author]).await;

    catalog::transfer_authorship(conn, book, author, author)
        .await
        .unwrap();

    assert_eq!(
        conn.fetch_active_authors(book).await.unwrap(),
        BTreeSet::from([author])
    );
    assert_eq!(conn.find_links_by_book(book).await.unwrap().len(), 1);
}

#[async_std::test]
async fn test_transfer_authorship_when_to_missing_expect_rollback() {
    let catalog = common::initialize().await;
    let conn = &catalog.conn;
    let author = common::add_author(conn, "Tiptree", "James").await;
    let book = common::add_book(conn, "Her Smoke Rose Up Forever", &[author]).await;

    let actual = catalog::transfer_authorship(conn, book, author, 9999)
        .await
        .unwrap_err();

    assert!(matches!(actual, CatalogError::Database(_)), "{actual:?}");
    assert_eq!(
        conn.fetch_active_authors(book).await.unwrap(),
        BTreeSet::from([author])
    );
    let links = conn.find_links_by_book(book).await.unwrap();
    assert_eq!(links.len(), 1);
    assert!(links[0].is_active);
}
