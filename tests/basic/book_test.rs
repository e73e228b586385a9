use crate::common;
use biblio::catalog::{self, BookForm, CatalogError, ValidationError};
use biblio::db::models::binding::Binding;
use biblio::db::models::book::Manager as _;
use biblio::db::models::book_author::Manager as _;
use std::collections::BTreeSet;

#[async_std::test]
async fn test_create_book_expect_normalized_fields_and_authors() {
    let catalog = common::initialize().await;
    let conn = &catalog.conn;
    let publisher = common::add_publisher(conn, "Ace").await;
    let author = common::add_author(conn, "Le Guin", "Ursula").await;
    let form = BookForm {
        name: "  The Left Hand of Darkness ".into(),
        publisher: Some(publisher),
        publishment_date: "1969-3-1".into(),
        rating: " 4.5 ".into(),
        binding: "hardcover".into(),
    };

    let id = catalog::create_book(conn, &form, &[author]).await.unwrap();

    let book = catalog::find_book(conn, id).await.unwrap();
    assert_eq!(book.name, "The Left Hand of Darkness");
    assert_eq!(book.publisher, publisher);
    assert_eq!(book.publishment_date.as_deref(), Some("1969-03-01"));
    assert_eq!(book.rating, Some(4.5));
    assert_eq!(book.binding, Binding::Hardcover);
    assert_eq!(
        conn.fetch_active_authors(id).await.unwrap(),
        BTreeSet::from([author])
    );
}

#[async_std::test]
async fn test_create_book_when_rating_out_of_range_expect_nothing_written() {
    let catalog = common::initialize().await;
    let conn = &catalog.conn;
    let publisher = common::add_publisher(conn, "Tor").await;
    let mut form = common::book_form("Hyperion", publisher);
    form.rating = "5.1".into();

    let actual = catalog::create_book(conn, &form, &[]).await.unwrap_err();

    assert!(matches!(
        actual,
        CatalogError::Validation(ValidationError::RatingOutOfRange(_))
    ));
    assert!(conn.find_all_books().await.unwrap().is_empty());
}

#[async_std::test]
async fn test_create_book_when_author_missing_expect_book_rolled_back() {
    let catalog = common::initialize().await;
    let conn = &catalog.conn;
    let publisher = common::add_publisher(conn, "Gollancz").await;
    let form = common::book_form("Consider Phlebas", publisher);

    let actual = catalog::create_book(conn, &form, &[4242]).await;

    assert!(actual.is_err());
    assert!(conn.find_all_books().await.unwrap().is_empty());
}

#[async_std::test]
async fn test_update_book_expect_fields_overwritten_and_authors_replaced() {
    let catalog = common::initialize().await;
    let conn = &catalog.conn;
    let first = common::add_author(conn, "Asimov", "Isaac").await;
    let second = common::add_author(conn, "Silverberg", "Robert").await;
    let id = common::add_book(conn, "Nightfall", &[first]).await;
    let book = catalog::find_book(conn, id).await.unwrap();
    let mut form = common::book_form("Nightfall (novel)", book.publisher);
    form.binding = "ebook".into();

    catalog::update_book(conn, id, &form, &[first, second])
        .await
        .unwrap();
    catalog::update_book(conn, id, &form, &[second])
        .await
        .unwrap();

    let book = catalog::find_book(conn, id).await.unwrap();
    assert_eq!(book.name, "Nightfall (novel)");
    assert_eq!(book.binding, Binding::Ebook);
    assert_eq!(book.rating, None);
    assert_eq!(
        conn.fetch_active_authors(id).await.unwrap(),
        BTreeSet::from([second])
    );
    assert_eq!(conn.find_links_by_book(id).await.unwrap().len(), 2);
}

#[async_std::test]
async fn test_update_book_when_missing_expect_not_found_and_nothing_written() {
    let catalog = common::initialize().await;
    let conn = &catalog.conn;
    let publisher = common::add_publisher(conn, "Baen").await;
    let author = common::add_author(conn, "Bujold", "Lois").await;
    let form = common::book_form("Shards of Honor", publisher);

    let actual = catalog::update_book(conn, 777, &form, &[author])
        .await
        .unwrap_err();

    assert!(
        matches!(actual, CatalogError::NotFound { entity: "Book", id: 777 }),
        "{actual:?}"
    );
    assert!(conn.find_links_by_book(777).await.unwrap().is_empty());
}

#[async_std::test]
async fn test_delete_book_expect_book_and_all_links_removed() {
    let catalog = common::initialize().await;
    let conn = &catalog.conn;
    let first = common::add_author(conn, "Simak", "Clifford").await;
    let second = common::add_author(conn, "Sturgeon", "Theodore").await;
    let id = common::add_book(conn, "City", &[first, second]).await;
    catalog::deactivate_authors_for_author(conn, id, second)
        .await
        .unwrap();

    catalog::delete_book(conn, id).await.unwrap();

    assert!(conn.find_book_by_id(id).await.unwrap().is_none());
    assert!(conn.find_links_by_book(id).await.unwrap().is_empty());
    assert!(matches!(
        catalog::find_book(conn, id).await,
        Err(CatalogError::NotFound { .. })
    ));
}

#[async_std::test]
async fn test_delete_book_when_missing_expect_not_found() {
    let catalog = common::initialize().await;
    let actual = catalog::delete_book(&catalog.conn, 12).await.unwrap_err();
    assert!(matches!(actual, CatalogError::NotFound { id: 12, .. }));
}

#[async_std::test]
async fn test_delete_publisher_when_books_reference_it_expect_error_and_kept() {
    let catalog = common::initialize().await;
    let conn = &catalog.conn;
    let id = common::add_book(conn, "Ubik", &[]).await;
    let book = catalog::find_book(conn, id).await.unwrap();

    assert!(catalog::delete_publisher(conn, book.publisher).await.is_err());
    assert!(conn.find_book_by_id(id).await.unwrap().is_some());
}

#[async_std::test]
async fn test_find_all_books_expect_ordered_by_name() {
    let catalog = common::initialize().await;
    let conn = &catalog.conn;
    common::add_book(conn, "Zodiac", &[]).await;
    common::add_book(conn, "Anathem", &[]).await;
    common::add_book(conn, "Cryptonomicon", &[]).await;

    let names: Vec<_> = conn
        .find_all_books()
        .await
        .unwrap()
        .into_iter()
        .map(|book| book.name)
        .collect();
    assert_eq!(names, vec!["Anathem", "Cryptonomicon", "Zodiac"]);
}
