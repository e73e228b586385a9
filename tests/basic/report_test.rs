use crate::common;
use biblio::catalog;
use biblio::db::models::report::{Manager as _, PublisherReport};

#[async_std::test]
async fn test_publisher_report_expect_counts_average_and_active_authors() {
    let catalog = common::initialize().await;
    let conn = &catalog.conn;
    let busy = common::add_publisher(conn, "Bantam").await;
    common::add_publisher(conn, "Arkham House").await;
    let first = common::add_author(conn, "Delany", "Samuel").await;
    let second = common::add_author(conn, "Ellison", "Harlan").await;
    let mut rated = common::book_form("Dhalgren", busy);
    rated.rating = "4".into();
    let dhalgren = catalog::create_book(conn, &rated, &[first, second])
        .await
        .unwrap();
    rated.name = "Nova".into();
    rated.rating = "5".into();
    catalog::create_book(conn, &rated, &[first]).await.unwrap();
    let unrated = common::book_form("Triton", busy);
    catalog::create_book(conn, &unrated, &[]).await.unwrap();
    catalog::deactivate_authors_for_author(conn, dhalgren, second)
        .await
        .unwrap();

    let actual = conn.find_publisher_report().await.unwrap();

    assert_eq!(
        actual,
        vec![
            PublisherReport {
                publisher_name: "Arkham House".into(),
                books_count: 0,
                avg_rating: None,
                active_authors: 0,
            },
            PublisherReport {
                publisher_name: "Bantam".into(),
                books_count: 3,
                avg_rating: Some(4.5),
                active_authors: 1,
            },
        ]
    );
}
