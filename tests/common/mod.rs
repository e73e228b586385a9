use biblio::catalog::{self, BookForm};
use biblio::config::{AppConfig, Config, DatabaseConfig, Driver};
use biblio::db::models::author::NewAuthor;
use biblio::db::models::publisher::NewPublisher;
use biblio::db::{init, DatabaseConnection};
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// A migrated catalog in a scratch `SQLite` file.
///
/// The directory is removed when the value is dropped, so keep it alive for
/// the whole test.
pub struct TestCatalog {
    pub conn: DatabaseConnection,
    dir: TempDir,
}

impl TestCatalog {
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.dir.path().join(file_name)
    }
}

pub fn sqlite_config(dir: &Path) -> Config {
    Config {
        database: DatabaseConfig {
            driver: Driver::Sqlite,
            database: dir.join("library.sqlite3").display().to_string(),
            ..DatabaseConfig::default()
        },
        app: AppConfig::default(),
    }
}

pub async fn initialize() -> TestCatalog {
    let dir = tempdir().unwrap();
    let conn = init::connect(&sqlite_config(dir.path())).await.unwrap();
    TestCatalog { conn, dir }
}

pub async fn add_publisher(conn: &DatabaseConnection, name: &str) -> i64 {
    catalog::create_publisher(conn, &NewPublisher::named(name))
        .await
        .unwrap()
}

pub async fn add_author(conn: &DatabaseConnection, surname: &str, name: &str) -> i64 {
    let author = NewAuthor {
        surname: surname.into(),
        name: name.into(),
        email: None,
        is_active: true,
    };
    catalog::create_author(conn, &author).await.unwrap()
}

pub fn book_form(name: &str, publisher: i64) -> BookForm {
    BookForm {
        name: name.into(),
        publisher: Some(publisher),
        binding: "paperback".into(),
        ..BookForm::default()
    }
}

/// A book by `authors` from a fresh publisher.
pub async fn add_book(conn: &DatabaseConnection, name: &str, authors: &[i64]) -> i64 {
    let publisher = add_publisher(conn, &format!("{name} Press")).await;
    catalog::create_book(conn, &book_form(name, publisher), authors)
        .await
        .unwrap()
}
