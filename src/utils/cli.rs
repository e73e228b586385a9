//! Running the CLI

// Allow exits because in this file we ideally handle all errors with known exit codes
#![allow(clippy::exit)]

use crate::catalog::{self, BookForm};
use crate::config::{Config, Driver, DEFAULT_CONFIG_PATH};
use crate::db::models::author::{Author, Manager as _, NewAuthor};
use crate::db::models::book::Manager as _;
use crate::db::models::book_author::Manager as _;
use crate::db::models::genre::Manager as _;
use crate::db::models::publisher::{Manager as _, NewPublisher};
use crate::db::models::report::Manager as _;
use crate::db::{init, DatabaseConnection};
use crate::import::{self, ImportSummary};
use clap::Parser;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Biblio keeps a small library's catalog: books, the authors credited
/// for them, publishers and genres.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the settings file.
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,
    /// Biblio cli subcommands
    #[command(subcommand)]
    subcommands: Subcommands,
}

#[derive(Clone, clap::Subcommand)]
enum Subcommands {
    /// Create or upgrade the catalog schema.
    Init,
    /// Browse and edit books.
    Books {
        #[command(subcommand)]
        command: BookCommand,
    },
    /// Move credit for a book from one author to another.
    Transfer {
        /// Book id.
        book: i64,
        /// Author currently credited.
        from: i64,
        /// Author to credit instead.
        to: i64,
    },
    /// Browse and add authors.
    Authors {
        #[command(subcommand)]
        command: AuthorCommand,
    },
    /// Browse and edit publishers.
    Publishers {
        #[command(subcommand)]
        command: PublisherCommand,
    },
    /// Browse genres.
    Genres {
        #[command(subcommand)]
        command: GenreCommand,
    },
    /// Load reference data from a file.
    Import {
        #[command(subcommand)]
        command: ImportCommand,
    },
    /// Per-publisher statistics.
    Report,
    /// Show or change the settings file.
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

#[derive(Clone, clap::Subcommand)]
enum BookCommand {
    /// List all books.
    List,
    /// Show one book with its current authors.
    Show { id: i64 },
    /// Add a book.
    Add(BookArgs),
    /// Overwrite a book. The given authors replace the current ones.
    Edit {
        id: i64,
        #[command(flatten)]
        book: BookArgs,
    },
    /// Delete a book together with its authorship history.
    Delete { id: i64 },
    /// Current authors of a book.
    Authors {
        id: i64,
        /// Include revoked authorship.
        #[arg(long)]
        all: bool,
    },
    /// Revoke every current author of a book.
    ClearAuthors { id: i64 },
    /// Revoke one author of a book.
    RemoveAuthor { id: i64, author: i64 },
}

#[derive(Clone, clap::Args)]
struct BookArgs {
    /// Title.
    #[arg(long)]
    name: String,
    /// Publisher id.
    #[arg(long)]
    publisher: Option<i64>,
    /// Publication date, YYYY-MM-DD.
    #[arg(long, default_value = "")]
    date: String,
    /// Rating between 0 and 5.
    #[arg(long, default_value = "")]
    rating: String,
    /// hardcover, paperback or ebook.
    #[arg(long)]
    binding: String,
    /// Author id, repeatable.
    #[arg(long = "author")]
    authors: Vec<i64>,
}

impl From<BookArgs> for BookForm {
    fn from(args: BookArgs) -> Self {
        Self {
            name: args.name,
            publisher: args.publisher,
            publishment_date: args.date,
            rating: args.rating,
            binding: args.binding,
        }
    }
}

#[derive(Clone, clap::Subcommand)]
enum AuthorCommand {
    /// List authors.
    List {
        /// Only authors that may be assigned to books.
        #[arg(long)]
        active_only: bool,
    },
    /// Add an author.
    Add {
        #[arg(long)]
        surname: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
        /// Add the author as not assignable.
        #[arg(long)]
        inactive: bool,
    },
}

#[derive(Clone, clap::Subcommand)]
enum PublisherCommand {
    /// List publishers.
    List,
    /// Add a publisher.
    Add(PublisherArgs),
    /// Overwrite a publisher.
    Edit {
        id: i64,
        #[command(flatten)]
        publisher: PublisherArgs,
    },
    /// Delete a publisher without books.
    Delete { id: i64 },
}

#[derive(Clone, clap::Args)]
struct PublisherArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    website: Option<String>,
}

impl From<PublisherArgs> for NewPublisher {
    fn from(args: PublisherArgs) -> Self {
        Self {
            name: args.name,
            address: args.address,
            phone_number: args.phone,
            email: args.email,
            website: args.website,
        }
    }
}

#[derive(Clone, clap::Subcommand)]
enum GenreCommand {
    /// List genres.
    List,
}

#[derive(Clone, clap::Subcommand)]
enum ImportCommand {
    /// Publishers from a CSV file with a header row.
    Publishers { file: PathBuf },
    /// Authors from a JSON array.
    Authors { file: PathBuf },
    /// Genres from `<genre>` elements of an XML file.
    Genres { file: PathBuf },
}

#[derive(Clone, clap::Subcommand)]
enum SettingsCommand {
    /// Print the settings, password hidden.
    Show,
    /// Change settings and rewrite the settings file.
    Set {
        /// sqlite or postgres.
        #[arg(long)]
        driver: Option<String>,
        /// host[:port] of the database server.
        #[arg(long)]
        server: Option<String>,
        /// Database name, or database file for sqlite.
        #[arg(long)]
        database: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        encrypt: Option<bool>,
        #[arg(long)]
        trust_server_certificate: Option<bool>,
    },
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Main entrypoint to application
pub fn run() {
    let cli = Cli::parse();
    let config_path = PathBuf::from(&cli.config);
    let loaded = Config::load_or_default(&config_path);
    init_tracing(
        loaded
            .as_ref()
            .map_or("info", |config| config.app.log_level.as_str()),
    );
    tracing::debug!("Starting application");
    let config = recover_config(loaded, &cli.subcommands, &config_path);
    let outcome = config.and_then(|loaded| {
        async_std::task::block_on(execute(cli.subcommands, loaded, &config_path))
    });
    if let Err(err) = outcome {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

/// `settings set` starts from defaults when the settings file does not parse,
/// so a broken file can be rewritten. Every other command keeps the error.
fn recover_config(
    loaded: anyhow::Result<Config>,
    command: &Subcommands,
    path: &Path,
) -> anyhow::Result<Config> {
    match loaded {
        Err(err)
            if matches!(
                command,
                Subcommands::Settings {
                    command: SettingsCommand::Set { .. }
                }
            ) =>
        {
            tracing::warn!("Ignoring unreadable settings file {}: {err:#}", path.display());
            Ok(Config::default())
        }
        loaded => loaded,
    }
}

async fn execute(command: Subcommands, config: Config, config_path: &Path) -> anyhow::Result<()> {
    if let Subcommands::Settings { command } = command {
        return settings(command, config, config_path);
    }
    let conn = init::connect(&config).await?;
    match command {
        Subcommands::Init => println!("Catalog schema is up to date"),
        Subcommands::Books { command } => books(&conn, command).await?,
        Subcommands::Transfer { book, from, to } => {
            catalog::transfer_authorship(&conn, book, from, to).await?;
            println!("Book {book}: authorship moved from author {from} to author {to}");
        }
        Subcommands::Authors { command } => authors(&conn, command).await?,
        Subcommands::Publishers { command } => publishers(&conn, command).await?,
        Subcommands::Genres {
            command: GenreCommand::List,
        } => {
            for genre in conn.find_all_genres().await? {
                println!("{:>5}  {}", genre.id, genre.name);
            }
        }
        Subcommands::Import { command } => {
            let summary = match command {
                ImportCommand::Publishers { file } => {
                    import::import_publishers(&conn, &file).await?
                }
                ImportCommand::Authors { file } => import::import_authors(&conn, &file).await?,
                ImportCommand::Genres { file } => import::import_genres(&conn, &file).await?,
            };
            print_summary(&summary);
        }
        Subcommands::Report => {
            println!("{:<30} {:>6} {:>7} {:>8}", "Publisher", "Books", "Rating", "Authors");
            for row in conn.find_publisher_report().await? {
                println!(
                    "{:<30} {:>6} {:>7} {:>8}",
                    row.publisher_name,
                    row.books_count,
                    row.avg_rating
                        .map_or_else(|| "-".to_owned(), |avg| format!("{avg:.2}")),
                    row.active_authors
                );
            }
        }
        Subcommands::Settings { .. } => {}
    }
    Ok(())
}

async fn books(conn: &DatabaseConnection, command: BookCommand) -> anyhow::Result<()> {
    match command {
        BookCommand::List => {
            println!(
                "{:>5}  {:<40} {:>9} {:<10} {:>6} {}",
                "Id", "Name", "Publisher", "Date", "Rating", "Binding"
            );
            for book in conn.find_all_books().await? {
                println!(
                    "{:>5}  {:<40} {:>9} {:<10} {:>6} {}",
                    book.id,
                    book.name,
                    book.publisher,
                    or_dash(book.publishment_date),
                    or_dash(book.rating),
                    book.binding
                );
            }
        }
        BookCommand::Show { id } => {
            let book = catalog::find_book(conn, id).await?;
            let publisher = conn
                .find_publisher_by_id(book.publisher)
                .await?
                .map_or_else(|| book.publisher.to_string(), |publisher| publisher.name);
            println!("Id:        {}", book.id);
            println!("Name:      {}", book.name);
            println!("Publisher: {publisher}");
            println!("Date:      {}", or_dash(book.publishment_date));
            println!("Rating:    {}", or_dash(book.rating));
            println!("Binding:   {}", book.binding);
            let names = author_names(conn).await?;
            for author_id in conn.fetch_active_authors(id).await? {
                println!("Author:    {}", display_author(&names, author_id));
            }
        }
        BookCommand::Add(args) => {
            let authors = args.authors.clone();
            let id = catalog::create_book(conn, &args.into(), &authors).await?;
            println!("Added book {id}");
        }
        BookCommand::Edit { id, book } => {
            let authors = book.authors.clone();
            catalog::update_book(conn, id, &book.into(), &authors).await?;
            println!("Updated book {id}");
        }
        BookCommand::Delete { id } => {
            catalog::delete_book(conn, id).await?;
            println!("Deleted book {id}");
        }
        BookCommand::Authors { id, all } => {
            let names = author_names(conn).await?;
            if all {
                for link in conn.find_links_by_book(id).await? {
                    let state = if link.is_active { "active" } else { "revoked" };
                    println!("{:<8} {}", state, display_author(&names, link.author_id));
                }
            } else {
                for author_id in conn.fetch_active_authors(id).await? {
                    println!("{}", display_author(&names, author_id));
                }
            }
        }
        BookCommand::ClearAuthors { id } => {
            let revoked = catalog::deactivate_authors(conn, id).await?;
            println!("Revoked {revoked} author(s) of book {id}");
        }
        BookCommand::RemoveAuthor { id, author } => {
            let revoked = catalog::deactivate_authors_for_author(conn, id, author).await?;
            if revoked == 0 {
                println!("Author {author} is not credited for book {id}");
            } else {
                println!("Revoked author {author} of book {id}");
            }
        }
    }
    Ok(())
}

async fn authors(conn: &DatabaseConnection, command: AuthorCommand) -> anyhow::Result<()> {
    match command {
        AuthorCommand::List { active_only } => {
            for author in conn.find_all_authors(active_only).await? {
                println!(
                    "{:>5}  {:<40} {:<30} {}",
                    author.id,
                    author.full_name(),
                    or_dash(author.email.clone()),
                    if author.is_active { "" } else { "inactive" }
                );
            }
        }
        AuthorCommand::Add {
            surname,
            name,
            email,
            inactive,
        } => {
            let author = NewAuthor {
                surname,
                name,
                email,
                is_active: !inactive,
            };
            let id = catalog::create_author(conn, &author).await?;
            println!("Added author {id}");
        }
    }
    Ok(())
}

async fn publishers(conn: &DatabaseConnection, command: PublisherCommand) -> anyhow::Result<()> {
    match command {
        PublisherCommand::List => {
            for publisher in conn.find_all_publishers().await? {
                println!(
                    "{:>5}  {:<30} {:<20} {:<30} {}",
                    publisher.id,
                    publisher.name,
                    or_dash(publisher.phone_number),
                    or_dash(publisher.email),
                    or_dash(publisher.website)
                );
            }
        }
        PublisherCommand::Add(args) => {
            let id = catalog::create_publisher(conn, &args.into()).await?;
            println!("Added publisher {id}");
        }
        PublisherCommand::Edit { id, publisher } => {
            catalog::update_publisher(conn, id, &publisher.into()).await?;
            println!("Updated publisher {id}");
        }
        PublisherCommand::Delete { id } => {
            catalog::delete_publisher(conn, id).await?;
            println!("Deleted publisher {id}");
        }
    }
    Ok(())
}

fn settings(command: SettingsCommand, mut config: Config, config_path: &Path) -> anyhow::Result<()> {
    match command {
        SettingsCommand::Show => {
            if !config.database.password.is_empty() {
                config.database.password = "***".to_owned();
            }
            print!("{}", toml::to_string_pretty(&config)?);
        }
        SettingsCommand::Set {
            driver,
            server,
            database,
            username,
            password,
            encrypt,
            trust_server_certificate,
        } => {
            let db = &mut config.database;
            if let Some(driver) = driver {
                db.driver = Driver::from_string(&driver)?;
            }
            for (value, setting) in [
                (server, &mut db.server),
                (database, &mut db.database),
                (username, &mut db.username),
                (password, &mut db.password),
            ] {
                if let Some(value) = value {
                    *setting = value;
                }
            }
            if let Some(encrypt) = encrypt {
                db.encrypt = encrypt;
            }
            if let Some(trust) = trust_server_certificate {
                db.trust_server_certificate = trust;
            }
            config.save(config_path)?;
            println!("Settings saved. Restart to apply them.");
        }
    }
    Ok(())
}

async fn author_names(conn: &DatabaseConnection) -> anyhow::Result<BTreeMap<i64, Author>> {
    Ok(conn
        .find_all_authors(false)
        .await?
        .into_iter()
        .map(|author| (author.id, author))
        .collect())
}

fn display_author(authors: &BTreeMap<i64, Author>, author_id: i64) -> String {
    authors.get(&author_id).map_or_else(
        || format!("#{author_id}"),
        |author| format!("#{author_id} {}", author.full_name()),
    )
}

fn print_summary(summary: &ImportSummary) {
    println!("Imported {} record(s)", summary.inserted);
    if !summary.skipped.is_empty() {
        let positions: Vec<_> = summary.skipped.iter().map(ToString::to_string).collect();
        println!("Skipped entries: {}", positions.join(", "));
    }
}

fn or_dash<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_owned(), |value| value.to_string())
}
