//! # Biblio
//!
//! Catalog backend for a small library. It keeps books, authors, publishers
//! and genres in a relational database and maintains the authorship ledger:
//! the `book_author` relation in which every book-author pairing is kept
//! forever, and only the `is_active` flag says whether the author is
//! currently credited.
//!
//! The crate is organised leaf-first:
//!
//! - [`config`]: TOML settings passed explicitly to the connection provider.
//! - [`db`]: connection pool, transactions and per-table managers.
//! - [`catalog`]: validated, transactional user actions.
//! - [`import`]: CSV, JSON and XML bulk imports.
//! - [`utils::cli`]: the `biblio` command line front end.

// =========================================================================
//                  Canonical lints for whole crate
// =========================================================================
// Official docs:
//   https://doc.rust-lang.org/nightly/clippy/lints.html
// Useful app to lookup full details of individual lints:
//   https://rust-lang.github.io/rust-clippy/master/index.html
//
// We set base lints to give the fullest, most pedantic feedback possible.
// Though we prefer that they are just warnings during development so that build-denial
// is only enforced in CI.
//
#![warn(
    // `clippy::all` is already on by default. It implies the following:
    //   clippy::correctness code that is outright wrong or useless
    //   clippy::suspicious code that is most likely wrong or useless
    //   clippy::complexity code that does something simple but in a complex way
    //   clippy::perf code that can be written to run faster
    //   clippy::style code that should be written in a more idiomatic way
    clippy::all,

    // It's always good to write as much documentation as possible
    missing_docs,

    // > clippy::pedantic lints which are rather strict or might have false positives
    clippy::pedantic,

    // > new lints that are still under development"
    // (so "nursery" doesn't mean "Rust newbies")
    clippy::nursery,

    // > The clippy::cargo group gives you suggestions on how to improve your Cargo.toml file.
    // > This might be especially interesting if you want to publish your crate and are not sure
    // > if you have all useful information in your Cargo.toml.
    clippy::cargo
)]
// > The clippy::restriction group will restrict you in some way.
// > If you enable a restriction lint for your crate it is recommended to also fix code that
// > this lint triggers on. However, those lints are really strict by design and you might want
// > to #[allow] them in some special cases, with a comment justifying that.
#![allow(
    clippy::blanket_clippy_restriction_lints,
    reason = "See above explanation."
)]
#![warn(clippy::restriction)]
//
//
// =========================================================================
//   Individually blanket-allow single lints relevant to this whole crate
// =========================================================================
#![allow(clippy::implicit_return, reason = "This is idiomatic Rust")]
#![allow(
    clippy::multiple_crate_versions,
    reason = "sqlx pulls in several versions of its own transitive dependencies"
)]
#![allow(
    clippy::std_instead_of_alloc,
    reason = "We're not interested in becoming no-std compatible"
)]
#![allow(
    clippy::std_instead_of_core,
    reason = "Import items from std instead of core"
)]
#![allow(
    clippy::mod_module_files,
    reason = "Every model lives in `<model>/mod.rs` next to its `manager.rs`"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Every call ends in a database round-trip, inlining is irrelevant here"
)]
#![allow(
    clippy::exhaustive_structs,
    reason = "Models mirror table rows, new columns are a breaking change anyway"
)]
#![allow(
    clippy::exhaustive_enums,
    reason = "Bindings and error kinds are closed sets"
)]
#![allow(
    clippy::question_mark_used,
    reason = "We rely on propagating errors with question mark extensively"
)]
#![allow(
    clippy::semicolon_outside_block,
    reason = "Opt in to have semicolon in the outside block across codebase"
)]
#![allow(
    clippy::single_call_fn,
    reason = "We tend to break up long functions into smaller ones, so this lint is not useful"
)]
#![allow(
    clippy::arithmetic_side_effects,
    reason = "The only arithmetic is counting imported and skipped rows"
)]
#![allow(
    clippy::print_stdout,
    reason = "The CLI prints tables and confirmations to stdout"
)]
#![allow(
    clippy::arbitrary_source_item_ordering,
    reason = "Managers follow the order of the operations they implement, not the alphabet"
)]

pub mod catalog;
pub mod config;
pub mod db;
pub mod import;
pub mod utils;
