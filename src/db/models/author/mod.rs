use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{any::AnyRow, FromRow, Row as _};

pub mod manager;

/// Trait for managing authors.
#[async_trait]
pub trait Manager {
    /// Find all authors sorted by surname and name.
    /// With `active_only` only authors that may be newly assigned are returned.
    async fn find_all_authors(&self, active_only: bool) -> anyhow::Result<Vec<Author>>;
    /// Find an author by id.
    async fn find_author_by_id(&self, id: i64) -> anyhow::Result<Option<Author>>;
}

/// Trait for managing transactional authors.
#[async_trait]
pub trait TxManager {
    /// Insert a single author and return its id.
    async fn create_author(&mut self, author: &NewAuthor) -> anyhow::Result<i64>;
    /// Insert a bulk of authors.
    async fn insert_bulk(&mut self, authors: Vec<NewAuthor>) -> anyhow::Result<()>;
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// Model for an author.
pub struct Author {
    /// Surrogate key.
    pub id: i64,
    /// Family name.
    pub surname: String,
    /// Given name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Whether the author is eligible to be newly assigned to books.
    pub is_active: bool,
}

impl FromRow<'_, AnyRow> for Author {
    fn from_row(row: &AnyRow) -> anyhow::Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            surname: row.try_get("surname")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            is_active: row.try_get::<i64, _>("is_active")? != 0,
        })
    }
}

impl Author {
    /// "Surname Name", the way authors are listed.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.surname, self.name)
    }
}

/// An author that is not stored yet.
///
/// Deserializes from the objects of an author import file, where
/// `is_active` may be missing (active), a boolean, or `0`/`1`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    /// Family name.
    pub surname: String,
    /// Given name.
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Whether the author may be newly assigned to books.
    #[serde(default = "default_active", deserialize_with = "flag")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

/// Accept `true`/`false` as well as integer flags.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }
    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
    })
}
