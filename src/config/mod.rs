//! Settings for the catalog, kept in a TOML file.
//!
//! The file is read once at startup and rewritten in full on save. Nothing
//! here is global: a loaded [`Config`] is handed to [`crate::db::init::connect`]
//! by whoever needs a connection, so a changed setting only takes effect for
//! connections opened after it was loaded.

use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::fs::{read_to_string, write};
use std::path::Path;
use url::Url;

/// Default location of the settings file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "biblio.toml";

/// Root settings object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// How to reach the catalog database.
    pub database: DatabaseConfig,
    /// Application behaviour.
    #[serde(default)]
    pub app: AppConfig,
}

/// Database backend supported by the connection provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    /// Local `SQLite` file.
    #[default]
    Sqlite,
    /// `PostgreSQL` server with password authentication.
    Postgres,
}

impl Driver {
    /// Parse a driver name as typed by a user.
    ///
    /// # Errors
    /// Errors if the name is not a supported driver.
    pub fn from_string(driver: &str) -> anyhow::Result<Self> {
        match driver.trim().to_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(anyhow::anyhow!(
                "Unsupported driver `{other}`, expected `sqlite` or `postgres`"
            )),
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Sqlite => write!(f, "sqlite"),
            Self::Postgres => write!(f, "postgres"),
        }
    }
}

/// Connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Backend driver.
    pub driver: Driver,
    /// `host[:port]` of the database server. Unused for `SQLite`.
    #[serde(default)]
    pub server: String,
    /// Database name, or the path of the database file for `SQLite`.
    pub database: String,
    /// Login name. Unused for `SQLite`.
    #[serde(default)]
    pub username: String,
    /// Login password. Unused for `SQLite`.
    #[serde(default)]
    pub password: String,
    /// Require an encrypted connection.
    #[serde(default)]
    pub encrypt: bool,
    /// Accept the server certificate without verifying it.
    #[serde(default = "default_true")]
    pub trust_server_certificate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: Driver::Sqlite,
            server: String::new(),
            database: "library.sqlite3".to_owned(),
            username: String::new(),
            password: String::new(),
            encrypt: false,
            trust_server_certificate: true,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Log level used when `RUST_LOG` is not set, e.g. `info` or `debug`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

const fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl Config {
    /// Read the settings file.
    ///
    /// # Errors
    /// Will error if the file cannot be read or is not valid settings TOML.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config_str = read_to_string(path).map_err(|err| {
            anyhow::anyhow!("Could not read settings file {}: {err}", path.display())
        })?;
        let conf: Self = toml::from_str(&config_str)?;
        Ok(conf)
    }

    /// Read the settings file, falling back to defaults when it does not exist.
    ///
    /// # Errors
    /// Will error if the file exists but cannot be parsed.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate and write the whole settings file.
    ///
    /// # Errors
    /// Will error if a required setting is missing or the file cannot be written.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        self.validate()?;
        let conf_str = toml::to_string_pretty(self)?;
        write(path, conf_str)?;
        tracing::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Names of required settings that are empty for the configured driver.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let db = &self.database;
        let mut required = vec![("database", &db.database)];
        if db.driver == Driver::Postgres {
            required.extend([
                ("server", &db.server),
                ("username", &db.username),
                ("password", &db.password),
            ]);
        }
        required
            .into_iter()
            .filter(|&(_, value)| value.trim().is_empty())
            .map(|(key, _)| key)
            .collect()
    }

    /// Check that every required setting is present.
    ///
    /// # Errors
    /// Lists the missing settings by name.
    pub fn validate(&self) -> anyhow::Result<()> {
        let missing = self.missing_keys();
        if !missing.is_empty() {
            anyhow::bail!("Missing required setting(s): {}", missing.join(", "));
        }
        Ok(())
    }

    /// Connection URL understood by the `sqlx` `Any` driver.
    ///
    /// # Errors
    /// Will error if a required setting is missing or the server address is invalid.
    pub fn database_url(&self) -> anyhow::Result<String> {
        self.validate()?;
        let db = &self.database;
        match db.driver {
            Driver::Sqlite => Ok(format!("sqlite://{}?mode=rwc", db.database.trim())),
            Driver::Postgres => {
                let mut url = Url::parse(&format!("postgres://{}", db.server.trim()))?;
                url.set_path(db.database.trim());
                url.set_username(db.username.trim())
                    .map_err(|()| anyhow::anyhow!("Invalid username for server {}", db.server))?;
                url.set_password(Some(&db.password))
                    .map_err(|()| anyhow::anyhow!("Invalid password for server {}", db.server))?;
                url.query_pairs_mut().append_pair("sslmode", self.ssl_mode());
                Ok(url.to_string())
            }
        }
    }

    const fn ssl_mode(&self) -> &'static str {
        match (self.database.encrypt, self.database.trust_server_certificate) {
            (false, _) => "prefer",
            (true, true) => "require",
            (true, false) => "verify-full",
        }
    }
}
