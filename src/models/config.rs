//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream catalog API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Destination database settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Batch behavior
    #[serde(default)]
    pub loader: LoaderConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides using `lookup` as the environment.
    ///
    /// Recognized keys: `CATALOG_API_URL`, `DATABASE_URL`, and the libpq
    /// variables `PGHOST`, `PGPORT`, `PGUSER`, `PGPASSWORD`, `PGDATABASE`.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup("CATALOG_API_URL") {
            self.api.base_url = url;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = Some(url);
        }
        if let Some(host) = lookup("PGHOST") {
            self.database.host = host;
        }
        if let Some(port) = lookup("PGPORT") {
            match port.parse() {
                Ok(port) => self.database.port = port,
                Err(_) => log::warn!("Ignoring non-numeric PGPORT value {:?}", port),
            }
        }
        if let Some(user) = lookup("PGUSER") {
            self.database.user = user;
        }
        if let Some(password) = lookup("PGPASSWORD") {
            self.database.password = Some(password);
        }
        if let Some(name) = lookup("PGDATABASE") {
            self.database.name = name;
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::validation("api.base_url is empty"));
        }
        let base = url::Url::parse(&self.api.base_url)
            .map_err(|e| AppError::validation(format!("api.base_url is not a URL: {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::validation("api.base_url must be http or https"));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.api.max_concurrent_characters == 0 {
            return Err(AppError::validation(
                "api.max_concurrent_characters must be > 0",
            ));
        }
        if self.api.max_concurrent_fetches == 0 {
            return Err(AppError::validation("api.max_concurrent_fetches must be > 0"));
        }
        if self.database.max_connections == 0 {
            return Err(AppError::validation("database.max_connections must be > 0"));
        }
        if self.database.url.is_none() && self.database.host.trim().is_empty() {
            return Err(AppError::validation("database.host is empty"));
        }
        if self.loader.max_pages == Some(0) {
            return Err(AppError::validation("loader.max_pages must be > 0 when set"));
        }
        Ok(())
    }
}

/// Upstream API and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Catalog root; category segments are appended to it
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Characters resolved at once within a page
    #[serde(default = "defaults::max_concurrent_characters")]
    pub max_concurrent_characters: usize,

    /// Reference URLs fetched at once within one list
    #[serde(default = "defaults::max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent_characters: defaults::max_concurrent_characters(),
            max_concurrent_fetches: defaults::max_concurrent_fetches(),
        }
    }
}

/// Postgres connection settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL; overrides the discrete fields when set
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "defaults::db_host")]
    pub host: String,

    #[serde(default = "defaults::db_port")]
    pub port: u16,

    #[serde(default = "defaults::db_user")]
    pub user: String,

    #[serde(default)]
    pub password: Option<String>,

    /// Database name
    #[serde(default = "defaults::db_name")]
    pub name: String,

    /// Pool size shared by all insert tasks
    #[serde(default = "defaults::max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Build sqlx connect options from this configuration.
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        if let Some(url) = &self.url {
            return url
                .parse::<PgConnectOptions>()
                .map_err(|e| AppError::config(format!("Invalid DATABASE_URL: {e}")));
        }

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.name);
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        Ok(options)
    }

    /// Connection target with credentials stripped, for logs.
    pub fn display_target(&self) -> String {
        match &self.url {
            Some(raw) => match url::Url::parse(raw) {
                Ok(mut parsed) => {
                    let _ = parsed.set_password(None);
                    parsed.to_string()
                }
                Err(_) => "<unparseable DATABASE_URL>".to_string(),
            },
            None => format!(
                "postgres://{}@{}:{}/{}",
                self.user, self.host, self.port, self.name
            ),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: defaults::db_host(),
            port: defaults::db_port(),
            user: defaults::db_user(),
            password: None,
            name: defaults::db_name(),
            max_connections: defaults::max_connections(),
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("target", &self.display_target())
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Batch run settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Also page through films, starships, vehicles, species and planets.
    /// Their pages are fetched and logged but nothing is persisted.
    #[serde(default)]
    pub walk_auxiliary_categories: bool,

    /// Stop each category after this many pages
    #[serde(default)]
    pub max_pages: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // API defaults
    pub fn base_url() -> String {
        "https://swapi.dev/api/".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; catalog-loader/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent_characters() -> usize {
        10
    }
    pub fn max_concurrent_fetches() -> usize {
        8
    }

    // Database defaults
    pub fn db_host() -> String {
        "localhost".into()
    }
    pub fn db_port() -> u16 {
        5432
    }
    pub fn db_user() -> String {
        "postgres".into()
    }
    pub fn db_name() -> String {
        "swapi_db".into()
    }
    pub fn max_connections() -> u32 {
        5
    }

    pub fn log_level() -> String {
        "info".into()
    }
}
