use anyhow::{Context, Result};
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub db_max_connections: u32,

    /// Directory for the daily rolling log file. Logs go to stdout when unset.
    pub log_dir: Option<String>,

    pub api_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://data/hr.db".to_string(),
            server_addr: "127.0.0.1:4000".to_string(),
            db_max_connections: 5,
            log_dir: None,
            api_prefix: "/api".to_string(),
        }
    }
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or(defaults.server_addr),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: match env::var("DB_MAX_CONNECTIONS") {
                Ok(raw) => raw
                    .parse()
                    .with_context(|| format!("DB_MAX_CONNECTIONS must be a number, got {raw:?}"))?,
                Err(_) => defaults.db_max_connections,
            },
            log_dir: env::var("LOG_DIR").ok().filter(|dir| !dir.trim().is_empty()),
            api_prefix: normalize_prefix(
                &env::var("API_PREFIX").unwrap_or(defaults.api_prefix),
            ),
        })
    }
}

/// `api/` and `/api/` both become `/api`; an empty prefix mounts at the root.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
