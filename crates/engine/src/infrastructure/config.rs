//! Engine configuration from environment variables
//!
//! All variables are prefixed `REGIONWARD_` and fall back to defaults
//! when unset; a set-but-unparseable value is a startup error rather
//! than a silent fallback.

use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Path to the SQLite database file.
    pub db_path: String,
    /// Whether to reload the trigger cache from the store on startup.
    pub reload_on_start: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: "regionward.db".to_string(),
            reload_on_start: true,
        }
    }
}

impl AppConfig {
    /// # Environment Variables
    ///
    /// - `REGIONWARD_DB_PATH` - SQLite database file (default: `regionward.db`)
    /// - `REGIONWARD_RELOAD_ON_START` - load triggers at startup (default: `true`)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let db_path = std::env::var("REGIONWARD_DB_PATH").unwrap_or(defaults.db_path);

        let reload_on_start = match std::env::var("REGIONWARD_RELOAD_ON_START") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("invalid REGIONWARD_RELOAD_ON_START: {value:?}"))?,
            Err(_) => defaults.reload_on_start,
        };

        Ok(Self {
            db_path,
            reload_on_start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = AppConfig::default();
        assert_eq!(config.db_path, "regionward.db");
        assert!(config.reload_on_start);
    }
}
