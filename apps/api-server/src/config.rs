//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use quill_core::domain::SlugMatch;
use quill_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server against the in-memory store.
    pub database: Option<DatabaseConfig>,
    pub seed_file: PathBuf,
    pub slug_writes: SlugMatch,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = DatabaseConfig::from_lookup(&lookup);

        let slug_writes = match lookup("SLUG_WRITE_MATCH") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{}; falling back to exact slug matching", e);
                SlugMatch::Exact
            }),
            None => SlugMatch::Exact,
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            seed_file: lookup("SEED_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/blogs.json")),
            slug_writes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.database.is_none());
        assert_eq!(config.seed_file, PathBuf::from("data/blogs.json"));
        assert_eq!(config.slug_writes, SlugMatch::Exact);
    }

    #[test]
    fn test_database_settings() {
        let config = config(&[
            ("MONGODB_URI", "mongodb://localhost:27017"),
            ("MONGODB_DATABASE", "cms"),
            ("MONGODB_MAX_POOL_SIZE", "20"),
            ("MONGODB_MIN_POOL_SIZE", "nope"),
        ]);
        let db = config.database.unwrap();
        assert_eq!(db.database, "cms");
        assert_eq!(db.collection, "posts");
        assert_eq!(db.max_pool_size, 20);
        assert_eq!(db.min_pool_size, 10);
    }

    #[test]
    fn test_slug_write_match() {
        assert_eq!(
            config(&[("SLUG_WRITE_MATCH", "case-insensitive")]).slug_writes,
            SlugMatch::CaseInsensitive
        );
        assert_eq!(
            config(&[("SLUG_WRITE_MATCH", "bogus")]).slug_writes,
            SlugMatch::Exact
        );
    }
}
