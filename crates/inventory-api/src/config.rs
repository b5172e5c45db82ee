use std::env;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 300;
const DEFAULT_ITEM_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_ITEM_CACHE_CAPACITY: u64 = 10_000;

/// Application configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// When unset the service runs on the in-memory store
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub jwt_secret: Option<String>,
    pub access_token_ttl: Duration,
    pub item_cache_ttl: Duration,
    pub item_cache_capacity: u64,
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());

        let db_max_connections = lookup("DB_MAX_CONNECTIONS")
            .and_then(|n| n.parse().ok())
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS);

        let jwt_secret = lookup("JWT_SECRET").filter(|s| !s.is_empty());

        let access_token_ttl = Duration::from_secs(
            parsed("ACCESS_TOKEN_TTL_SECS").unwrap_or(DEFAULT_ACCESS_TOKEN_TTL_SECS),
        );
        let item_cache_ttl = Duration::from_secs(
            parsed("ITEM_CACHE_TTL_SECS").unwrap_or(DEFAULT_ITEM_CACHE_TTL_SECS),
        );
        let item_cache_capacity =
            parsed("ITEM_CACHE_CAPACITY").unwrap_or(DEFAULT_ITEM_CACHE_CAPACITY);

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or_else(|| vec!["*".to_string()]);

        Self {
            port,
            database_url,
            db_max_connections,
            jwt_secret,
            access_token_ttl,
            item_cache_ttl,
            item_cache_capacity,
            cors_origins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8000);
        assert!(config.database_url.is_none());
        assert!(config.jwt_secret.is_none());
        assert_eq!(config.access_token_ttl, Duration::from_secs(300));
        assert_eq!(config.item_cache_ttl, Duration::from_secs(300));
        assert_eq!(config.item_cache_capacity, 10_000);
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("DATABASE_URL", "postgres://localhost/inventory"),
            ("JWT_SECRET", "s3cret"),
            ("ITEM_CACHE_TTL_SECS", "60"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/inventory")
        );
        assert_eq!(config.jwt_secret.as_deref(), Some("s3cret"));
        assert_eq!(config.item_cache_ttl, Duration::from_secs(60));
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_unparseable_numbers_fall_back() {
        let config = config_from(&[("PORT", "eighty"), ("ACCESS_TOKEN_TTL_SECS", "-5")]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.access_token_ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_empty_database_url_means_memory() {
        let config = config_from(&[("DATABASE_URL", "")]);
        assert!(config.database_url.is_none());
    }
}
