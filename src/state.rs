use std::env;
use std::ops::Range;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

use crate::data::{load_catalog, Catalog};
use crate::error::CatalogError;
use crate::recommender::Recommender;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_LATENCY_MS: Range<u64> = 500..1500;

/// Application configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind the HTTP server to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Enables the `index.html` fallback for client-side routing.
    pub production: bool,
    /// Directory static assets are served from.
    pub static_dir: PathBuf,
    /// Optional JSON catalog replacing the built-in one.
    pub catalog_path: Option<PathBuf>,
    /// Range of the simulated processing delay, in milliseconds.
    pub latency_ms: Range<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: DEFAULT_PORT,
            production: false,
            static_dir: PathBuf::from("public"),
            catalog_path: None,
            latency_ms: DEFAULT_LATENCY_MS,
        }
    }
}

impl Config {
    /// Creates Config from environment variables with defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let min = env_number("SIMULATED_LATENCY_MIN_MS", defaults.latency_ms.start);
        let max = env_number("SIMULATED_LATENCY_MAX_MS", defaults.latency_ms.end);
        Self {
            host: env::var("BIND_HOST").unwrap_or(defaults.host),
            port: env_number("PORT", defaults.port),
            production: env::var("APP_ENV").is_ok_and(|v| v == "production"),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            catalog_path: env::var("CATALOG_PATH").ok().map(PathBuf::from),
            latency_ms: latency_range(min, max),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The configured catalog file, or the built-in catalog when none is set.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => load_catalog(path),
            None => Ok(Catalog::builtin()),
        }
    }
}

fn env_number<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring unparseable {}={:?}", key, raw);
            default
        }),
        Err(_) => default,
    }
}

/// `min..max`, or the default range when `min > max`.
///
/// `min == max` is an empty range and disables the simulated delay.
fn latency_range(min: u64, max: u64) -> Range<u64> {
    if min > max {
        warn!(
            "Ignoring simulated latency range {}..{}ms, using {:?}",
            min, max, DEFAULT_LATENCY_MS
        );
        return DEFAULT_LATENCY_MS;
    }
    min..max
}

/// Shared application state passed to all request handlers.
///
/// Nothing in here is written after startup, so no locking is needed.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub recommender: Recommender,
}

impl AppState {
    pub fn new(catalog: Catalog, latency_ms: Range<u64>) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            recommender: Recommender::new(Arc::clone(&catalog), latency_ms),
            catalog,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.latency_ms, 500..1500);
        assert!(!config.production);
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_bind_address_with_host() {
        let config = Config {
            host: "127.0.0.1".into(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_inverted_latency_range_falls_back() {
        assert_eq!(latency_range(2000, 1500), 500..1500);
        assert_eq!(latency_range(100, 200), 100..200);
        assert!(latency_range(0, 0).is_empty());
    }

    #[test]
    fn test_builtin_catalog_without_path() {
        let catalog = Config::default().load_catalog().unwrap();
        assert_eq!(catalog.total_resources(), 8);
    }

    #[test]
    fn test_state_shares_catalog() {
        let state = AppState::new(Catalog::builtin(), 0..0);
        assert_eq!(Arc::strong_count(&state.catalog), 2);
    }
}
