//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. All rate-limiting and key-allocation constants are configurable so
//! that edge values can be exercised directly in tests.
//!
//! ## Variables
//!
//! - `REDIS_URL` / `REDIS_HOST` - Key-value store connection; when neither is
//!   set the service falls back to an in-process store (development only)
//! - `BASE_URL` - Public base URL used to build short links (default:
//!   `https://localhost:3000`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `RATE_LIMIT_WINDOW_MS` - Sliding window length (default: 60000)
//! - `RATE_LIMIT_MAX_REQUESTS` - Requests admitted per window (default: 10)
//! - `ALLOC_MAX_ATTEMPTS` - Key allocation retry budget (default: 10)

use anyhow::Result;
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Key-value store connection string. `None` selects the in-memory store.
    pub redis_url: Option<String>,
    /// Public base URL prepended to short keys (no trailing slash).
    pub base_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Sliding-window length in milliseconds.
    pub rate_limit_window_ms: i64,
    /// Requests admitted per identity per window.
    pub rate_limit_max_requests: usize,
    /// Random-key allocation retry budget before giving up.
    pub alloc_max_attempts: usize,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let redis_url = Self::load_redis_url();

        let base_url = env::var("BASE_URL")
            .unwrap_or_else(|_| "https://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let rate_limit_window_ms = env::var("RATE_LIMIT_WINDOW_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60_000);

        let rate_limit_max_requests = env::var("RATE_LIMIT_MAX_REQUESTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let alloc_max_attempts = env::var("ALLOC_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Ok(Self {
            redis_url,
            base_url,
            listen_addr,
            log_level,
            log_format,
            rate_limit_window_ms,
            rate_limit_max_requests,
            alloc_max_attempts,
        })
    }

    /// Loads the Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok();
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        let url = match password {
            Some(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        };

        Some(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` or `base_url` is malformed
    /// - any rate-limit or allocation bound is zero or out of range
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                redis_url
            );
        }

        if self.rate_limit_window_ms < 1000 {
            anyhow::bail!(
                "RATE_LIMIT_WINDOW_MS must be at least 1000, got {}",
                self.rate_limit_window_ms
            );
        }

        if self.rate_limit_max_requests == 0 {
            anyhow::bail!("RATE_LIMIT_MAX_REQUESTS must be at least 1");
        }

        if self.alloc_max_attempts == 0 || self.alloc_max_attempts > 100 {
            anyhow::bail!(
                "ALLOC_MAX_ATTEMPTS must be between 1 and 100, got {}",
                self.alloc_max_attempts
            );
        }

        Ok(())
    }

    /// Returns whether the Redis store backend is configured.
    pub fn is_redis_enabled(&self) -> bool {
        self.redis_url.is_some()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);

        if let Some(ref redis_url) = self.redis_url {
            tracing::info!("  Store: {} (Redis)", mask_connection_string(redis_url));
        } else {
            tracing::info!("  Store: in-memory (development only)");
        }

        tracing::info!(
            "  Rate limit: {} requests per {}ms",
            self.rate_limit_max_requests,
            self.rate_limit_window_ms
        );
        tracing::info!("  Allocation retry budget: {}", self.alloc_max_attempts);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Masks sensitive information in connection strings for logging.
///
/// Replaces password with `***` in URLs like
/// `redis://:password@host:port/db` → `redis://:***@host:port/db`.
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn base_config() -> Config {
        Config {
            redis_url: None,
            base_url: "https://s.example.com".to_string(),
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            rate_limit_window_ms: 60_000,
            rate_limit_max_requests: 10,
            alloc_max_attempts: 10,
        }
    }

    #[test]
    fn test_mask_connection_string() {
        assert_eq!(
            mask_connection_string("redis://:password@localhost:6379/0"),
            "redis://:***@localhost:6379/0"
        );

        assert_eq!(
            mask_connection_string("redis://localhost:6379/0"),
            "redis://localhost:6379/0"
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = base_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:3000".to_string();

        config.base_url = "ftp://s.example.com".to_string();
        assert!(config.validate().is_err());

        config.base_url = "https://s.example.com".to_string();

        config.rate_limit_window_ms = 500;
        assert!(config.validate().is_err());

        config.rate_limit_window_ms = 60_000;

        config.rate_limit_max_requests = 0;
        assert!(config.validate().is_err());

        config.rate_limit_max_requests = 10;

        config.alloc_max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_redis_url_rejected() {
        let mut config = base_config();
        config.redis_url = Some("http://localhost:6379".to_string());
        assert!(config.validate().is_err());

        config.redis_url = Some("redis://localhost:6379/0".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_load_redis_url_from_components() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("REDIS_HOST", "redis-host");
            env::set_var("REDIS_PORT", "6380");
            env::set_var("REDIS_DB", "1");
        }

        let url = Config::load_redis_url().unwrap();
        assert_eq!(url, "redis://redis-host:6380/1");

        unsafe {
            env::set_var("REDIS_PASSWORD", "secret");
        }
        let url = Config::load_redis_url().unwrap();
        assert_eq!(url, "redis://:secret@redis-host:6380/1");

        // Empty password is treated as no password
        unsafe {
            env::set_var("REDIS_PASSWORD", "");
        }
        let url = Config::load_redis_url().unwrap();
        assert_eq!(url, "redis://redis-host:6380/1");

        unsafe {
            env::remove_var("REDIS_HOST");
            env::remove_var("REDIS_PORT");
            env::remove_var("REDIS_DB");
            env::remove_var("REDIS_PASSWORD");
        }
    }

    #[test]
    #[serial]
    fn test_redis_url_priority() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("REDIS_URL", "redis://from-url:6379/0");
            env::set_var("REDIS_HOST", "from-components");
        }

        let url = Config::load_redis_url().unwrap();

        assert!(url.contains("from-url"));
        assert!(!url.contains("from-components"));

        unsafe {
            env::remove_var("REDIS_URL");
            env::remove_var("REDIS_HOST");
        }
    }

    #[test]
    #[serial]
    fn test_base_url_trailing_slash_trimmed() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("BASE_URL", "https://s.example.com/");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.base_url, "https://s.example.com");

        unsafe {
            env::remove_var("BASE_URL");
        }
    }
}
