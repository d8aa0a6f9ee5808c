//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before the database pool is opened.

use tracing::{info, warn};

/// Read an optional environment variable and parse it, warning when the value is malformed.
pub fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(%key, value = %raw, "ignoring malformed environment value");
            None
        }
    }
}

/// Ensure the configured database URL is present before connecting.
pub async fn ensure_env(database_url: &str) -> anyhow::Result<()> {
    if database_url.trim().is_empty() {
        return Err(anyhow::anyhow!("database url is empty; set DATABASE_URL or database.url"));
    }
    if std::env::var("RUST_LOG").is_err() {
        info!("RUST_LOG not set, using default log filter");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_reads_and_rejects() {
        std::env::set_var("FILMS_TEST_PORT", "8088");
        assert_eq!(parse_var::<u16>("FILMS_TEST_PORT"), Some(8088));
        std::env::set_var("FILMS_TEST_PORT", "not-a-port");
        assert_eq!(parse_var::<u16>("FILMS_TEST_PORT"), None);
        assert_eq!(parse_var::<u16>("FILMS_TEST_MISSING"), None);
    }

    #[tokio::test]
    async fn ensure_env_requires_url() {
        assert!(ensure_env("").await.is_err());
        assert!(ensure_env("postgres://localhost/films").await.is_ok());
    }
}
