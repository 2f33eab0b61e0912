//! Tracing subscriber setup.

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Installs a global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `fallback` (usually
/// [`CartConfig::log_filter`](crate::CartConfig::log_filter)) is used.
pub fn init(fallback: &str) -> Result<()> {
    let filter = build_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(), fallback)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow!("Failed to install tracing subscriber: {err}"))
}

fn build_filter(env: Option<&str>, fallback: &str) -> Result<EnvFilter> {
    match env {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)
            .with_context(|| format!("Invalid RUST_LOG directives: {directives}")),
        _ => EnvFilter::try_new(fallback)
            .with_context(|| format!("Invalid log filter: {fallback}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_directives_take_precedence() {
        let filter = build_filter(Some("cart_widget=trace"), "info").unwrap();
        assert_eq!(filter.to_string(), "cart_widget=trace");
    }

    #[test]
    fn test_blank_env_falls_back() {
        let filter = build_filter(Some("  "), "warn").unwrap();
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn test_invalid_fallback_is_an_error() {
        assert!(build_filter(None, "cart_widget=loudest").is_err());
    }
}
