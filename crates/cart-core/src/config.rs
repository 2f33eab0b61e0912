//! Configuration for the cart widget.
//!
//! Loaded from a TOML file; every field has a default so a missing file or a
//! partial file both work.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ports::CreditKey;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Header title.
    pub title: String,
    /// Label on the checkout button.
    pub button_text: String,
    /// Tracing filter used when `RUST_LOG` is not set.
    pub log_filter: String,
    pub actions: ActionsConfig,
    pub animation: AnimationConfig,
    pub credit: CreditConfig,
}

impl CartConfig {
    pub const DEFAULT_TITLE: &'static str = "My Cart";
    pub const DEFAULT_BUTTON_TEXT: &'static str = "Checkout";
    pub const DEFAULT_LOG_FILTER: &'static str = "info";

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            Self::from_toml_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        Ok(config)
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            title: Self::DEFAULT_TITLE.to_string(),
            button_text: Self::DEFAULT_BUTTON_TEXT.to_string(),
            log_filter: Self::DEFAULT_LOG_FILTER.to_string(),
            actions: ActionsConfig::default(),
            animation: AnimationConfig::default(),
            credit: CreditConfig::default(),
        }
    }
}

/// Click handling for checkout / continue-shopping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionsConfig {
    /// Minimum gap between two accepted clicks.
    pub debounce_ms: u64,
    /// How long an accepted click waits before its action proceeds.
    pub click_gate_ms: u64,
}

impl ActionsConfig {
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn click_gate(&self) -> Duration {
        Duration::from_millis(self.click_gate_ms)
    }
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            click_gate_ms: 200,
        }
    }
}

/// Timing of the removal cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Stagger between consecutive items (1/20 s by default).
    pub cascade_step_ms: u64,
    /// Duration of every transform transition.
    pub duration_ms: u64,
    /// CSS easing function handed to the rendering surface verbatim.
    pub easing: String,
}

impl AnimationConfig {
    pub fn cascade_step(&self) -> Duration {
        Duration::from_millis(self.cascade_step_ms)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            cascade_step_ms: 50,
            duration_ms: 300,
            easing: "var(--app-ease)".to_string(),
        }
    }
}

/// Location of the credit record in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditConfig {
    /// Collection path; `{uid}` is replaced with the user id.
    pub collection: String,
    /// Document id inside the collection.
    pub document: String,
}

impl CreditConfig {
    /// Builds the subscription key for a user.
    pub fn key_for(&self, uid: &str) -> CreditKey {
        CreditKey {
            collection: self.collection.replace("{uid}", uid),
            document: self.document.clone(),
        }
    }
}

impl Default for CreditConfig {
    fn default() -> Self {
        Self {
            collection: "users/{uid}/credit".to_string(),
            document: "asg".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = CartConfig::load_from(&config_path).unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.animation.cascade_step(), Duration::from_millis(50));
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("cart.toml");
        fs::write(
            &config_path,
            "title = \"Bag\"\n\n[actions]\ndebounce_ms = 750\n",
        )
        .unwrap();

        let config = CartConfig::load_from(&config_path).unwrap();
        assert_eq!(config.title, "Bag");
        assert_eq!(config.button_text, "Checkout");
        assert_eq!(config.actions.debounce_window(), Duration::from_millis(750));
        assert_eq!(config.actions.click_gate(), Duration::from_millis(200));
        assert_eq!(config.animation.easing, "var(--app-ease)");
    }

    #[test]
    fn test_load_invalid_toml_reports_path() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("cart.toml");
        fs::write(&config_path, "title = [").unwrap();

        let err = CartConfig::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_credit_key_substitutes_uid() {
        let key = CreditConfig::default().key_for("u-42");
        assert_eq!(key.collection, "users/u-42/credit");
        assert_eq!(key.document, "asg");
    }
}
