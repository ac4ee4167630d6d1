//! Assistant configuration
//!
//! Config is loaded with a three-layer resolution:
//! 1. Explicit path passed by the caller (e.g. `--config`)
//! 2. Override in data dir (~/.local/share/finwise/config/assistant.toml)
//! 3. Embedded defaults (compiled into binary)
//!
//! Every key is optional; missing keys keep their default value.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/assistant.toml");

/// Tuning knobs for the assistant engine
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    /// Category keywords recognised by spend-on-category questions, in match order
    pub category_keywords: Vec<String>,
    /// Also match categories the user recorded in the reference month
    pub include_user_categories: bool,
    /// Calendar months in the trend window (ending at the reference month)
    pub trend_months: u32,
    /// Usage percent above which budget status turns cautious
    pub caution_percent: Decimal,
    /// Share of budget above which the top category is flagged
    pub top_category_share_percent: Decimal,
    /// Remaining-budget percent below which the user is told to slow down
    pub low_remaining_percent: Decimal,
    /// Default number of chat history entries to return
    pub history_limit: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            category_keywords: vec!["food".to_string(), "transport".to_string()],
            include_user_categories: true,
            trend_months: 6,
            caution_percent: Decimal::from(80),
            top_category_share_percent: Decimal::from(30),
            low_remaining_percent: Decimal::from(20),
            history_limit: 50,
        }
    }
}

impl AssistantConfig {
    /// Load using the default resolution order
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit path, falling back to the default resolution if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("finwise").join("config").join("assistant.toml"))
}

fn read_config(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "Reading assistant config");
    fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))
}

/// Load configuration (explicit path, then override, then embedded default)
fn load_config(explicit: Option<&Path>) -> Result<AssistantConfig> {
    if let Some(path) = explicit {
        if path.exists() {
            return parse_config(&read_config(path)?);
        }
    }

    if let Some(default_path) = default_config_path() {
        if default_path.exists() {
            return parse_config(&read_config(&default_path)?);
        }
    }

    parse_config(DEFAULT_CONFIG)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    categories: Option<RawCategories>,
    trend: Option<RawTrend>,
    thresholds: Option<RawThresholds>,
    history: Option<RawHistory>,
}

#[derive(Debug, Deserialize)]
struct RawCategories {
    keywords: Option<Vec<String>>,
    include_user_categories: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawTrend {
    months: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawThresholds {
    caution_percent: Option<u32>,
    top_category_share_percent: Option<u32>,
    low_remaining_percent: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawHistory {
    default_limit: Option<usize>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<AssistantConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AssistantConfig::default();

    if let Some(categories) = raw.categories {
        if let Some(keywords) = categories.keywords {
            // Blank keywords would match every message
            config.category_keywords = keywords
                .into_iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
        }
        if let Some(include) = categories.include_user_categories {
            config.include_user_categories = include;
        }
    }

    if let Some(trend) = raw.trend {
        if let Some(months) = trend.months {
            if months == 0 {
                return Err(Error::Config(
                    "trend.months must be at least 1".to_string(),
                ));
            }
            config.trend_months = months;
        }
    }

    if let Some(thresholds) = raw.thresholds {
        if let Some(p) = thresholds.caution_percent {
            config.caution_percent = Decimal::from(p);
        }
        if let Some(p) = thresholds.top_category_share_percent {
            config.top_category_share_percent = Decimal::from(p);
        }
        if let Some(p) = thresholds.low_remaining_percent {
            config.low_remaining_percent = Decimal::from(p);
        }
    }

    if let Some(history) = raw.history {
        if let Some(limit) = history.default_limit {
            config.history_limit = limit;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, AssistantConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = parse_config(
            r#"
            [thresholds]
            caution_percent = 90
            "#,
        )
        .unwrap();
        assert_eq!(config.caution_percent, Decimal::from(90));
        assert_eq!(config.trend_months, 6);
        assert_eq!(config.category_keywords, vec!["food", "transport"]);
    }

    #[test]
    fn test_keywords_are_normalized() {
        let config = parse_config(
            r#"
            [categories]
            keywords = ["Food", "  Rent ", ""]
            include_user_categories = false
            "#,
        )
        .unwrap();
        assert_eq!(config.category_keywords, vec!["food", "rent"]);
        assert!(!config.include_user_categories);
    }

    #[test]
    fn test_zero_trend_months_rejected() {
        let result = parse_config("[trend]\nmonths = 0\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(matches!(
            parse_config("[trend"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[history]\ndefault_limit = 10").unwrap();

        let config = AssistantConfig::load_from(file.path()).unwrap();
        assert_eq!(config.history_limit, 10);
    }
}
