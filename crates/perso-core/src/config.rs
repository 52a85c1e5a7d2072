//! Review configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/perso/config/review.toml)
//!    or an explicit path
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! The loaded value is passed to whoever needs it; nothing is cached globally.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::import::CsvOptions;
use crate::models::SortStrategy;
use crate::normalize::CardMap;
use crate::ranking::DEFAULT_MAX_GROUPS;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/review.toml");

/// Defaults for the review pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewConfig {
    /// Strategy used when none is requested
    pub default_strategy: SortStrategy,
    /// Maximum number of groups per review screen
    pub max_groups: usize,
    /// Field separator for CSV import
    pub csv_delimiter: u8,
    /// Household member per card suffix
    pub card_members: CardMap,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            default_strategy: SortStrategy::Count,
            max_groups: DEFAULT_MAX_GROUPS,
            csv_delimiter: b';',
            card_members: CardMap::new(),
        }
    }
}

impl ReviewConfig {
    pub fn csv_options(&self) -> CsvOptions {
        CsvOptions {
            delimiter: self.csv_delimiter,
        }
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("perso").join("config").join("review.toml"))
}

/// Load configuration (override first, then default)
pub fn load_config(override_path: Option<&Path>) -> Result<ReviewConfig> {
    let path = match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    let content = match path {
        Some(path) if path.exists() => {
            debug!("Loading review config from {}", path.display());
            fs::read_to_string(&path)?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    review: Option<RawReview>,
    import: Option<RawImport>,
    cards: Option<CardMap>,
}

#[derive(Debug, Deserialize)]
struct RawReview {
    sort: Option<String>,
    max_groups: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawImport {
    delimiter: Option<String>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<ReviewConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = ReviewConfig::default();

    if let Some(review) = raw.review {
        if let Some(sort) = review.sort {
            config.default_strategy = SortStrategy::parse_lenient(&sort);
        }
        if let Some(max_groups) = review.max_groups {
            config.max_groups = max_groups;
        }
    }

    if let Some(import) = raw.import {
        if let Some(delimiter) = import.delimiter {
            config.csv_delimiter = parse_delimiter(&delimiter)?;
        }
    }

    if let Some(cards) = raw.cards {
        for suffix in cards.keys() {
            if suffix.len() != 4 || !suffix.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::Config(format!(
                    "Card suffix must be four digits, got {:?}",
                    suffix
                )));
            }
        }
        config.card_members = cards;
    }

    Ok(config)
}

/// A delimiter must be exactly one ASCII character
pub fn parse_delimiter(s: &str) -> Result<u8> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(Error::Config(format!(
            "Delimiter must be a single ASCII character, got {:?}",
            s
        ))),
    }
}
