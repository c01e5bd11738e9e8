// SPDX-License-Identifier: MPL-2.0
//! This module handles the viewer's configuration, including loading and saving
//! preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[presentation]` - Transition timings and drag-to-dismiss thresholds
//! - `[paging]` - Paging strategy and swipe commit threshold
//! - `[cache]` - Item controller cache capacity
//! - `[platform]` - Input platform (touch or remote)
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `ICED_LIGHTBOX_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_lightbox::config::{self, Config, PagingStrategy};
//!
//! let (mut config, _warning) = config::load();
//! config.paging.strategy = Some(PagingStrategy::Page);
//! config::save_to_path(&config, std::path::Path::new("settings.toml"))
//!     .expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::platform::Platform;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Application name used for directory naming.
const APP_NAME: &str = "IcedLightbox";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ICED_LIGHTBOX_CONFIG_DIR";

// =============================================================================
// Enums
// =============================================================================

/// Which pagination engine drives horizontal paging.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PagingStrategy {
    /// Continuous scroll surface with a three-page load window.
    #[default]
    Scroll,
    /// Discrete page container asking for the controller before/after.
    Page,
}

impl std::str::FromStr for PagingStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "scroll" => Ok(Self::Scroll),
            "page" => Ok(Self::Page),
            other => Err(Error::Config(format!("invalid paging strategy: {}", other))),
        }
    }
}

// =============================================================================
// Section Structs
// =============================================================================

/// Transition and dismissal settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PresentationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_duration_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_duration_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snap_back_duration_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome_fade_ms: Option<u64>,

    /// Center travel past the middle that turns a drag release into a dismissal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismiss_margin: Option<f32>,

    /// Alpha lost per half-height of vertical drag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drag_alpha_coefficient: Option<f32>,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            open_duration_ms: Some(DEFAULT_OPEN_DURATION_MS),
            close_duration_ms: Some(DEFAULT_CLOSE_DURATION_MS),
            snap_back_duration_ms: Some(DEFAULT_SNAP_BACK_DURATION_MS),
            chrome_fade_ms: Some(DEFAULT_CHROME_FADE_MS),
            dismiss_margin: Some(DEFAULT_DISMISS_MARGIN),
            drag_alpha_coefficient: Some(DEFAULT_DRAG_ALPHA_COEFFICIENT),
        }
    }
}

/// Paging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PagingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<PagingStrategy>,

    /// Fraction of the page width a swipe must cover to commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_fraction: Option<f32>,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            strategy: Some(PagingStrategy::default()),
            commit_fraction: Some(DEFAULT_PAGE_COMMIT_FRACTION),
        }
    }
}

/// Item controller cache settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    /// Maximum number of item controllers kept alive before LRU eviction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: Some(DEFAULT_CACHE_CAPACITY),
        }
    }
}

/// Input platform settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PlatformConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Platform>,
}

// =============================================================================
// Main Config Struct
// =============================================================================

/// Viewer configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub presentation: PresentationConfig,

    #[serde(default)]
    pub paging: PagingConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub platform: PlatformConfig,
}

// =============================================================================
// Resolved Settings
// =============================================================================

/// Presentation knobs with every default applied and ranges enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentationSettings {
    pub open_duration: Duration,
    pub close_duration: Duration,
    pub snap_back_duration: Duration,
    pub chrome_fade: Duration,
    pub dismiss_margin: f32,
    pub drag_alpha_coefficient: f32,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        PresentationConfig::default().resolve()
    }
}

/// Paging knobs with every default applied and ranges enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagingSettings {
    pub strategy: PagingStrategy,
    pub commit_fraction: f32,
}

impl Default for PagingSettings {
    fn default() -> Self {
        PagingConfig::default().resolve()
    }
}

fn duration_ms(value: Option<u64>, default: u64) -> Duration {
    Duration::from_millis(value.unwrap_or(default).min(MAX_ANIMATION_DURATION_MS))
}

impl PresentationConfig {
    #[must_use]
    pub fn resolve(&self) -> PresentationSettings {
        PresentationSettings {
            open_duration: duration_ms(self.open_duration_ms, DEFAULT_OPEN_DURATION_MS),
            close_duration: duration_ms(self.close_duration_ms, DEFAULT_CLOSE_DURATION_MS),
            snap_back_duration: duration_ms(
                self.snap_back_duration_ms,
                DEFAULT_SNAP_BACK_DURATION_MS,
            ),
            chrome_fade: duration_ms(self.chrome_fade_ms, DEFAULT_CHROME_FADE_MS),
            dismiss_margin: self
                .dismiss_margin
                .filter(|m| *m > 0.0)
                .unwrap_or(DEFAULT_DISMISS_MARGIN),
            drag_alpha_coefficient: self
                .drag_alpha_coefficient
                .filter(|c| *c > 0.0)
                .unwrap_or(DEFAULT_DRAG_ALPHA_COEFFICIENT),
        }
    }
}

impl PagingConfig {
    #[must_use]
    pub fn resolve(&self) -> PagingSettings {
        PagingSettings {
            strategy: self.strategy.unwrap_or_default(),
            commit_fraction: self
                .commit_fraction
                .unwrap_or(DEFAULT_PAGE_COMMIT_FRACTION)
                .clamp(MIN_PAGE_COMMIT_FRACTION, MAX_PAGE_COMMIT_FRACTION),
        }
    }
}

impl CacheConfig {
    /// Returns the controller capacity clamped to the supported range.
    #[must_use]
    pub fn resolved_capacity(&self) -> usize {
        self.capacity
            .unwrap_or(DEFAULT_CACHE_CAPACITY)
            .clamp(MIN_CACHE_CAPACITY, MAX_CACHE_CAPACITY)
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory, honoring an explicit override first and the
/// environment variable second.
fn get_config_dir_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(dir) = base_dir {
        return Some(dir);
    }
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    get_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!("Failed to load {}: {}", path.display(), err);
                    return (Config::default(), Some(err.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            presentation: PresentationConfig {
                open_duration_ms: Some(400),
                dismiss_margin: Some(80.0),
                ..PresentationConfig::default()
            },
            paging: PagingConfig {
                strategy: Some(PagingStrategy::Page),
                commit_fraction: Some(0.4),
            },
            cache: CacheConfig { capacity: Some(8) },
            platform: PlatformConfig {
                kind: Some(Platform::Remote),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn load_with_override_falls_back_to_defaults_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[paging]\nstrategy = 42")
            .expect("failed to write config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config: Config = toml::from_str("[cache]\ncapacity = 32\n").expect("valid toml");
        assert_eq!(config.cache.capacity, Some(32));
        assert_eq!(config.paging, PagingConfig::default());
        assert_eq!(config.presentation, PresentationConfig::default());
    }

    #[test]
    fn resolved_settings_clamp_out_of_range_values() {
        let paging = PagingConfig {
            strategy: None,
            commit_fraction: Some(5.0),
        }
        .resolve();
        assert_eq!(paging.strategy, PagingStrategy::Scroll);
        assert_eq!(paging.commit_fraction, MAX_PAGE_COMMIT_FRACTION);

        let cache = CacheConfig { capacity: Some(0) };
        assert_eq!(cache.resolved_capacity(), MIN_CACHE_CAPACITY);

        let presentation = PresentationConfig {
            open_duration_ms: Some(60_000),
            dismiss_margin: Some(-3.0),
            ..PresentationConfig::default()
        }
        .resolve();
        assert_eq!(
            presentation.open_duration,
            Duration::from_millis(MAX_ANIMATION_DURATION_MS)
        );
        assert_eq!(presentation.dismiss_margin, DEFAULT_DISMISS_MARGIN);
    }

    #[test]
    fn paging_strategy_parses_from_cli_text() {
        assert_eq!("Scroll".parse::<PagingStrategy>().ok(), Some(PagingStrategy::Scroll));
        assert_eq!("page".parse::<PagingStrategy>().ok(), Some(PagingStrategy::Page));
        assert!("carousel".parse::<PagingStrategy>().is_err());
    }
}
