//! Configuration types and loading for the roi calculator.
//!
//! The main entry point is [`RoiConfig`], the contents of `roi.yaml`.
//! Configuration is layered with figment: built-in defaults, then the YAML
//! file, then `ROI_*` environment variables (`__` separates nested keys, e.g.
//! `ROI_ASSUMPTIONS__HOURS_PER_FTE=1600`).

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use roi_core::formula::Assumptions;
use roi_core::validation::AccuracyPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "roi.yaml";

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "ROI_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// The layered configuration could not be extracted.
    #[error("failed to load config: {0}")]
    LoadError(#[from] figment::Error),

    /// An explicitly requested config file does not exist.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Refused to overwrite an existing config file.
    #[error("config file already exists: {} (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue {
        /// The configuration key that had an invalid value.
        key: String,
        /// A description of why the value is invalid.
        reason: String,
    },
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Validation configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ValidationConfig {
    /// What to do with an accuracy outside 0-100: `"reject"` | `"clamp"`.
    #[serde(default)]
    pub accuracy: AccuracyPolicy,
}

/// CSV export configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Where the shell's export writes the CSV report.
    #[serde(default = "default_export_path")]
    pub path: String,

    /// Prefix the CSV with a UTF-8 byte order mark.
    #[serde(default = "default_true")]
    pub bom: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: default_export_path(),
            bom: true,
        }
    }
}

fn default_export_path() -> String {
    "roi_report.csv".to_string()
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The full roi configuration, corresponding to `roi.yaml`.
///
/// All fields use `serde` defaults so a partially-specified file yields
/// sensible values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RoiConfig {
    /// Weeks per year and hours per FTE used by the formula.
    #[serde(default)]
    pub assumptions: Assumptions,

    /// Input validation behavior.
    #[serde(default)]
    pub validation: ValidationConfig,

    /// CSV export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

impl RoiConfig {
    /// Checks values that deserialize fine but make no sense.
    pub fn validate(&self) -> Result<()> {
        let assumptions = [
            ("assumptions.weeks_per_year", self.assumptions.weeks_per_year),
            ("assumptions.hours_per_fte", self.assumptions.hours_per_fte),
        ];
        for (key, value) in assumptions {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(
                    key,
                    format!("must be a finite number greater than 0 (got {})", value),
                ));
            }
        }
        if self.export.path.trim().is_empty() {
            return Err(invalid("export.path", "must not be empty".to_string()));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason,
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Resolves which config file to read.
///
/// An explicit path must exist. Without one, `roi.yaml` in the current
/// directory is used when present.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if !path.exists() => Err(ConfigError::NotFound(path.to_path_buf())),
        Some(path) => Ok(Some(path.to_path_buf())),
        None => {
            let default = PathBuf::from(CONFIG_FILE_NAME);
            Ok(default.is_file().then_some(default))
        }
    }
}

/// Builds the layered figment: defaults, then `yaml` (if any), then env.
pub fn figment(yaml: Option<&str>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(RoiConfig::default()));
    if let Some(content) = yaml {
        // An empty file is valid and yields default config.
        if !content.trim().is_empty() {
            figment = figment.merge(Yaml::string(content));
        }
    }
    figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Loads configuration, reading the file chosen by [`resolve_config_path`].
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] for a missing explicit file,
/// [`ConfigError::ReadError`] if the file cannot be read,
/// [`ConfigError::LoadError`] if the layers fail to extract, and
/// [`ConfigError::InvalidValue`] if a value is out of range.
pub fn load_config(explicit: Option<&Path>) -> Result<RoiConfig> {
    let path = resolve_config_path(explicit)?;
    let content = match &path {
        Some(p) => Some(std::fs::read_to_string(p)?),
        None => None,
    };
    tracing::debug!(path = ?path, "loading configuration");

    let config: RoiConfig = figment(content.as_deref()).extract()?;
    config.validate()?;
    Ok(config)
}

/// Saves configuration as YAML to `path`, creating parent directories.
pub fn save_config(path: &Path, config: &RoiConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Writes a default config file, refusing to overwrite unless `force`.
pub fn init_config(path: &Path, force: bool) -> Result<RoiConfig> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    let config = RoiConfig::default();
    save_config(path, &config)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
