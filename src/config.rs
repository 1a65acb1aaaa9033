//! User configuration loaded from `config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::calculator::{DEFAULT_PRECISION, MAX_PRECISION};
use crate::ops::TANGENT_TOLERANCE;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Significant digits shown for non-integral results.
    pub precision: usize,
    /// `tan` is undefined where `|cos(x)|` is at most this value.
    pub tangent_tolerance: f64,
    /// Bind `c`, `g`, `h`, `na` and `kb`.
    pub physical_constants: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            tangent_tolerance: TANGENT_TOLERANCE,
            physical_constants: false,
        }
    }
}

impl Config {
    /// Default location: `<config dir>/padcalc/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("padcalc").join("config.toml"))
    }

    /// Load from `path`, or defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Load from the default location.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(contents)?;
        let clamped = config.precision.clamp(1, MAX_PRECISION);
        if clamped != config.precision {
            tracing::warn!(
                requested = config.precision,
                used = clamped,
                "precision out of range"
            );
            config.precision = clamped;
        }
        if !(config.tangent_tolerance.is_finite() && config.tangent_tolerance >= 0.0) {
            anyhow::bail!(
                "tangent_tolerance must be a non-negative number, got {}",
                config.tangent_tolerance
            );
        }
        Ok(config)
    }
}
