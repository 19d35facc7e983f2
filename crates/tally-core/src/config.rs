//! Tally configuration
//!
//! Defaults are embedded from `config/tally.toml`. A user file at
//! `~/.local/share/tally/config/tally.toml` (or an explicit path) overrides
//! any subset of keys.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

const DEFAULT_CONFIG: &str = include_str!("../../../config/tally.toml");

/// Coverage percentages that decide the diagnostic mode of a ledger report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageThresholds {
    pub complete_percent: f64,
    pub partial_percent: f64,
}

impl Default for CoverageThresholds {
    fn default() -> Self {
        Self {
            complete_percent: 85.0,
            partial_percent: 50.0,
        }
    }
}

/// CLI output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TallyConfig {
    pub coverage: CoverageThresholds,
    pub output: OutputFormat,
}

impl TallyConfig {
    /// Load configuration: explicit path, then the user override location,
    /// then the embedded defaults.
    ///
    /// An explicit path that does not exist is an error; a missing user
    /// override silently falls back to defaults.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let content = match override_path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                read_config(path)?
            }
            None => match default_config_path() {
                Some(path) if path.exists() => read_config(&path)?,
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        parse_config(&content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("tally.toml"))
}

fn read_config(path: &Path) -> Result<String> {
    debug!("Reading config from {}", path.display());
    fs::read_to_string(path).map_err(|e| Error::Config(format!("Failed to read config: {}", e)))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    coverage: Option<RawCoverage>,
    output: Option<RawOutput>,
}

#[derive(Debug, Deserialize)]
struct RawCoverage {
    complete_percent: Option<f64>,
    partial_percent: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawOutput {
    format: Option<String>,
}

/// Parse config from TOML content, applying values over the defaults
pub fn parse_config(content: &str) -> Result<TallyConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = TallyConfig::default();

    if let Some(coverage) = raw.coverage {
        if let Some(complete) = coverage.complete_percent {
            config.coverage.complete_percent = complete;
        }
        if let Some(partial) = coverage.partial_percent {
            config.coverage.partial_percent = partial;
        }
    }

    if let Some(output) = raw.output {
        if let Some(format) = output.format {
            config.output = format.parse().map_err(Error::Config)?;
        }
    }

    let CoverageThresholds {
        complete_percent,
        partial_percent,
    } = config.coverage;
    if !(0.0..=100.0).contains(&partial_percent)
        || !(0.0..=100.0).contains(&complete_percent)
        || partial_percent > complete_percent
    {
        return Err(Error::Config(format!(
            "Coverage thresholds must satisfy 0 <= partial ({}) <= complete ({}) <= 100",
            partial_percent, complete_percent
        )));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_embedded_config_parses() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, TallyConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config(
            r#"
[coverage]
complete_percent = 90.0
"#,
        )
        .unwrap();
        assert_eq!(config.coverage.complete_percent, 90.0);
        assert_eq!(config.coverage.partial_percent, 50.0);
        assert_eq!(config.output, OutputFormat::Table);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), TallyConfig::default());
    }

    #[test]
    fn test_output_format() {
        let config = parse_config("[output]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.output, OutputFormat::Json);

        let err = parse_config("[output]\nformat = \"xml\"\n").unwrap_err();
        assert!(err.to_string().contains("Unknown output format"));
    }

    #[test]
    fn test_invalid_thresholds() {
        assert!(parse_config("[coverage]\npartial_percent = 95.0\n").is_err());
        assert!(parse_config("[coverage]\ncomplete_percent = 120.0\n").is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_config("[coverage\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[coverage]\npartial_percent = 40.0").unwrap();

        let config = TallyConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.coverage.partial_percent, 40.0);
        assert_eq!(config.coverage.complete_percent, 85.0);
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = TallyConfig::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
