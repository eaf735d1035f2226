//! Configuration Module
//! Command line flags layered over an optional TOML file and built-in defaults.

use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_DATA_PATH: &str = "data/sample_tourism.csv";
pub const DEFAULT_TITLE: &str = "Interactive Tourism Data Visualizations";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Window size must be positive, got {width}x{height}")]
    InvalidWindow { width: f32, height: f32 },
}

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tourism_explorer", version, about = "Interactive tourism facilities dashboard")]
pub struct CliArgs {
    /// Path to the facilities CSV file [default: data/sample_tourism.csv]
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Initial window width
    #[arg(long)]
    pub width: Option<f32>,

    /// Initial window height
    #[arg(long)]
    pub height: Option<f32>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    pub data: DataSection,
    pub window: WindowSection,
    pub view: ViewSection,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataSection {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowSection {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewSection {
    pub default_min_index: Option<i64>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Resolved settings used to start the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_width: f32,
    pub window_height: f32,
    pub title: String,
    /// Initial slider value before clamping into the data's index bounds.
    pub default_min_index: i64,
    pub verbose: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            window_width: 1400.0,
            window_height: 900.0,
            title: DEFAULT_TITLE.to_string(),
            default_min_index: 0,
            verbose: false,
        }
    }
}

impl DashboardConfig {
    /// Load the config file named on the command line (if any) and merge.
    pub fn from_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };
        Self::merge(args, file)
    }

    /// CLI flags win over file values, file values win over defaults.
    pub fn merge(args: &CliArgs, file: FileConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            data_path: args
                .data
                .clone()
                .or(file.data.path)
                .unwrap_or(defaults.data_path),
            window_width: args
                .width
                .or(file.window.width)
                .unwrap_or(defaults.window_width),
            window_height: args
                .height
                .or(file.window.height)
                .unwrap_or(defaults.window_height),
            title: file.window.title.unwrap_or(defaults.title),
            default_min_index: file
                .view
                .default_min_index
                .unwrap_or(defaults.default_min_index),
            verbose: args.verbose,
        };

        if config.window_width <= 0.0 || config.window_height <= 0.0 {
            return Err(ConfigError::InvalidWindow {
                width: config.window_width,
                height: config.window_height,
            });
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_args_or_file() {
        let config = DashboardConfig::merge(&CliArgs::default(), FileConfig::default()).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.data_path, PathBuf::from("data/sample_tourism.csv"));
    }

    #[test]
    fn partial_toml_fills_remaining_defaults() {
        let file = FileConfig::from_toml(
            r#"
[data]
path = "data/lebanon.csv"

[view]
default_min_index = 3
"#,
        )
        .unwrap();
        let config = DashboardConfig::merge(&CliArgs::default(), file).unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/lebanon.csv"));
        assert_eq!(config.default_min_index, 3);
        assert_eq!(config.window_width, 1400.0);
        assert_eq!(config.title, DEFAULT_TITLE);
    }

    #[test]
    fn cli_overrides_file() {
        let file = FileConfig::from_toml("[data]\npath = \"a.csv\"\n[window]\nwidth = 800.0\n").unwrap();
        let args = CliArgs::parse_from(["tourism_explorer", "--data", "b.csv", "--width", "1024"]);
        let config = DashboardConfig::merge(&args, file).unwrap();
        assert_eq!(config.data_path, PathBuf::from("b.csv"));
        assert_eq!(config.window_width, 1024.0);
    }

    #[test]
    fn rejects_non_positive_window() {
        let args = CliArgs {
            height: Some(0.0),
            ..CliArgs::default()
        };
        let err = DashboardConfig::merge(&args, FileConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWindow { .. }));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(FileConfig::from_toml("[window\nwidth = 1").is_err());
    }
}
