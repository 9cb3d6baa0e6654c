use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input: InputSettings,
    pub report: ReportSettings,
    pub output: OutputSettings,
    pub log_level: LogLevel,
}

/// Where the order exports are found.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Directory scanned for export files.
    pub data_directory: PathBuf,
    /// Glob pattern, relative to `data_directory`.
    pub file_pattern: String,
    /// Matching files whose name ends with any of these are skipped.
    pub excluded_suffixes: Vec<String>,
}

/// How many entries the ranked report sections show.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub top_countries: usize,
    pub top_markets: usize,
    pub top_products: usize,
    pub top_promotions: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Destination of the JSON export. The `export` command requires it, from here or the CLI.
    pub json_path: Option<PathBuf>,
}

/// Verbosity of the log output, unless `RUST_LOG` says otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_directive())
    }
}

// --- Default Implementations ---
// Running without any config file scans `*.txt` in the working directory.

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from("."),
            file_pattern: "*.txt".to_string(),
            excluded_suffixes: vec!["file.txt".to_string()],
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_countries: 10,
            top_markets: 5,
            top_products: 10,
            top_promotions: 10,
        }
    }
}

impl Settings {
    /// Rejects settings that would make a report section or the file scan meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.file_pattern.trim().is_empty() {
            return Err(ConfigError::Validation(
                "input.file_pattern must not be empty".to_string(),
            ));
        }

        let limits = [
            ("report.top_countries", self.report.top_countries),
            ("report.top_markets", self.report.top_markets),
            ("report.top_products", self.report.top_products),
            ("report.top_promotions", self.report.top_promotions),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(ConfigError::Validation(format!(
                    "{name} must be at least 1"
                )));
            }
        }

        Ok(())
    }
}
