//! Configuration for the search Bundle gate.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SEARCH_GATE_LOG_LEVEL` | info | Log level |
//! | `SEARCH_GATE_ORGANIZATION` | | Identifier of the sending organization |
//! | `SEARCH_GATE_TASK_ID` | | Id of the Task the Bundle belongs to |
//! | `SEARCH_GATE_OUTPUT` | text | Report format (`text` or `json`) |
//!
//! # Example
//!
//! ```rust
//! use helios_search_gate::{GateConfig, OutputFormat};
//!
//! let config = GateConfig {
//!     organization: Some("hrp.example.org".to_string()),
//!     output: OutputFormat::Json,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// How rejections are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line per Bundle.
    #[default]
    Text,
    /// A FHIR OperationOutcome per rejected Bundle.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Configuration for checking search Bundles.
#[derive(Debug, Clone, Parser)]
#[command(name = "search-gate")]
#[command(about = "Validates FHIR search Bundles against the federated query safelist")]
pub struct GateConfig {
    /// Search Bundle files (FHIR JSON). Reads stdin when empty or `-`.
    pub bundles: Vec<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "SEARCH_GATE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Identifier of the organization that sent the Bundle.
    #[arg(long, env = "SEARCH_GATE_ORGANIZATION")]
    pub organization: Option<String>,

    /// Id of the Task the Bundle was received with.
    #[arg(long, env = "SEARCH_GATE_TASK_ID")]
    pub task_id: Option<String>,

    /// Report format.
    #[arg(long, env = "SEARCH_GATE_OUTPUT", value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            bundles: Vec::new(),
            log_level: "info".to_string(),
            organization: None,
            task_id: None,
            output: OutputFormat::Text,
        }
    }
}

impl GateConfig {
    /// Returns true if the Bundle is read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.bundles.is_empty() || self.bundles.iter().any(|p| p.as_os_str() == "-")
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Unknown log level '{}', expected one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        if self.bundles.iter().filter(|p| p.as_os_str() == "-").count() > 1 {
            errors.push("stdin ('-') can only be given once".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    pub fn for_testing() -> Self {
        Self {
            log_level: "debug".to_string(),
            organization: Some("test-organization".to_string()),
            task_id: Some("test-task".to_string()),
            ..Default::default()
        }
    }
}
