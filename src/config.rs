//! Configuration System
//!
//! Layered configuration for the indexer: merge-policy defaults, the global
//! user file, workspace files, then `AUTOROUTE__*` environment overrides.

use crate::content::ContainerField;
use crate::error::IndexError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// How aspects are read from content documents
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Record output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Content document resolver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Container parts walked for contained items, in accessor order
    #[serde(default = "ContainerField::defaults")]
    pub containers: Vec<ContainerField>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            containers: ContainerField::defaults(),
        }
    }
}

impl ResolverConfig {
    pub fn validate(&self) -> Result<(), String> {
        for field in &self.containers {
            if field.part.is_empty() || field.items.is_empty() {
                return Err(format!(
                    "Container '{}.{}' must name both a part and an items field",
                    field.part, field.items
                ));
            }
        }
        Ok(())
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: text, json (default: text)
    #[serde(default = "default_output_format")]
    pub format: String,
}

fn default_output_format() -> String {
    "text".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
        }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> Result<(), String> {
        match self.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(format!("Invalid output format: {} (must be 'text' or 'json')", other)),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Resolver(String),
    Output(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Resolver(msg) => write!(f, "Resolver: {}", msg),
            ValidationError::Output(msg) => write!(f, "Output: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl IndexerConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.resolver.validate() {
            errors.push(ValidationError::Resolver(e));
        }
        if let Err(e) = self.output.validate() {
            errors.push(ValidationError::Output(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding all errors into one `IndexError`.
    pub fn ensure_valid(&self) -> Result<(), IndexError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            IndexError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, IndexError> {
        toml::to_string_pretty(self).map_err(|e| IndexError::ConfigError(e.to_string()))
    }
}
