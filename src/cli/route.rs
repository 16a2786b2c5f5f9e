//! CLI route: run context and single dispatch table.

use crate::cli::parse::Commands;
use crate::cli::presentation::{format_index_json, format_index_text, IndexOutcome};
use crate::config::{ConfigLoader, IndexerConfig};
use crate::content::{JsonAspectResolver, JsonContentItem};
use crate::error::IndexError;
use crate::route::RouteIndexBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Runtime context for CLI execution: loaded configuration and the builder
/// wired to a JSON document resolver.
pub struct RunContext {
    config: IndexerConfig,
    builder: RouteIndexBuilder<JsonAspectResolver>,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, IndexError> {
        let config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Self::from_config(config)
    }

    pub fn from_config(config: IndexerConfig) -> Result<Self, IndexError> {
        config.ensure_valid()?;
        let resolver = JsonAspectResolver::new(config.resolver.containers.clone());
        Ok(Self {
            builder: RouteIndexBuilder::new(Arc::new(resolver)),
            config,
        })
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    pub async fn execute(&self, command: &Commands) -> Result<String, IndexError> {
        match command {
            Commands::Index {
                file,
                format,
                write_back,
            } => {
                let format = format.as_deref().unwrap_or(&self.config.output.format);
                let outcome = self.index_file(file, *write_back).await?;
                match format {
                    "json" => format_index_json(&outcome),
                    "text" => Ok(format_index_text(&outcome)),
                    other => Err(IndexError::ConfigError(format!(
                        "Invalid output format: {} (must be 'text' or 'json')",
                        other
                    ))),
                }
            }
            Commands::Config => self.config.to_toml(),
        }
    }

    /// Build the index records of the document at `path`.
    pub async fn index_file(&self, path: &Path, write_back: bool) -> Result<IndexOutcome, IndexError> {
        let raw = std::fs::read_to_string(path)?;
        let mut item = JsonContentItem::from_value(serde_json::from_str(&raw)?)?;
        debug!(content_item_id = %item.content_item_id, file = %path.display(), "Loaded content item");

        let was_removed = item.autoroute.as_ref().is_some_and(|part| part.removed);
        let records = self.builder.build(&mut item).await?;
        let removed_cleared =
            was_removed && item.autoroute.as_ref().is_some_and(|part| !part.removed);

        let written_back = write_back && removed_cleared;
        if written_back {
            let document = serde_json::to_string_pretty(&item.to_value()?)?;
            std::fs::write(path, document)?;
            info!(file = %path.display(), "Wrote back cleared removed marker");
        }

        Ok(IndexOutcome {
            content_item_id: item.content_item_id,
            records,
            removed_cleared,
            written_back,
        })
    }
}
