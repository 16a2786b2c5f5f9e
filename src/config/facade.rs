//! Config loader: assembles sources in precedence order and deserializes.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::IndexerConfig;
use config::{ConfigError, File};
use std::path::Path;
use tracing::debug;

/// Loads [`IndexerConfig`] from layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// `config/config.toml`, workspace `config/{AUTOROUTE_ENV}.toml`, environment.
    pub fn load(workspace_root: &Path) -> Result<IndexerConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: IndexerConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from a single file, still honouring defaults and
    /// environment overrides.
    pub fn load_from_file(path: &Path) -> Result<IndexerConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        let builder = environment::add_to_builder(builder);

        let config: IndexerConfig = builder.build()?.try_deserialize()?;
        debug!(config_path = %path.display(), "Loaded configuration file");
        Ok(config)
    }
}
