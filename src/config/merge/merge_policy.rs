//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Container lists are not defaulted here; later sources replace arrays
/// wholesale and the serde default fills them when no source sets them.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("output.format", "text")?
        .set_default("logging.level", "warn")
}
