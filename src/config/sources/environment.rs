//! Environment source: AUTOROUTE__SECTION__KEY overrides, e.g.
//! `AUTOROUTE__OUTPUT__FORMAT=json`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("AUTOROUTE")
            .prefix_separator("__")
            .separator("__"),
    )
}
