//! Environment source: FABRIC_DEFAULTS_STRICT, FABRIC_DEFAULTS_LOGGING__LEVEL, ...

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "FABRIC_DEFAULTS";

/// Add environment overrides; nested keys use `__` (`FABRIC_DEFAULTS_LOGGING__LEVEL`).
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
