//! Configuration System
//!
//! Layered runtime configuration: built-in defaults, global file, local file, then
//! `FABRIC_DEFAULTS_*` environment overrides. An explicit config file replaces both files.

use crate::error::{ApiError, RuleTableError};
use crate::logging::LoggingConfig;
use crate::normalizer::{NormalizeOptions, Normalizer};
use crate::rules::{vxlan_rule_table, RuleTable};
use crate::tree::Strictness;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

mod merge;
mod sources;

pub use sources::global_file::global_config_path;
pub use sources::local_file::{local_config_path, LOCAL_CONFIG_FILE};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FabricDefaultsConfig {
    /// Fail on type mismatches instead of skipping them
    #[serde(default)]
    pub strict: bool,

    /// Rule file replacing the built-in VXLAN rule table
    #[serde(default)]
    pub rules: Option<PathBuf>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Logging(String),
    Rules(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
            ValidationError::Rules(msg) => write!(f, "Rules: {}", msg),
        }
    }
}

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

impl FabricDefaultsConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let logging = &self.logging;

        if !LOG_LEVELS.contains(&logging.level.as_str()) {
            errors.push(ValidationError::Logging(format!(
                "unknown level '{}'",
                logging.level
            )));
        }
        if logging.format != "text" && logging.format != "json" {
            errors.push(ValidationError::Logging(format!(
                "unknown format '{}'",
                logging.format
            )));
        }
        match logging.output.as_str() {
            "stdout" | "stderr" => {}
            "file" if logging.file.is_none() => errors.push(ValidationError::Logging(
                "output 'file' requires logging.file".to_string(),
            )),
            "file" => {}
            other => errors.push(ValidationError::Logging(format!(
                "unknown output '{}'",
                other
            ))),
        }

        if let Some(rules) = &self.rules {
            if rules.as_os_str().is_empty() {
                errors.push(ValidationError::Rules("rule file path is empty".to_string()));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            strictness: Strictness::from_flag(self.strict),
        }
    }

    /// The configured rule file, or the built-in VXLAN table.
    pub fn load_rule_table(&self) -> Result<RuleTable, RuleTableError> {
        match &self.rules {
            Some(path) => {
                debug!(rules = %path.display(), "Loading rule table from file");
                RuleTable::from_file(path)
            }
            None => vxlan_rule_table(),
        }
    }

    pub fn build_normalizer(&self) -> Result<Normalizer, RuleTableError> {
        Ok(Normalizer::new(self.load_rule_table()?, self.normalize_options()))
    }
}

/// Loads [`FabricDefaultsConfig`] from its layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from defaults, global file, `dir/fabric-defaults.toml` and the environment.
    pub fn load(dir: &Path) -> Result<FabricDefaultsConfig, ApiError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::local_file::add_to_builder(builder, dir)?;
        let builder = sources::environment::add_to_builder(builder);
        Self::finish(builder)
    }

    /// Load from defaults, one explicit file and the environment.
    pub fn load_from_file(path: &Path) -> Result<FabricDefaultsConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let builder = merge::merge_policy::builder_with_defaults()?
            .add_source(config::File::from(path).required(true));
        let builder = sources::environment::add_to_builder(builder);
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<FabricDefaultsConfig, ApiError> {
        let config: FabricDefaultsConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(|errors| {
            let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
            ApiError::ConfigError(joined.join("; "))
        })?;
        Ok(config)
    }
}
