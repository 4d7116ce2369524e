//! CLI route: single route table and run context. Dispatches to the normalizer and
//! presentation.

use crate::cli::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_check_result, format_classification, format_document, format_normalize_summary,
    format_rule_table_json, format_rule_table_text, format_rule_table_toml,
};
use crate::config::{ConfigLoader, FabricDefaultsConfig};
use crate::error::ApiError;
use crate::rules::RuleTable;
use crate::tree::{classify, KeyPath, Strictness};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: the loaded configuration.
pub struct RunContext {
    config: FabricDefaultsConfig,
}

impl RunContext {
    /// Create run context from an optional config path. Uses ConfigLoader only.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&std::env::current_dir()?)?,
        };
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: FabricDefaultsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FabricDefaultsConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        debug!(command = command_name(command), "Executing command");
        match command {
            Commands::Normalize {
                input,
                output,
                rules,
                strict,
                pointer,
                pretty,
            } => self.handle_normalize(
                input,
                output.as_deref(),
                rules.as_ref(),
                *strict,
                pointer.as_deref(),
                *pretty,
            ),
            Commands::Classify {
                input,
                path,
                pointer,
                strict,
            } => {
                let mut document = read_document(input)?;
                let tree = select_tree(&mut document, pointer.as_deref())?;
                let strictness = Strictness::from_flag(*strict || self.config.strict);
                let state = classify(tree, &KeyPath::parse_dotted(path), strictness)?;
                Ok(format_classification(path, state))
            }
            Commands::Rules { rules, format } => {
                let table = self.rule_table(rules.as_ref())?;
                match format.as_str() {
                    "json" => format_rule_table_json(&table),
                    "toml" => format_rule_table_toml(&table),
                    _ => Ok(format_rule_table_text(&table)),
                }
            }
            Commands::Check { rules } => {
                let table = RuleTable::from_file(rules)?;
                Ok(format_check_result(rules, &table))
            }
        }
    }

    fn handle_normalize(
        &self,
        input: &Path,
        output: Option<&Path>,
        rules: Option<&PathBuf>,
        strict: bool,
        pointer: Option<&str>,
        pretty: bool,
    ) -> Result<String, ApiError> {
        let mut config = self.config.clone();
        if let Some(rules) = rules {
            config.rules = Some(rules.clone());
        }
        config.strict |= strict;
        let normalizer = config.build_normalizer()?;

        let mut document = read_document(input)?;
        let tree = select_tree(&mut document, pointer)?;
        if !tree.is_object() {
            return Err(ApiError::InvalidDocument(
                "model tree must be a mapping".to_string(),
            ));
        }
        let report = normalizer.normalize_with_report(tree)?;

        let rendered = format_document(&document, pretty)?;
        match output {
            Some(path) => {
                std::fs::write(path, format!("{}\n", rendered))?;
                info!(output = %path.display(), "Normalized document written");
                Ok(format_normalize_summary(path, &report))
            }
            None => Ok(rendered),
        }
    }

    fn rule_table(&self, rules: Option<&PathBuf>) -> Result<RuleTable, ApiError> {
        let table = match rules {
            Some(path) => RuleTable::from_file(path)?,
            None => self.config.load_rule_table()?,
        };
        Ok(table)
    }
}

/// Read a JSON document from a file, or stdin when the path is "-".
fn read_document(input: &Path) -> Result<Value, ApiError> {
    let content = if input == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(input)?
    };
    Ok(serde_json::from_str(&content)?)
}

/// Resolve the model tree inside the document. No pointer means the whole document.
fn select_tree<'d>(
    document: &'d mut Value,
    pointer: Option<&str>,
) -> Result<&'d mut Value, ApiError> {
    match pointer {
        None => Ok(document),
        Some(pointer) => document
            .pointer_mut(pointer)
            .ok_or_else(|| ApiError::PointerNotFound(pointer.to_string())),
    }
}
