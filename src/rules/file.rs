//! Rule files: TOML or JSON documents declaring a rule table.
//!
//! ```toml
//! [[rules]]
//! path = "vxlan.topology"
//! keys = ["switches", "vpc_peers"]
//!
//! [[rules]]
//! path = "vxlan.topology.switches[*].interfaces"
//! ```

use super::syntax::{parse_rule_path, RulePath};
use super::{PathRule, RuleTable};
use crate::error::RuleTableError;
use crate::tree::KeyPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Serialized form of a rule table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleFile {
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

/// Serialized form of one rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    /// Dotted path, optionally with one `[*]` marker
    pub path: String,

    /// Member keys; turns the rule into a group default on `path`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,

    /// Default value (`[]` when omitted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl RuleSpec {
    pub fn into_rule(self) -> Result<PathRule, RuleTableError> {
        let parsed = parse_rule_path(&self.path)?;
        let rule = match (parsed, self.keys) {
            (RulePath::Plain(parent), Some(keys)) => PathRule::group(parent, keys),
            (RulePath::Each { .. }, Some(_)) => {
                return Err(RuleTableError::InvalidPath {
                    path: self.path,
                    reason: "group keys cannot be combined with `[*]`".to_string(),
                });
            }
            (RulePath::Plain(path), None) => {
                let mut keys = path.keys().to_vec();
                // parse_rule_path never yields an empty plain path
                let key = keys.pop().unwrap_or_default();
                PathRule::list(KeyPath::new(keys), key)
            }
            (RulePath::Each { list, suffix }, None) => PathRule::for_each(list, suffix),
        };
        Ok(match self.default {
            Some(value) => rule.with_default(value),
            None => rule,
        })
    }
}

impl From<&PathRule> for RuleSpec {
    fn from(rule: &PathRule) -> Self {
        let default = match rule.default_value() {
            Value::Array(items) if items.is_empty() => None,
            other => Some(other.clone()),
        };
        match rule {
            PathRule::List { .. } | PathRule::ForEach { .. } => RuleSpec {
                path: rule.to_string(),
                keys: None,
                default,
            },
            PathRule::Group { parent, keys, .. } => RuleSpec {
                path: parent.to_string(),
                keys: Some(keys.clone()),
                default,
            },
        }
    }
}

impl RuleFile {
    pub fn from_toml_str(content: &str) -> Result<Self, RuleTableError> {
        toml::from_str(content).map_err(|e| RuleTableError::Parse(e.to_string()))
    }

    pub fn from_json_str(content: &str) -> Result<Self, RuleTableError> {
        serde_json::from_str(content).map_err(|e| RuleTableError::Parse(e.to_string()))
    }

    /// Read a rule file, choosing the parser by extension.
    pub fn load(path: &Path) -> Result<Self, RuleTableError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "Loading rule file");
        match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(RuleTableError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Render as TOML. Defaults holding `null` anywhere are rejected since TOML has no null.
    pub fn to_toml_string(&self) -> Result<String, RuleTableError> {
        let null_default = self
            .rules
            .iter()
            .find(|spec| spec.default.as_ref().is_some_and(contains_null));
        if let Some(spec) = null_default {
            return Err(RuleTableError::Serialize(format!(
                "default of `{}` contains null, which TOML cannot represent (use JSON)",
                spec.path
            )));
        }
        toml::to_string(self).map_err(|e| RuleTableError::Serialize(e.to_string()))
    }

    pub fn into_table(self) -> Result<RuleTable, RuleTableError> {
        let rules = self
            .rules
            .into_iter()
            .map(RuleSpec::into_rule)
            .collect::<Result<Vec<_>, _>>()?;
        RuleTable::new(rules)
    }
}

fn contains_null(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.iter().any(contains_null),
        Value::Object(map) => map.values().any(contains_null),
        _ => false,
    }
}

impl From<&RuleTable> for RuleFile {
    fn from(table: &RuleTable) -> Self {
        RuleFile {
            rules: table.iter().map(RuleSpec::from).collect(),
        }
    }
}

impl RuleTable {
    /// Load and validate a rule table from a `.toml` or `.json` file.
    pub fn from_file(path: &Path) -> Result<Self, RuleTableError> {
        RuleFile::load(path)?.into_table()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RuleTableError> {
        RuleFile::from_toml_str(content)?.into_table()
    }

    pub fn from_json_str(content: &str) -> Result<Self, RuleTableError> {
        RuleFile::from_json_str(content)?.into_table()
    }
}
