//! Rule Table
//!
//! Ordered declarations of which paths in a configuration tree must hold a default value.
//! Tables are validated on construction so that every rule that creates a container runs
//! before any rule that writes inside it.

pub mod file;
pub mod syntax;
pub mod vxlan;

use crate::error::RuleTableError;
use crate::tree::KeyPath;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

pub use file::{RuleFile, RuleSpec};
pub use syntax::{parse_rule_path, RulePath};
pub use vxlan::vxlan_rule_table;

/// One defaulting declaration
#[derive(Debug, Clone, PartialEq)]
pub enum PathRule {
    /// Default `parent.key`.
    List {
        parent: KeyPath,
        key: String,
        default: Value,
    },
    /// Create `parent` holding every key when it is missing or empty, then default each key
    /// individually.
    Group {
        parent: KeyPath,
        keys: Vec<String>,
        default: Value,
    },
    /// Default `suffix` inside every element of the list at `list`.
    ForEach {
        list: KeyPath,
        suffix: KeyPath,
        default: Value,
    },
}

fn empty_list() -> Value {
    Value::Array(Vec::new())
}

impl PathRule {
    pub fn list(parent: impl Into<KeyPath>, key: impl Into<String>) -> Self {
        PathRule::List {
            parent: parent.into(),
            key: key.into(),
            default: empty_list(),
        }
    }

    pub fn group<I, S>(parent: impl Into<KeyPath>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PathRule::Group {
            parent: parent.into(),
            keys: keys.into_iter().map(Into::into).collect(),
            default: empty_list(),
        }
    }

    pub fn for_each(list: impl Into<KeyPath>, suffix: impl Into<KeyPath>) -> Self {
        PathRule::ForEach {
            list: list.into(),
            suffix: suffix.into(),
            default: empty_list(),
        }
    }

    /// Replace the default value (`[]` unless set).
    pub fn with_default(mut self, value: Value) -> Self {
        match &mut self {
            PathRule::List { default, .. }
            | PathRule::Group { default, .. }
            | PathRule::ForEach { default, .. } => *default = value,
        }
        self
    }

    pub fn default_value(&self) -> &Value {
        match self {
            PathRule::List { default, .. }
            | PathRule::Group { default, .. }
            | PathRule::ForEach { default, .. } => default,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PathRule::List { .. } => "list",
            PathRule::Group { .. } => "group",
            PathRule::ForEach { .. } => "for-each",
        }
    }

    /// Containers this rule writes, i.e. containers later rules may rely on.
    fn provides(&self) -> Vec<Container> {
        match self {
            PathRule::List { parent, key, .. } => {
                vec![Container::Tree(parent.child(key.as_str()))]
            }
            PathRule::Group { parent, keys, .. } => std::iter::once(parent.clone())
                .chain(keys.iter().map(|k| parent.child(k.as_str())))
                .map(Container::Tree)
                .collect(),
            PathRule::ForEach { list, suffix, .. } => vec![Container::Element {
                list: list.clone(),
                path: suffix.clone(),
            }],
        }
    }

    /// Whether this rule only works once `container` exists.
    fn depends_on(&self, container: &Container) -> bool {
        match (self, container) {
            (PathRule::List { parent, key, .. }, Container::Tree(path)) => {
                path.is_proper_prefix_of(&parent.child(key.as_str()))
            }
            (PathRule::Group { parent, .. }, Container::Tree(path)) => {
                path.is_proper_prefix_of(parent)
            }
            (PathRule::ForEach { list, .. }, Container::Tree(path)) => {
                path == list || path.is_proper_prefix_of(list)
            }
            (PathRule::ForEach { list, suffix, .. }, Container::Element { list: other, path }) => {
                list == other && path.is_proper_prefix_of(suffix)
            }
            (_, Container::Element { .. }) => false,
        }
    }

    fn check_keys(&self) -> Result<(), RuleTableError> {
        let invalid = |reason: &str| RuleTableError::InvalidPath {
            path: self.to_string(),
            reason: reason.to_string(),
        };
        let all_keys: Vec<&String> = match self {
            PathRule::List { parent, key, .. } => {
                parent.keys().iter().chain(std::iter::once(key)).collect()
            }
            PathRule::Group { parent, keys, .. } => {
                if parent.is_empty() {
                    return Err(invalid("group parent must name at least one key"));
                }
                if keys.is_empty() {
                    return Err(RuleTableError::EmptyGroup(parent.to_string()));
                }
                let mut seen = HashSet::new();
                for key in keys {
                    if !seen.insert(key) {
                        return Err(RuleTableError::DuplicateGroupKey {
                            parent: parent.to_string(),
                            key: key.clone(),
                        });
                    }
                }
                parent.keys().iter().chain(keys.iter()).collect()
            }
            PathRule::ForEach { list, suffix, .. } => {
                if list.is_empty() {
                    return Err(invalid("list path must name at least one key"));
                }
                if suffix.is_empty() {
                    return Err(invalid("element path must name at least one key"));
                }
                list.keys().iter().chain(suffix.keys()).collect()
            }
        };
        if all_keys.iter().any(|k| k.is_empty()) {
            return Err(invalid("empty key segment"));
        }
        Ok(())
    }
}

impl fmt::Display for PathRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathRule::List { parent, key, .. } if parent.is_empty() => write!(f, "{}", key),
            PathRule::List { parent, key, .. } => write!(f, "{}.{}", parent, key),
            PathRule::Group { parent, keys, .. } => write!(f, "{}{{{}}}", parent, keys.join(",")),
            PathRule::ForEach { list, suffix, .. } => write!(f, "{}[*].{}", list, suffix),
        }
    }
}

/// A location some rule writes: a tree path, or a path inside every element of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Container {
    Tree(KeyPath),
    Element { list: KeyPath, path: KeyPath },
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Tree(path) => write!(f, "{}", path),
            Container::Element { list, path } => write!(f, "{}[*].{}", list, path),
        }
    }
}

/// Validated, ordered sequence of rules
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: Vec<PathRule>,
}

impl RuleTable {
    /// Build a table, rejecting malformed rules and parent-after-child ordering.
    pub fn new(rules: Vec<PathRule>) -> Result<Self, RuleTableError> {
        for rule in &rules {
            rule.check_keys()?;
        }

        for (i, rule) in rules.iter().enumerate() {
            for later in &rules[i + 1..] {
                if let Some(container) = later.provides().into_iter().find(|p| rule.depends_on(p)) {
                    return Err(RuleTableError::OutOfOrder {
                        rule: rule.to_string(),
                        container: container.to_string(),
                        provider: later.to_string(),
                    });
                }
            }
        }

        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[PathRule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a PathRule;
    type IntoIter = std::slice::Iter<'a, PathRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
