//! Path classification: is a nested key missing, present but empty, or holding data?

use super::{prefix_string, KeyPath, Strictness};
use crate::error::TreeError;
use serde_json::Value;

/// Presence state of a key path within a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Some key along the path does not exist in its parent mapping.
    Missing,
    /// The final key exists but holds no data (null, `{}` or `""`).
    Empty,
    /// The final key exists and holds usable data.
    Present,
}

impl Classification {
    /// Whether a default should be written at this path.
    pub fn needs_default(self) -> bool {
        matches!(self, Classification::Missing | Classification::Empty)
    }
}

/// Classify `path` within `tree`. Pure read.
///
/// A null container along the way counts as absent in both modes. Any other non-mapping
/// container is `Missing` when lenient and a [`TreeError::TypeMismatch`] when strict.
pub fn classify(
    tree: &Value,
    path: &KeyPath,
    strictness: Strictness,
) -> Result<Classification, TreeError> {
    classify_keys(tree, path.keys(), strictness)
}

pub(crate) fn classify_keys(
    tree: &Value,
    keys: &[String],
    strictness: Strictness,
) -> Result<Classification, TreeError> {
    let mut current = tree;
    for (depth, key) in keys.iter().enumerate() {
        let map = match current {
            Value::Object(map) => map,
            Value::Null => return Ok(Classification::Missing),
            other if strictness.is_strict() => {
                return Err(TreeError::mismatch(prefix_string(keys, depth), other));
            }
            _ => return Ok(Classification::Missing),
        };
        match map.get(key) {
            Some(value) => current = value,
            None => return Ok(Classification::Missing),
        }
    }
    Ok(classify_value(current))
}

/// Classify a value found at the end of a path.
///
/// Falsy values (null, `false`, zero, `""`, `{}`) carry no data. An empty sequence is
/// `Present`: it is already the normalized form of a list field.
pub fn classify_value(value: &Value) -> Classification {
    match value {
        Value::Null | Value::Bool(false) => Classification::Empty,
        Value::Number(n) if n.as_f64() == Some(0.0) => Classification::Empty,
        Value::Object(map) if map.is_empty() => Classification::Empty,
        Value::String(s) if s.is_empty() => Classification::Empty,
        _ => Classification::Present,
    }
}
