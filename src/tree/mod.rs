//! Configuration tree access
//!
//! A configuration tree is a plain `serde_json::Value` whose root is a mapping. This module
//! holds the read side (classification), the write side (default application) and the
//! per-element defaulter used when a path runs through a list.

pub mod classify;
pub mod each;
pub mod path;
pub mod writer;

use crate::error::TreeError;
use serde_json::Value;

pub use classify::{classify, Classification};
pub use each::{apply_to_each, EachOutcome};
pub use path::KeyPath;
pub use writer::{apply_default, WriteOutcome};

/// Nested mapping/sequence/scalar structure holding the fabric data model.
pub type ConfigTree = Value;

/// How structural surprises (a scalar or list where a mapping was expected) are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Treat the location as missing and move on.
    #[default]
    Lenient,
    /// Fail with [`TreeError::TypeMismatch`].
    Strict,
}

impl Strictness {
    pub fn from_flag(strict: bool) -> Self {
        if strict {
            Strictness::Strict
        } else {
            Strictness::Lenient
        }
    }

    pub fn is_strict(self) -> bool {
        self == Strictness::Strict
    }
}

/// Short name of a value's JSON type, used in diagnostics.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Follow `keys` through nested mappings, returning the value at the end.
pub fn get_path_mut<'t>(tree: &'t mut Value, keys: &[String]) -> Option<&'t mut Value> {
    keys.iter()
        .try_fold(tree, |current, key| current.as_object_mut()?.get_mut(key))
}

/// Shared-reference counterpart of [`get_path_mut`].
pub fn get_path<'t>(tree: &'t Value, keys: &[String]) -> Option<&'t Value> {
    keys.iter()
        .try_fold(tree, |current, key| current.as_object()?.get(key))
}

/// Dotted rendering of the first `depth` keys, as used in error paths.
pub(crate) fn prefix_string(keys: &[String], depth: usize) -> String {
    keys[..depth].join(".")
}

impl TreeError {
    pub(crate) fn mismatch(path: String, found: &Value) -> Self {
        TreeError::TypeMismatch {
            path,
            expected: "mapping",
            found: value_kind(found),
        }
    }

    /// Re-root the error path under `prefix`, e.g. an element-relative `[2].interfaces`
    /// becomes `vxlan.topology.switches[2].interfaces`.
    pub fn within(self, prefix: &str) -> Self {
        match self {
            TreeError::TypeMismatch {
                path,
                expected,
                found,
            } => {
                let path = if path.is_empty() {
                    prefix.to_string()
                } else if path.starts_with('[') || prefix.is_empty() {
                    format!("{}{}", prefix, path)
                } else {
                    format!("{}.{}", prefix, path)
                };
                TreeError::TypeMismatch {
                    path,
                    expected,
                    found,
                }
            }
        }
    }

    pub fn path(&self) -> &str {
        match self {
            TreeError::TypeMismatch { path, .. } => path,
        }
    }
}
