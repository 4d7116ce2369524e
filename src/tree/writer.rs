//! Default application at a nested path

use super::{prefix_string, value_kind, KeyPath, Strictness};
use crate::error::TreeError;
use serde_json::Value;
use tracing::{debug, warn};

/// Result of a single default write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The final key was set to the default.
    Written,
    /// A container along the path does not exist; nothing was written.
    ParentMissing,
}

/// Write `default` at `path`, creating or overwriting only the final key.
///
/// Descends only through containers that already exist. Intermediate mappings are never
/// synthesized, so parents must be created by an earlier write.
pub fn apply_default(
    tree: &mut Value,
    path: &KeyPath,
    default: &Value,
    strictness: Strictness,
) -> Result<WriteOutcome, TreeError> {
    write_at(tree, path.keys(), 0, default, strictness)
}

fn write_at(
    container: &mut Value,
    keys: &[String],
    depth: usize,
    default: &Value,
    strictness: Strictness,
) -> Result<WriteOutcome, TreeError> {
    let Some(key) = keys.get(depth) else {
        return Ok(WriteOutcome::ParentMissing);
    };

    let map = match container {
        Value::Object(map) => map,
        Value::Null => {
            debug!(container = %prefix_string(keys, depth), "Container is null, skipping write");
            return Ok(WriteOutcome::ParentMissing);
        }
        other => {
            let at = prefix_string(keys, depth);
            if strictness.is_strict() {
                return Err(TreeError::mismatch(at, other));
            }
            warn!(
                container = %at,
                found = value_kind(other),
                "Expected a mapping, skipping write"
            );
            return Ok(WriteOutcome::ParentMissing);
        }
    };

    if depth + 1 == keys.len() {
        map.insert(key.clone(), default.clone());
        return Ok(WriteOutcome::Written);
    }

    match map.get_mut(key) {
        Some(child) => write_at(child, keys, depth + 1, default, strictness),
        None => {
            debug!(
                missing = %prefix_string(keys, depth + 1),
                "Parent container missing, skipping write"
            );
            Ok(WriteOutcome::ParentMissing)
        }
    }
}
