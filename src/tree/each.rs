//! Per-element defaulting for paths that run through a list

use super::classify::classify_keys;
use super::writer::{apply_default, WriteOutcome};
use super::{value_kind, KeyPath, Strictness};
use crate::error::TreeError;
use serde_json::Value;
use tracing::{debug, warn};

/// Per-element tally of one list pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EachOutcome {
    pub defaulted: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

/// Default `suffix` inside every element of `elements`, in list order.
///
/// Each element is classified and written independently. Non-mapping elements are skipped
/// when lenient; when strict they fail with an error path relative to the list (`[2]`).
pub fn apply_to_each(
    elements: &mut [Value],
    suffix: &KeyPath,
    default: &Value,
    strictness: Strictness,
) -> Result<EachOutcome, TreeError> {
    let mut outcome = EachOutcome::default();

    for (index, element) in elements.iter_mut().enumerate() {
        let at = format!("[{}]", index);

        if !element.is_object() {
            if strictness.is_strict() {
                return Err(TreeError::mismatch(String::new(), element).within(&at));
            }
            warn!(
                element = %at,
                found = value_kind(element),
                "List element is not a mapping, skipping"
            );
            outcome.skipped += 1;
            continue;
        }

        let state = classify_keys(element, suffix.keys(), strictness).map_err(|e| e.within(&at))?;
        if !state.needs_default() {
            outcome.unchanged += 1;
            continue;
        }

        match apply_default(element, suffix, default, strictness).map_err(|e| e.within(&at))? {
            WriteOutcome::Written => {
                debug!(element = %at, key = %suffix, "Defaulted element key");
                outcome.defaulted += 1;
            }
            WriteOutcome::ParentMissing => outcome.skipped += 1,
        }
    }

    Ok(outcome)
}
