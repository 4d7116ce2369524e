//! Dotted rule path syntax: `vxlan.topology.switches[*].interfaces`

use crate::error::RuleTableError;
use crate::tree::KeyPath;

const EACH_MARKER: &str = "[*]";

/// A parsed rule path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulePath {
    /// Plain path to one location.
    Plain(KeyPath),
    /// `list[*].suffix`: `suffix` applies inside every element of `list`.
    Each { list: KeyPath, suffix: KeyPath },
}

/// Parse a dotted path where at most one segment carries the `[*]` suffix.
pub fn parse_rule_path(path: &str) -> Result<RulePath, RuleTableError> {
    let invalid = |reason: &str| RuleTableError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let mut head: Vec<String> = Vec::new();
    let mut tail: Vec<String> = Vec::new();
    let mut marked = false;

    for segment in path.split('.') {
        let (key, is_each) = match segment.strip_suffix(EACH_MARKER) {
            Some(key) => (key, true),
            None => (segment, false),
        };
        if key.is_empty() {
            return Err(invalid("empty key segment"));
        }
        if key.contains(EACH_MARKER) {
            return Err(invalid("`[*]` may only end a segment"));
        }

        if marked {
            if is_each {
                return Err(invalid("only one `[*]` marker is supported"));
            }
            tail.push(key.to_string());
        } else {
            head.push(key.to_string());
            marked = is_each;
        }
    }

    if !marked {
        return Ok(RulePath::Plain(KeyPath::new(head)));
    }
    if tail.is_empty() {
        return Err(invalid("`[*]` must be followed by the key to default in each element"));
    }
    Ok(RulePath::Each {
        list: KeyPath::new(head),
        suffix: KeyPath::new(tail),
    })
}
