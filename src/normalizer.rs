//! Normalizer
//!
//! Applies a rule table to one configuration tree, in table order, mutating it in place.
//! The normalizer keeps no state between calls beyond its table and options.

use crate::error::TreeError;
use crate::rules::{PathRule, RuleTable};
use crate::tree::{
    apply_default, apply_to_each, classify, get_path_mut, value_kind, Classification, KeyPath,
    Strictness, WriteOutcome,
};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Options for one normalizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub strictness: Strictness,
}

impl NormalizeOptions {
    pub fn strict() -> Self {
        Self {
            strictness: Strictness::Strict,
        }
    }
}

/// Tally of one normalize pass. Counts individual write targets, so a group rule counts
/// once per member key and a for-each rule once per list element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub rules: usize,
    pub defaulted: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

impl NormalizeReport {
    fn record(&mut self, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Written => self.defaulted += 1,
            WriteOutcome::ParentMissing => self.skipped += 1,
        }
    }
}

/// Rule-table driven list-default normalizer
#[derive(Debug, Clone)]
pub struct Normalizer {
    table: RuleTable,
    options: NormalizeOptions,
}

impl Normalizer {
    pub fn new(table: RuleTable, options: NormalizeOptions) -> Self {
        Self { table, options }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn options(&self) -> NormalizeOptions {
        self.options
    }

    /// Normalize `tree` in place and hand the same tree back.
    pub fn normalize<'t>(&self, tree: &'t mut Value) -> Result<&'t mut Value, TreeError> {
        self.normalize_with_report(tree)?;
        Ok(tree)
    }

    /// Normalize `tree` in place, returning what was done.
    pub fn normalize_with_report(&self, tree: &mut Value) -> Result<NormalizeReport, TreeError> {
        let report = apply_table(&self.table, self.options.strictness, tree)?;
        log_summary(&report);
        Ok(report)
    }
}

/// Lenient normalization with a borrowed table.
pub fn normalize<'t>(tree: &'t mut Value, table: &RuleTable) -> &'t mut Value {
    // Lenient passes record type mismatches as skips and never return `Err`.
    if let Ok(report) = apply_table(table, Strictness::Lenient, tree) {
        log_summary(&report);
    }
    tree
}

fn log_summary(report: &NormalizeReport) {
    info!(
        rules = report.rules,
        defaulted = report.defaulted,
        unchanged = report.unchanged,
        skipped = report.skipped,
        "Normalization complete"
    );
}

fn apply_table(
    table: &RuleTable,
    strictness: Strictness,
    tree: &mut Value,
) -> Result<NormalizeReport, TreeError> {
    let mut report = NormalizeReport::default();
    for rule in table {
        apply_rule(rule, strictness, tree, &mut report)?;
        report.rules += 1;
    }
    Ok(report)
}

fn apply_rule(
    rule: &PathRule,
    strictness: Strictness,
    tree: &mut Value,
    report: &mut NormalizeReport,
) -> Result<(), TreeError> {
    match rule {
        PathRule::List {
            parent,
            key,
            default,
        } => default_path(tree, &parent.child(key.as_str()), default, strictness, report),
        PathRule::Group {
            parent,
            keys,
            default,
        } => {
            if classify(tree, parent, strictness)?.needs_default() {
                let container: Map<String, Value> = keys
                    .iter()
                    .map(|key| (key.clone(), default.clone()))
                    .collect();
                let outcome = apply_default(tree, parent, &Value::Object(container), strictness)?;
                debug!(rule = %rule, ?outcome, "Group container defaulted");
                for _ in keys {
                    report.record(outcome);
                }
                return Ok(());
            }
            for key in keys {
                default_path(tree, &parent.child(key.as_str()), default, strictness, report)?;
            }
            Ok(())
        }
        PathRule::ForEach {
            list,
            suffix,
            default,
        } => each_element(tree, list, suffix, default, strictness, report),
    }
}

fn default_path(
    tree: &mut Value,
    path: &KeyPath,
    default: &Value,
    strictness: Strictness,
    report: &mut NormalizeReport,
) -> Result<(), TreeError> {
    let state = classify(tree, path, strictness)?;
    if state == Classification::Present {
        report.unchanged += 1;
        return Ok(());
    }
    let outcome = apply_default(tree, path, default, strictness)?;
    debug!(path = %path, ?state, ?outcome, "List default");
    report.record(outcome);
    Ok(())
}

fn each_element(
    tree: &mut Value,
    list: &KeyPath,
    suffix: &KeyPath,
    default: &Value,
    strictness: Strictness,
    report: &mut NormalizeReport,
) -> Result<(), TreeError> {
    if classify(tree, list, strictness)? != Classification::Present {
        debug!(list = %list, "List absent or empty, nothing to default per element");
        return Ok(());
    }

    let elements = match get_path_mut(tree, list.keys()) {
        Some(Value::Array(elements)) => elements,
        Some(other) => {
            if strictness.is_strict() {
                return Err(TreeError::TypeMismatch {
                    path: list.to_string(),
                    expected: "sequence",
                    found: value_kind(other),
                });
            }
            warn!(list = %list, found = value_kind(other), "Expected a sequence, skipping");
            report.skipped += 1;
            return Ok(());
        }
        None => return Ok(()),
    };

    let outcome = apply_to_each(elements, suffix, default, strictness)
        .map_err(|e| e.within(&list.to_string()))?;
    debug!(
        list = %list,
        suffix = %suffix,
        defaulted = outcome.defaulted,
        "Per-element defaults applied"
    );
    report.defaulted += outcome.defaulted;
    report.unchanged += outcome.unchanged;
    report.skipped += outcome.skipped;
    Ok(())
}
