//! CLI presentation: text and json formatters per command.

use crate::error::ApiError;
use crate::normalizer::NormalizeReport;
use crate::rules::{RuleFile, RuleTable};
use crate::tree::Classification;
use comfy_table::Table;
use serde_json::Value;
use std::path::Path;

/// Render a JSON document, compact or pretty.
pub fn format_document(document: &Value, pretty: bool) -> Result<String, ApiError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(rendered)
}

pub fn format_normalize_summary(output: &Path, report: &NormalizeReport) -> String {
    format!(
        "Normalized {} ({} rules: {} defaulted, {} unchanged, {} skipped)",
        output.display(),
        report.rules,
        report.defaulted,
        report.unchanged,
        report.skipped
    )
}

pub fn format_rule_table_text(table: &RuleTable) -> String {
    let mut table_out = Table::new();
    table_out.load_preset(comfy_table::presets::UTF8_FULL);
    table_out.set_header(vec!["#", "Kind", "Path", "Default"]);
    for (index, rule) in table.iter().enumerate() {
        table_out.add_row(vec![
            (index + 1).to_string(),
            rule.kind().to_string(),
            rule.to_string(),
            rule.default_value().to_string(),
        ]);
    }
    table_out.to_string()
}

pub fn format_rule_table_json(table: &RuleTable) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&RuleFile::from(table))?)
}

pub fn format_rule_table_toml(table: &RuleTable) -> Result<String, ApiError> {
    Ok(RuleFile::from(table).to_toml_string()?)
}

pub fn format_check_result(path: &Path, table: &RuleTable) -> String {
    format!("{}: {} rules, valid", path.display(), table.len())
}

pub fn format_classification(path: &str, state: Classification) -> String {
    let label = match state {
        Classification::Missing => "missing",
        Classification::Empty => "empty",
        Classification::Present => "present",
    };
    format!("{}: {}", path, label)
}
