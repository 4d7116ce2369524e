//! CLI domain: parse, route, help, output, and presentation only.
//! No normalization logic; single route table dispatches to the normalizer.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_check_result, format_classification, format_document, format_normalize_summary,
    format_rule_table_json, format_rule_table_text, format_rule_table_toml,
};
pub use route::RunContext;
