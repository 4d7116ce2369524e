//! CLI command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name string used in log events (e.g. "normalize", "rules").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Normalize { .. } => "normalize",
        Commands::Classify { .. } => "classify",
        Commands::Rules { .. } => "rules",
        Commands::Check { .. } => "check",
    }
}
