//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::TreeError(inner) => format!(
            "error: {} (strict mode is on; lenient mode skips type mismatches)",
            inner
        ),
        other => format!("error: {}", other),
    }
}
