//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::IndexError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &IndexError) -> String {
    match e {
        IndexError::Aspect(inner) => format!("Could not resolve content aspects: {}", inner),
        IndexError::Serialization(inner) => format!("Invalid content item document: {}", inner),
        other => other.to_string(),
    }
}
