//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for orchestration results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Answer plus provenance (provider, confidence, candidates, tokens)
    Full,
    /// Only the final annotated answer (default)
    #[default]
    Answer,
    /// JSON output
    Json,
}
