//! Orchestration stages

use serde::{Deserialize, Serialize};

/// The stages of one orchestrated request, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Domain-restricted source search
    Retrieval,
    /// Concurrent fan-out to every configured provider
    Dispatch,
    /// Scoring, voting and citation formatting
    Selection,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Retrieval => "retrieval",
            Stage::Dispatch => "dispatch",
            Stage::Selection => "selection",
        }
    }

    /// 1-based position, for "stage n/3" displays.
    pub fn number(&self) -> usize {
        match self {
            Stage::Retrieval => 1,
            Stage::Dispatch => 2,
            Stage::Selection => 3,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
