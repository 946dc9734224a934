//! Scoring configuration from TOML (`[scoring.quality]`, `[scoring.vote]`)

use concord_domain::{ConfigIssue, ConfigIssueCode, QualityWeights, VoteWeights};
use serde::{Deserialize, Serialize};

const WEIGHT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileScoringConfig {
    pub quality: QualityWeights,
    pub vote: VoteWeights,
}

impl FileScoringConfig {
    /// Both blocks are expected to reach exactly 1.0 at their maximum.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let checks = [
            ("scoring.quality", self.quality.max_total()),
            ("scoring.vote", self.vote.total()),
        ];
        for (section, total) in checks {
            if (total - 1.0).abs() > WEIGHT_TOLERANCE {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::WeightsNotNormalized {
                        section: section.to_string(),
                    },
                    format!(
                        "[{}] weights add up to {:.3}, expected 1.0; scores will be clamped",
                        section, total
                    ),
                ));
            }
        }

        issues
    }
}
