//! Human-readable labels and colour bands for composite scores

use serde::{Deserialize, Serialize};

/// Colour band a score falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    /// 80 and above
    Excellent,
    /// 60 to 79
    Good,
    /// 40 to 59
    Fair,
    /// Below 40
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }

    /// Hex colour used by web front-ends
    pub fn hex_color(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "#22c55e",
            ScoreBand::Good => "#f59e0b",
            ScoreBand::Fair => "#f97316",
            ScoreBand::Poor => "#ef4444",
        }
    }
}

/// Label thresholds, highest first
const LABELS: [(u8, &str); 7] = [
    (90, "Excellent"),
    (80, "Great"),
    (70, "Good"),
    (60, "Fair"),
    (40, "Needs Work"),
    (1, "Poor"),
    (0, "No Prompt"),
];

/// Label for a composite score
pub fn score_label(score: u8) -> &'static str {
    LABELS
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, label)| *label)
        .unwrap_or("No Prompt")
}

/// Label and band of a composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rating {
    pub score: u8,
    pub label: &'static str,
    pub band: ScoreBand,
}

impl Rating {
    pub fn of(score: u8) -> Self {
        Self {
            score,
            label: score_label(score),
            band: ScoreBand::from_score(score),
        }
    }
}
