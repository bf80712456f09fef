//! Priority score to label mappings.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Coarse urgency bucket derived from a numeric priority score.
///
/// Two mappings exist on purpose. [`PriorityLabel::from_score`] is the
/// canonical one used when a score is persisted onto a task (batch
/// prioritization). [`PriorityLabel::display_from_score`] is the softer
/// bucketing shown alongside a fresh suggestion bundle; it never yields
/// `Urgent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PriorityLabel {
    Urgent,
    High,
    Medium,
    Low,
}

impl PriorityLabel {
    /// Canonical mapping applied when a score is written back to a task.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Urgent
        } else if score >= 60.0 {
            Self::High
        } else if score >= 30.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Advisory mapping used in suggestion bundles.
    #[must_use]
    pub fn display_from_score(score: f64) -> Self {
        if score >= 70.0 {
            Self::High
        } else if score >= 40.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}
