//! Transient request/response value types for suggestion calls.
//!
//! Nothing here is persisted by this crate; the host backend owns storage
//! and copies out whatever fields it wants to keep.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::priority::PriorityLabel;

/// Input for the suggestion operations.
///
/// `title` must be non-empty for priority, deadline and category
/// suggestions; enforcing that is the caller's job (the host validates task
/// fields long before this crate sees them). An empty `description` is fine
/// everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub title: String,
    pub description: String,
    /// Prior analysis output (or any JSON) embedded into prompts as a hint.
    pub context_hints: Option<Value>,
    /// Anchor for deadline suggestions; today when unset.
    pub reference_date: Option<NaiveDate>,
    /// Category names already known to the host, offered to the model as
    /// non-authoritative hints.
    pub existing_categories: Vec<String>,
}

impl SuggestionRequest {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            context_hints: None,
            reference_date: None,
            existing_categories: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_hints(mut self, hints: Value) -> Self {
        self.context_hints = Some(hints);
        self
    }

    #[must_use]
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    #[must_use]
    pub fn with_existing_categories(mut self, categories: Vec<String>) -> Self {
        self.existing_categories = categories;
        self
    }
}

/// Complete suggestion bundle for one task.
///
/// Every field is already fallback-resolved: a provider outage yields
/// `{0.0, Low, reference + 7 days, [], original description}` rather than
/// an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSuggestions {
    pub priority_score: f64,
    /// Advisory bucket for display, from [`PriorityLabel::display_from_score`].
    pub priority: PriorityLabel,
    pub deadline: NaiveDate,
    pub categories: Vec<String>,
    pub description: String,
}
