//! Batch prioritization over a host-owned task store.

use serde::Serialize;
use std::future::Future;
use std::pin::Pin;

use super::SuggestionEngine;
use crate::priority::PriorityLabel;

/// The task fields batch prioritization reads from the host store.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
}

impl TaskFields {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Lookup seam into the host's task store.
///
/// Object-safe so the engine never depends on the host's persistence
/// stack; `Err` is for store failures, `Ok(None)` for ids with no task.
pub trait TaskSource: Send + Sync {
    fn fetch<'a>(
        &'a self,
        id: i64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Option<TaskFields>>> + Send + 'a>>;
}

/// Per-entry result of a batch run, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    /// Scored, fallback or not; `label` uses the canonical persisted
    /// mapping.
    Scored {
        id: i64,
        score: f64,
        label: PriorityLabel,
    },
    NotFound { id: i64 },
    SourceError { id: i64, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<BatchOutcome>,
    /// Entries that went through scoring. Provider failures count (the
    /// 0.0 fallback is a result); missing tasks and store errors do not.
    pub processed: usize,
}

impl SuggestionEngine {
    /// Score the given tasks one at a time. A missing task or a store
    /// error is recorded in place and never aborts the rest of the batch.
    pub async fn prioritize_batch(&self, ids: &[i64], source: &dyn TaskSource) -> BatchReport {
        let mut outcomes = Vec::with_capacity(ids.len());
        let mut processed = 0;

        for &id in ids {
            match source.fetch(id).await {
                Ok(Some(task)) => {
                    let score = self
                        .priority_score(&task.title, &task.description, None)
                        .await;
                    outcomes.push(BatchOutcome::Scored {
                        id,
                        score,
                        label: PriorityLabel::from_score(score),
                    });
                    processed += 1;
                }
                Ok(None) => outcomes.push(BatchOutcome::NotFound { id }),
                Err(error) => outcomes.push(BatchOutcome::SourceError {
                    id,
                    message: error.to_string(),
                }),
            }
        }

        BatchReport {
            outcomes,
            processed,
        }
    }
}
