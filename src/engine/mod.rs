//! The suggestion engine: one provider round trip per operation, a
//! documented fallback for every failure mode.

mod batch;
mod prompts;

pub use batch::{BatchOutcome, BatchReport, TaskFields, TaskSource};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::Value;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::diagnostics::{DiagnosticEvent, DiagnosticKind, DiagnosticSink, LogSink};
use crate::extract;
use crate::insights::ContextInsights;
use crate::priority::PriorityLabel;
use crate::provider::{ChatApi, ChatMessage, HttpChatClient};
use crate::suggestion::{SuggestionRequest, TaskSuggestions};

// Per-operation protocol parameters. Token budgets bound reply length to
// what each parser needs; temperatures are fixed here, not caller-tunable.
const ANALYZE_MAX_TOKENS: u32 = 300;
const ANALYZE_TEMPERATURE: f64 = 0.5;
const PRIORITY_MAX_TOKENS: u32 = 10;
const PRIORITY_TEMPERATURE: f64 = 0.2;
const DEADLINE_MAX_TOKENS: u32 = 20;
const DEADLINE_TEMPERATURE: f64 = 0.7;
const CATEGORY_MAX_TOKENS: u32 = 50;
const CATEGORY_TEMPERATURE: f64 = 0.7;
const ENHANCE_MAX_TOKENS: u32 = 200;
const ENHANCE_TEMPERATURE: f64 = 0.8;

/// Anchor a suggested date to day-start UTC, for hosts persisting the
/// deadline as a timestamp.
#[must_use]
pub fn day_start_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Issues chat-completion calls and extracts structured suggestions from
/// the replies.
///
/// Operations never fail: a provider outage or a reply the parsers cannot
/// use degrades to the operation's fallback value, and the degradation is
/// reported through the diagnostics sink.
pub struct SuggestionEngine {
    api: Arc<dyn ChatApi>,
    sink: Arc<dyn DiagnosticSink>,
}

impl SuggestionEngine {
    /// Engine over an HTTP endpoint, logging degradations through tracing.
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_api(Arc::new(HttpChatClient::new(config)))
    }

    /// Engine over any [`ChatApi`] backend.
    pub fn with_api(api: Arc<dyn ChatApi>) -> Self {
        Self {
            api,
            sink: Arc::new(LogSink),
        }
    }

    /// Replace the diagnostics sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Ask the model to analyze free-form context text.
    ///
    /// `None` means the provider call failed. `Some(FormatError { .. })`
    /// means the provider answered but not with the documented JSON shape;
    /// the raw reply is preserved for the host to store or show.
    pub async fn analyze_context(&self, text: &str) -> Option<ContextInsights> {
        let messages = prompts::analyze_messages(text);
        let reply = self
            .complete_or_report(
                "analyze_context",
                &messages,
                ANALYZE_MAX_TOKENS,
                ANALYZE_TEMPERATURE,
            )
            .await?;

        let insights = ContextInsights::parse(&reply);
        if matches!(insights, ContextInsights::FormatError { .. }) {
            self.report_content("analyze_context", &reply);
        }
        Some(insights)
    }

    /// Priority score in `[0, 100]`; `0.0` when no score could be obtained,
    /// so unrated tasks never surface as urgent.
    pub async fn priority_score(
        &self,
        title: &str,
        description: &str,
        hints: Option<&Value>,
    ) -> f64 {
        let messages = prompts::priority_messages(title, description, hints);
        let Some(reply) = self
            .complete_or_report(
                "priority_score",
                &messages,
                PRIORITY_MAX_TOKENS,
                PRIORITY_TEMPERATURE,
            )
            .await
        else {
            return 0.0;
        };

        match extract::first_number(&reply) {
            Some(value) => extract::clamp_score(value),
            None => {
                self.report_content("priority_score", &reply);
                0.0
            }
        }
    }

    /// Deadline suggestion anchored at `reference`; `reference + 7 days`
    /// when no usable date came back. Always produces a date.
    pub async fn suggest_deadline(
        &self,
        title: &str,
        description: &str,
        reference: NaiveDate,
        hints: Option<&Value>,
    ) -> NaiveDate {
        let messages = prompts::deadline_messages(title, description, reference, hints);
        let Some(reply) = self
            .complete_or_report(
                "suggest_deadline",
                &messages,
                DEADLINE_MAX_TOKENS,
                DEADLINE_TEMPERATURE,
            )
            .await
        else {
            return reference + chrono::Duration::days(7);
        };

        match extract::first_date(&reply) {
            Some(date) => date,
            None => {
                self.report_content("suggest_deadline", &reply);
                reference + chrono::Duration::days(7)
            }
        }
    }

    /// Category/tag suggestions in reply order; empty when the provider
    /// call failed.
    pub async fn suggest_categories(
        &self,
        title: &str,
        description: &str,
        existing: &[String],
    ) -> Vec<String> {
        let messages = prompts::categories_messages(title, description, existing);
        let Some(reply) = self
            .complete_or_report(
                "suggest_categories",
                &messages,
                CATEGORY_MAX_TOKENS,
                CATEGORY_TEMPERATURE,
            )
            .await
        else {
            return Vec::new();
        };

        extract::split_list(&reply)
    }

    /// Expanded description; the original text, unchanged, when the
    /// provider call failed. Safe to apply unconditionally.
    pub async fn enhance_description(
        &self,
        title: &str,
        description: &str,
        hints: Option<&Value>,
    ) -> String {
        let messages = prompts::enhance_messages(title, description, hints);
        match self
            .complete_or_report(
                "enhance_description",
                &messages,
                ENHANCE_MAX_TOKENS,
                ENHANCE_TEMPERATURE,
            )
            .await
        {
            Some(reply) => reply,
            None => description.to_string(),
        }
    }

    /// Full suggestion bundle: priority, deadline, categories, enhanced
    /// description. Four sequential round trips with independent fallbacks;
    /// one failing call never aborts the others.
    ///
    /// Works for stored tasks and hypothetical ones alike; the request
    /// carries everything the prompts need.
    pub async fn suggest(&self, request: &SuggestionRequest) -> TaskSuggestions {
        let reference = request
            .reference_date
            .unwrap_or_else(|| Utc::now().date_naive());
        let hints = request.context_hints.as_ref();

        let priority_score = self
            .priority_score(&request.title, &request.description, hints)
            .await;
        let deadline = self
            .suggest_deadline(&request.title, &request.description, reference, hints)
            .await;
        let categories = self
            .suggest_categories(
                &request.title,
                &request.description,
                &request.existing_categories,
            )
            .await;
        let description = self
            .enhance_description(&request.title, &request.description, hints)
            .await;

        TaskSuggestions {
            priority_score,
            priority: PriorityLabel::display_from_score(priority_score),
            deadline,
            categories,
            description,
        }
    }

    async fn complete_or_report(
        &self,
        operation: &'static str,
        messages: &[ChatMessage],
        max_tokens: u32,
        temperature: f64,
    ) -> Option<String> {
        match self.api.complete(messages, max_tokens, temperature).await {
            Ok(reply) => Some(reply),
            Err(error) => {
                self.sink.record(&DiagnosticEvent::new(
                    DiagnosticKind::from(&error),
                    operation,
                    error.to_string(),
                ));
                None
            }
        }
    }

    fn report_content(&self, operation: &'static str, reply: &str) {
        self.sink.record(&DiagnosticEvent::new(
            DiagnosticKind::MalformedContent,
            operation,
            reply,
        ));
    }
}
