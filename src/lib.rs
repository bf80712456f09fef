//! AI suggestion engine for task-management backends: chat-completion
//! calls against an OpenAI-compatible endpoint, best-effort parsing of the
//! free-form replies, and a documented fallback for every failure mode so a
//! dead model never fails a host request.

#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod extract;
pub mod insights;
pub mod priority;
pub mod provider;
pub mod suggestion;

pub use config::{EngineConfig, Settings};
pub use diagnostics::{DiagnosticEvent, DiagnosticKind, DiagnosticSink};
pub use engine::{
    BatchOutcome, BatchReport, SuggestionEngine, TaskFields, TaskSource, day_start_utc,
};
pub use error::{ConfigError, EngineError, ProviderError};
pub use insights::{ContextInsights, InsightReport};
pub use priority::PriorityLabel;
pub use provider::{ChatApi, ChatMessage, HttpChatClient};
pub use suggestion::{SuggestionRequest, TaskSuggestions};
