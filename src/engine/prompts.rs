//! Prompt construction for the suggestion operations.
//!
//! Each operation sends one system/user pair. The user prompt embeds task
//! fields in single quotes and optional hints behind fixed prefixes; the
//! parsers in [`crate::extract`] expect replies in the formats these
//! prompts request.

use chrono::NaiveDate;
use serde_json::Value;

use crate::provider::ChatMessage;

const ANALYZE_SYSTEM: &str =
    "You are a helpful assistant that analyzes text and extracts key information.";

const PRIORITY_SYSTEM: &str = "You are an AI assistant that helps prioritize tasks. \
     Assign a priority score from 0 to 100, where 100 is most urgent. \
     Only output the score as a number.";

const DEADLINE_SYSTEM: &str = "You are an AI assistant that suggests realistic deadlines. \
     Output the suggested deadline in 'YYYY-MM-DD' format. \
     Consider task complexity and current date.";

const CATEGORY_SYSTEM: &str = "You are an AI assistant that suggests categories and tags for tasks. \
     Output a comma-separated list of categories/tags. Be concise.";

const ENHANCE_SYSTEM: &str = "You are an AI assistant that enhances task descriptions. \
     Expand on the provided task description, making it more detailed and actionable, \
     especially considering any provided context. Keep it concise but informative.";

/// `"Relevant context insights: {json}. "`, or empty when there are no hints.
fn context_hint(hints: Option<&Value>) -> String {
    hints
        .map(|value| format!("Relevant context insights: {value}. "))
        .unwrap_or_default()
}

/// `"Existing categories: a, b. "`, or empty when the host has none.
fn existing_categories_hint(existing: &[String]) -> String {
    if existing.is_empty() {
        String::new()
    } else {
        format!("Existing categories: {}. ", existing.join(", "))
    }
}

pub(super) fn analyze_messages(text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(ANALYZE_SYSTEM),
        ChatMessage::user(format!(
            "Analyze the following text and extract key entities, keywords, and a general \
             sentiment (positive, negative, neutral). Format the output as a JSON object with \
             keys 'entities', 'keywords', 'sentiment'. Text: '{text}'"
        )),
    ]
}

pub(super) fn priority_messages(
    title: &str,
    description: &str,
    hints: Option<&Value>,
) -> Vec<ChatMessage> {
    let context = context_hint(hints);
    vec![
        ChatMessage::system(PRIORITY_SYSTEM),
        ChatMessage::user(format!(
            "Task: '{title}'. Description: '{description}'. \
             {context}What is the priority score (0-100)?"
        )),
    ]
}

pub(super) fn deadline_messages(
    title: &str,
    description: &str,
    reference: NaiveDate,
    hints: Option<&Value>,
) -> Vec<ChatMessage> {
    let context = context_hint(hints);
    vec![
        ChatMessage::system(DEADLINE_SYSTEM),
        ChatMessage::user(format!(
            "Task: '{title}'. Description: '{description}'. Current date: {reference}. \
             {context}What is a realistic deadline for this task? (YYYY-MM-DD)"
        )),
    ]
}

pub(super) fn categories_messages(
    title: &str,
    description: &str,
    existing: &[String],
) -> Vec<ChatMessage> {
    let existing = existing_categories_hint(existing);
    vec![
        ChatMessage::system(CATEGORY_SYSTEM),
        ChatMessage::user(format!(
            "Task: '{title}'. Description: '{description}'. \
             {existing}Suggest categories and tags for this task (comma-separated):"
        )),
    ]
}

pub(super) fn enhance_messages(
    title: &str,
    description: &str,
    hints: Option<&Value>,
) -> Vec<ChatMessage> {
    let context = context_hint(hints);
    vec![
        ChatMessage::system(ENHANCE_SYSTEM),
        ChatMessage::user(format!(
            "Task: '{title}'. Original Description: '{description}'. \
             {context}Enhanced Description:"
        )),
    ]
}
