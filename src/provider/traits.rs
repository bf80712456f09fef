use serde::Serialize;
use std::future::Future;
use std::pin::Pin;

use crate::error::ProviderError;

/// One prompt message as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// A chat-completion backend.
///
/// Object-safe so the engine can hold `Arc<dyn ChatApi>` and tests can
/// script replies without a server. One call is one single-attempt round
/// trip: no retries, no streaming.
pub trait ChatApi: Send + Sync {
    /// Send `messages` and return the trimmed content of the first choice.
    ///
    /// `max_tokens` and `temperature` are per-call protocol parameters; the
    /// engine fixes them per operation.
    fn complete<'a>(
        &'a self,
        messages: &'a [ChatMessage],
        max_tokens: u32,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = Result<String, ProviderError>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::ChatMessage;

    #[test]
    fn message_constructors_set_roles() {
        let system = ChatMessage::system("You are a helpful assistant.");
        assert_eq!(system.role, "system");
        let user = ChatMessage::user("hello");
        assert_eq!(user.role, "user");
        assert_eq!(user.content, "hello");
    }

    #[test]
    fn message_serializes_role_and_content() {
        let json = serde_json::to_string(&ChatMessage::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }
}
