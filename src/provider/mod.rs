pub mod client;
pub mod traits;

pub use client::{HttpChatClient, build_provider_client};
pub use traits::{ChatApi, ChatMessage};
