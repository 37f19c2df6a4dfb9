pub mod echo;
pub mod gemini;
pub mod openai;

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Incremental text yielded by a chat model. The reply arrives as a lazy
/// sequence of fragments; dropping the stream stops the pull.
pub type TokenStream = Pin<Box<dyn Stream<Item = anyhow::Result<String>> + Send>>;

#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn stream_chat(
        &self,
        system_prompt: &str,
        messages: &[Message],
    ) -> anyhow::Result<TokenStream>;
}
