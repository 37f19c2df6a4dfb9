use async_trait::async_trait;
use futures::stream;

use super::{ChatModel, Message, TokenStream};

/// Credential-less stand-in used when no chat provider is configured.
/// Replays the question as a placeholder answer instead of calling out
/// anywhere.
pub struct EchoProvider;

#[async_trait]
impl ChatModel for EchoProvider {
    async fn stream_chat(
        &self,
        _system_prompt: &str,
        messages: &[Message],
    ) -> anyhow::Result<TokenStream> {
        let question = messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.clone())
            .unwrap_or_default();

        let reply = format!("You asked: {question} (This is a placeholder response.)");

        Ok(Box::pin(stream::iter(vec![Ok(reply)])) as TokenStream)
    }
}
