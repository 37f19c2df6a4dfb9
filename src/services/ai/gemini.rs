use anyhow::Context;
use async_trait::async_trait;
use futures::stream;
use futures::StreamExt;
use serde_json::json;

use super::{ChatModel, Message, TokenStream};

pub struct GeminiProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChatModel for GeminiProvider {
    async fn stream_chat(
        &self,
        system_prompt: &str,
        messages: &[Message],
    ) -> anyhow::Result<TokenStream> {
        // Gemini calls the assistant role "model" and has no system role in
        // the contents list.
        let contents: Vec<serde_json::Value> = messages
            .iter()
            .map(|msg| {
                let role = if msg.role == "assistant" { "model" } else { "user" };
                json!({
                    "role": role,
                    "parts": [{"text": msg.content}],
                })
            })
            .collect();

        let body = json!({
            "system_instruction": {"parts": [{"text": system_prompt}]},
            "contents": contents,
        });

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:streamGenerateContent?alt=sse",
            self.model
        );

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("failed to call Gemini API")?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error ({status}): {detail}");
        }

        let deltas = resp
            .bytes_stream()
            .scan(String::new(), |buf, chunk| {
                let items: Vec<anyhow::Result<String>> = match chunk {
                    Ok(bytes) => data_lines(buf, &bytes)
                        .into_iter()
                        .filter_map(|data| text_from_data(&data).map(Ok))
                        .collect(),
                    Err(e) => vec![Err(anyhow::Error::new(e).context("Gemini stream failed"))],
                };
                futures::future::ready(Some(stream::iter(items)))
            })
            .flatten();

        Ok(Box::pin(deltas) as TokenStream)
    }
}

/// Buffer incoming bytes and split out completed SSE `data:` lines.
fn data_lines(buf: &mut String, chunk: &[u8]) -> Vec<String> {
    buf.push_str(&String::from_utf8_lossy(chunk));

    let mut lines = Vec::new();
    while let Some(pos) = buf.find('\n') {
        let line: String = buf.drain(..=pos).collect();
        if let Some(data) = line.trim().strip_prefix("data:") {
            lines.push(data.trim().to_string());
        }
    }
    lines
}

fn text_from_data(data: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(data).ok()?;
    value["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_from_data() {
        let data = r#"{"candidates":[{"content":{"parts":[{"text":"Hello"}],"role":"model"}}]}"#;
        assert_eq!(text_from_data(data), Some("Hello".to_string()));
    }

    #[test]
    fn test_text_from_data_empty_candidate() {
        let data = r#"{"candidates":[{"finishReason":"STOP"}]}"#;
        assert_eq!(text_from_data(data), None);
    }
}
