use anyhow::Context;
use async_trait::async_trait;
use futures::stream;
use futures::StreamExt;
use serde_json::json;

use super::{ChatModel, Message, TokenStream};

pub struct OpenAiProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiProvider {
    async fn stream_chat(
        &self,
        system_prompt: &str,
        messages: &[Message],
    ) -> anyhow::Result<TokenStream> {
        let mut chat_messages = vec![json!({
            "role": "system",
            "content": system_prompt,
        })];

        for msg in messages {
            chat_messages.push(json!({
                "role": msg.role,
                "content": msg.content,
            }));
        }

        let body = json!({
            "model": self.model,
            "messages": chat_messages,
            "temperature": 0.7,
            "stream": true,
        });

        let resp = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("failed to call OpenAI API")?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI API error ({status}): {detail}");
        }

        let deltas = resp
            .bytes_stream()
            .scan(String::new(), |buf, chunk| {
                let items: Vec<anyhow::Result<String>> = match chunk {
                    Ok(bytes) => data_lines(buf, &bytes)
                        .into_iter()
                        .filter(|data| data != "[DONE]")
                        .filter_map(|data| delta_from_data(&data).map(Ok))
                        .collect(),
                    Err(e) => vec![Err(anyhow::Error::new(e).context("OpenAI stream failed"))],
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

fn delta_from_data(data: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(data).ok()?;
    value["choices"][0]["delta"]["content"]
        .as_str()
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_from_data() {
        let data = r#"{"choices":[{"delta":{"content":"Hel"}}]}"#;
        assert_eq!(delta_from_data(data), Some("Hel".to_string()));
    }

    #[test]
    fn test_delta_from_data_no_content() {
        // The final chunk carries only a finish_reason, no delta text.
        let data = r#"{"choices":[{"delta":{},"finish_reason":"stop"}]}"#;
        assert_eq!(delta_from_data(data), None);
    }

    #[test]
    fn test_data_lines_across_chunk_boundary() {
        let mut buf = String::new();

        let first = data_lines(&mut buf, b"data: {\"a\":1}\ndata: {\"b\"");
        assert_eq!(first, vec![r#"{"a":1}"#.to_string()]);

        let second = data_lines(&mut buf, b":2}\n\n");
        assert_eq!(second, vec![r#"{"b":2}"#.to_string()]);
    }

    #[test]
    fn test_data_lines_skips_non_data() {
        let mut buf = String::new();
        let lines = data_lines(&mut buf, b": keep-alive\ndata: [DONE]\n");
        assert_eq!(lines, vec!["[DONE]".to_string()]);
    }
}
