use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

/// Forwards a single chat message to an external chat backend and returns
/// its reply. One call per inbound request, no retries.
#[async_trait]
pub trait ChatRelay: Send + Sync {
    async fn forward(&self, message: &str) -> anyhow::Result<String>;
}

pub struct HttpChatRelay {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpChatRelay {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            endpoint,
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChatRelay for HttpChatRelay {
    async fn forward(&self, message: &str) -> anyhow::Result<String> {
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&json!({ "message": message }))
            .send()
            .await
            .context("failed to call chat backend")?;

        let status = resp.status();
        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse chat backend response")?;

        if !status.is_success() {
            anyhow::bail!("chat backend error ({}): {}", status, data);
        }

        data["response"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing response in chat backend reply"))
    }
}
