use anyhow::Context;
use async_trait::async_trait;
use base64::Engine;
use serde_json::json;

use super::{DocumentIndex, IndexProvider};
use crate::models::{DocChunk, SourceDocument};

/// Client for an external index service: documents go up once at startup,
/// searches reference the returned index id.
pub struct RemoteIndexProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl RemoteIndexProvider {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl IndexProvider for RemoteIndexProvider {
    async fn build_index(
        &self,
        documents: &[SourceDocument],
    ) -> anyhow::Result<Box<dyn DocumentIndex>> {
        let docs: Vec<serde_json::Value> = documents
            .iter()
            .map(|doc| {
                json!({
                    "name": doc.name,
                    "bytes": base64::engine::general_purpose::STANDARD.encode(&doc.bytes),
                })
            })
            .collect();

        let resp = self
            .client
            .post(format!("{}/index", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&json!({ "documents": docs }))
            .send()
            .await
            .context("failed to call index service")?;

        let status = resp.status();
        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse index service response")?;

        if !status.is_success() {
            anyhow::bail!("index service error ({}): {}", status, data);
        }

        let index_id = data["index_id"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("missing index_id in index service response"))?
            .to_string();

        Ok(Box::new(RemoteIndex {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            index_id,
            client: self.client.clone(),
        }))
    }
}

pub struct RemoteIndex {
    base_url: String,
    api_key: String,
    index_id: String,
    client: reqwest::Client,
}

#[async_trait]
impl DocumentIndex for RemoteIndex {
    async fn similarity_search(&self, query: &str, k: usize) -> anyhow::Result<Vec<DocChunk>> {
        let resp = self
            .client
            .post(format!("{}/index/{}/search", self.base_url, self.index_id))
            .bearer_auth(&self.api_key)
            .json(&json!({ "query": query, "k": k }))
            .send()
            .await
            .context("failed to call index search")?;

        let status = resp.status();
        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse index search response")?;

        if !status.is_success() {
            anyhow::bail!("index search error ({}): {}", status, data);
        }

        serde_json::from_value(data["results"].clone()).context("malformed search results")
    }
}
