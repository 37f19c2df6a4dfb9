pub mod remote;

use async_trait::async_trait;

use crate::models::{DocChunk, SourceDocument};

/// A built retrieval index, queryable for the top-k passages closest to a
/// question. Indexing and nearest-neighbor search happen on the other side
/// of this trait.
#[async_trait]
pub trait DocumentIndex: Send + Sync {
    async fn similarity_search(&self, query: &str, k: usize) -> anyhow::Result<Vec<DocChunk>>;
}

/// Builds a [`DocumentIndex`] from raw documents.
#[async_trait]
pub trait IndexProvider: Send + Sync {
    async fn build_index(
        &self,
        documents: &[SourceDocument],
    ) -> anyhow::Result<Box<dyn DocumentIndex>>;
}
