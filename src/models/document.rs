use serde::{Deserialize, Serialize};

/// A passage returned by the retrieval index, with the metadata the answer
/// prompt cites (source file name and page number where available).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocChunk {
    pub content: String,
    pub source: String,
    #[serde(default)]
    pub page: Option<u32>,
}

/// A raw document handed to the index-building collaborator.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}
