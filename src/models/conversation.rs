use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Conversation state for the document Q&A flow. The caller owns this and
/// carries it between turns; there is no server-side session store. The
/// system slot is rewritten with fresh retrieval context on every turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(default)]
    pub system: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}
