use futures::StreamExt;

use crate::errors::AppError;
use crate::models::{ChatMessage, Conversation, DocChunk};
use crate::services::ai::{ChatModel, Message};
use crate::services::index::DocumentIndex;

const SYSTEM_PROMPT: &str = r#"You are a helpful Assistant who answers users' questions based on multiple contexts given to you.

Keep your answer short and to the point.

The evidence is the context of the PDF extract with metadata.
Carefully focus on the metadata, especially 'filename' and 'page', whenever answering.

Make sure to add filename and page number at the end of the sentence you are citing to.

Reply "Not applicable" if the text is irrelevant.

The PDF content is:
"#;

/// Run one question/answer turn against the document.
///
/// The caller owns the conversation and gets the updated copy back along
/// with the full answer text. Retrieval context lives only in the system
/// slot, so each turn replaces the previous turn's extract.
pub async fn run_turn(
    index: &dyn DocumentIndex,
    model: &dyn ChatModel,
    mut conv: Conversation,
    question: &str,
    top_k: usize,
) -> Result<(Conversation, String), AppError> {
    let chunks = index
        .similarity_search(question, top_k)
        .await
        .map_err(|e| AppError::Index(format!("{e:#}")))?;

    tracing::info!(question = %question, chunks = chunks.len(), "running document turn");

    conv.system = format!("{SYSTEM_PROMPT}{}", format_extract(&chunks));
    conv.messages.push(ChatMessage {
        role: "user".to_string(),
        content: question.to_string(),
    });

    let messages: Vec<Message> = conv
        .messages
        .iter()
        .map(|m| Message {
            role: m.role.clone(),
            content: m.content.clone(),
        })
        .collect();

    let mut stream = model
        .stream_chat(&conv.system, &messages)
        .await
        .map_err(|e| AppError::Chat(format!("{e:#}")))?;

    let mut answer = String::new();
    while let Some(piece) = stream.next().await {
        let piece = piece.map_err(|e| AppError::Chat(format!("{e:#}")))?;
        answer.push_str(&piece);
    }
    let answer = answer.trim().to_string();

    conv.messages.push(ChatMessage {
        role: "assistant".to_string(),
        content: answer.clone(),
    });

    Ok((conv, answer))
}

fn format_extract(chunks: &[DocChunk]) -> String {
    chunks
        .iter()
        .map(|chunk| match chunk.page {
            Some(page) => format!(
                "{}\n(filename: {}, page: {})",
                chunk.content, chunk.source, page
            ),
            None => format!("{}\n(filename: {})", chunk.content, chunk.source),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
