use tracing::debug;

use crate::{
    chunking::split_response,
    domain::{ChatId, MessageRef},
    messaging::port::MessagingPort,
    Result,
};

/// Send `text` to `chat_id` as one message per chunk, in order.
///
/// The bound is clamped to what the messenger accepts. Blank chunks
/// (empty or whitespace only) are skipped; platforms reject them as empty
/// messages. Stops at the first failed send.
pub async fn send_chunked(
    messenger: &dyn MessagingPort,
    chat_id: ChatId,
    text: &str,
    chunk_size: usize,
) -> Result<Vec<MessageRef>> {
    let limit = chunk_size.min(messenger.capabilities().max_message_len);
    let chunks = split_response(text, limit);
    debug!(chat_id = chat_id.0, chunks = chunks.len(), "delivering response");

    let mut sent = Vec::with_capacity(chunks.len());
    for chunk in chunks.iter().filter(|c| !c.trim().is_empty()) {
        sent.push(messenger.send_text(chat_id, chunk).await?);
    }
    Ok(sent)
}
