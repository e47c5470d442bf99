use axum::response::sse::Event;
use bytes::Bytes;

use crate::providers::openai::{ChatCompletionChunk, CompletionMeta};
use crate::providers::upstream::{DONE_TOKEN, UpstreamEvent, parse_event_line};

/// One unit written to the client's event stream.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayFrame {
    Chunk(ChatCompletionChunk),
    Done,
}

impl RelayFrame {
    /// Payload of the `data:` field.
    pub fn data(&self) -> String {
        match self {
            RelayFrame::Chunk(chunk) => serde_json::to_string(chunk).unwrap_or_default(),
            RelayFrame::Done => DONE_TOKEN.to_string(),
        }
    }

    pub fn to_event(&self) -> Event {
        Event::default().data(self.data())
    }

    /// Raw wire form, `data: <payload>\n\n`.
    pub fn to_sse_bytes(&self) -> Bytes {
        Bytes::from(format!("data: {}\n\n", self.data()))
    }
}

/// Re-emits upstream deltas as OpenAI chunks for a single response.
#[derive(Debug)]
pub struct StreamRelay {
    meta: CompletionMeta,
}

impl StreamRelay {
    pub fn new(meta: CompletionMeta) -> Self {
        Self { meta }
    }

    pub fn meta(&self) -> &CompletionMeta {
        &self.meta
    }

    /// Zero or one chunk per reassembled line. The upstream `[DONE]` is swallowed;
    /// the relay writes its own terminator in [`StreamRelay::finalize`].
    pub fn relay(&self, line: &str) -> Option<ChatCompletionChunk> {
        match parse_event_line(line)? {
            UpstreamEvent::Delta(content) => Some(ChatCompletionChunk::content(&self.meta, content)),
            UpstreamEvent::Done | UpstreamEvent::Empty => None,
        }
    }

    /// Stop chunk followed by the terminator. Consumes the relay so it runs once.
    pub fn finalize(self) -> [RelayFrame; 2] {
        [
            RelayFrame::Chunk(ChatCompletionChunk::stop(&self.meta)),
            RelayFrame::Done,
        ]
    }
}
