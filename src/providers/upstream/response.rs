use serde::Deserialize;
use serde_json::Value;

use crate::providers::openai::{ChatCompletionResponse, CompletionMeta};

pub const DATA_PREFIX: &str = "data:";
pub const DONE_TOKEN: &str = "[DONE]";

#[derive(Debug, Deserialize)]
struct UpstreamChunk {
    #[serde(default)]
    choices: Vec<UpstreamChoice>,
}

#[derive(Debug, Default, Deserialize)]
struct UpstreamChoice {
    #[serde(default)]
    delta: UpstreamDelta,
}

#[derive(Debug, Default, Deserialize)]
struct UpstreamDelta {
    #[serde(default)]
    content: Option<Value>,
}

/// One recognised `data:` line of the upstream event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamEvent {
    /// The upstream's own `[DONE]` sentinel.
    Done,
    /// `choices[0].delta.content` was a string (possibly empty).
    Delta(String),
    /// Valid JSON without string content.
    Empty,
}

impl UpstreamEvent {
    pub fn into_delta(self) -> Option<String> {
        match self {
            UpstreamEvent::Delta(s) => Some(s),
            UpstreamEvent::Done | UpstreamEvent::Empty => None,
        }
    }
}

/// Returns `None` for non-`data:` lines and for payloads that are not valid JSON.
pub fn parse_event_line(line: &str) -> Option<UpstreamEvent> {
    let payload = line.strip_prefix(DATA_PREFIX)?.trim();
    if payload == DONE_TOKEN {
        return Some(UpstreamEvent::Done);
    }

    let chunk = match serde_json::from_str::<UpstreamChunk>(payload) {
        Ok(chunk) => chunk,
        Err(e) => {
            tracing::debug!("skipping malformed upstream event: {}", e);
            return None;
        }
    };

    let content = chunk
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta.content)
        .and_then(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        });
    Some(content.map_or(UpstreamEvent::Empty, UpstreamEvent::Delta))
}

/// Non-streaming path: every delta of a fully received body, joined in line order.
pub fn aggregate_event_body(body: &str, meta: &CompletionMeta) -> ChatCompletionResponse {
    let content: String = body
        .split('\n')
        .filter_map(parse_event_line)
        .filter_map(UpstreamEvent::into_delta)
        .collect();
    ChatCompletionResponse::assistant(meta, content)
}
