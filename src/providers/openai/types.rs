use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Client-facing chat request. Only the fields the proxy acts on are typed;
/// `messages` stays opaque and any other OpenAI field is accepted and dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub messages: Value,
    #[serde(default)]
    pub stream: Option<bool>,
}

impl ChatRequest {
    pub fn is_stream(&self) -> bool {
        self.stream.unwrap_or(false)
    }
}

/// Identity shared by every object produced for one client request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionMeta {
    pub id: String,
    pub model: String,
    pub created: i64,
}

impl CompletionMeta {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            id: format!("chatcmpl-{}", Uuid::new_v4()),
            model: model.into(),
            created: Utc::now().timestamp(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkChoice {
    pub index: u32,
    pub delta: ChunkDelta,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionChunk {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChunkChoice>,
}

impl ChatCompletionChunk {
    fn with_choice(meta: &CompletionMeta, delta: ChunkDelta, finish_reason: Option<&str>) -> Self {
        Self {
            id: meta.id.clone(),
            object: "chat.completion.chunk".to_string(),
            created: meta.created,
            model: meta.model.clone(),
            choices: vec![ChunkChoice {
                index: 0,
                delta,
                finish_reason: finish_reason.map(str::to_string),
            }],
        }
    }

    pub fn content(meta: &CompletionMeta, content: impl Into<String>) -> Self {
        Self::with_choice(
            meta,
            ChunkDelta {
                content: Some(content.into()),
            },
            None,
        )
    }

    pub fn stop(meta: &CompletionMeta) -> Self {
        Self::with_choice(meta, ChunkDelta::default(), Some("stop"))
    }

    pub fn delta_content(&self) -> Option<&str> {
        self.choices.first()?.delta.content.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub index: u32,
    pub message: Message,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Usage,
}

impl ChatCompletionResponse {
    // No token accounting: usage is always zero.
    pub fn assistant(meta: &CompletionMeta, content: String) -> Self {
        Self {
            id: meta.id.clone(),
            object: "chat.completion".to_string(),
            created: meta.created,
            model: meta.model.clone(),
            choices: vec![Choice {
                index: 0,
                message: Message {
                    role: "assistant".to_string(),
                    content,
                },
                finish_reason: Some("stop".to_string()),
            }],
            usage: Usage::default(),
        }
    }
}

// 模型列表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelListResponse {
    pub object: String,
    pub data: Vec<Model>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub owned_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta() -> CompletionMeta {
        CompletionMeta {
            id: "chatcmpl-1".into(),
            model: "m".into(),
            created: 42,
        }
    }

    #[test]
    fn request_id_has_openai_prefix() {
        let m = CompletionMeta::new("m");
        assert!(m.id.starts_with("chatcmpl-"));
        assert_ne!(m.id, CompletionMeta::new("m").id);
    }

    #[test]
    fn content_chunk_serializes_null_finish_reason() {
        let v = serde_json::to_value(ChatCompletionChunk::content(&meta(), "Hi")).unwrap();
        assert_eq!(
            v,
            json!({
                "id": "chatcmpl-1",
                "object": "chat.completion.chunk",
                "created": 42,
                "model": "m",
                "choices": [{"index": 0, "delta": {"content": "Hi"}, "finish_reason": null}]
            })
        );
    }

    #[test]
    fn stop_chunk_has_empty_delta() {
        let v = serde_json::to_value(ChatCompletionChunk::stop(&meta())).unwrap();
        assert_eq!(v["choices"][0]["delta"], json!({}));
        assert_eq!(v["choices"][0]["finish_reason"], "stop");
    }

    #[test]
    fn completion_reports_zero_usage() {
        let v = serde_json::to_value(ChatCompletionResponse::assistant(&meta(), "ok".into()))
            .unwrap();
        assert_eq!(v["object"], "chat.completion");
        assert_eq!(v["choices"][0]["message"], json!({"role": "assistant", "content": "ok"}));
        assert_eq!(v["choices"][0]["finish_reason"], "stop");
        assert_eq!(
            v["usage"],
            json!({"prompt_tokens": 0, "completion_tokens": 0, "total_tokens": 0})
        );
    }

    #[test]
    fn request_accepts_extra_fields_and_missing_messages() {
        let req: ChatRequest =
            serde_json::from_value(json!({"temperature": 0.2, "stream": true})).unwrap();
        assert!(req.is_stream());
        assert!(req.model.is_none());
        assert!(req.messages.is_null());
    }
}
