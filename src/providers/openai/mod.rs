pub mod types;

pub use types::{
    ChatCompletionChunk, ChatCompletionResponse, ChatRequest, Choice, ChunkChoice, ChunkDelta,
    CompletionMeta, Message, Model, ModelListResponse, Usage,
};
