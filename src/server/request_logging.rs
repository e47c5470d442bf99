use chrono::{DateTime, Utc};

use crate::providers::openai::CompletionMeta;

// 记录聊天请求日志（耗时、上游状态、是否流式）
pub fn log_chat_request(
    meta: &CompletionMeta,
    stream: bool,
    start_time: DateTime<Utc>,
    status_code: u16,
    error_message: Option<&str>,
) {
    let response_time_ms = (Utc::now() - start_time).num_milliseconds();
    match error_message {
        None => tracing::info!(
            id = %meta.id,
            model = %meta.model,
            stream,
            status_code,
            response_time_ms,
            "POST /v1/chat/completions"
        ),
        Some(err) => tracing::warn!(
            id = %meta.id,
            model = %meta.model,
            stream,
            status_code,
            response_time_ms,
            error = err,
            "POST /v1/chat/completions failed"
        ),
    }
}
