use axum::{
    extract::State,
    http::HeaderMap,
    response::Json,
};
use chrono::Utc;
use std::sync::Arc;

use super::auth::ensure_client;
use crate::error::GatewayError;
use crate::providers::openai::{Model, ModelListResponse};
use crate::server::AppState;

pub async fn list_models(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ModelListResponse>, GatewayError> {
    ensure_client(&headers, &app_state)?;

    let created = Utc::now().timestamp().max(0) as u64;
    let data = app_state
        .config
        .upstream
        .models
        .iter()
        .map(|id| Model {
            id: id.clone(),
            object: "model".to_string(),
            created,
            owned_by: "upstream".to_string(),
        })
        .collect();

    Ok(Json(ModelListResponse {
        object: "list".to_string(),
        data,
    }))
}
