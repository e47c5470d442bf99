use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::server::AppState;

mod auth;
mod chat;
mod health;
mod models;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/v1/chat/completions", post(chat::chat_completions))
        .route("/v1/models", get(models::list_models))
        .route("/health", get(health::health))
}

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use crate::server::create_app;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_is_public() {
        let mut settings = settings_for("http://127.0.0.1:9/api/chat".into());
        settings.auth.api_key = Some("sk-secret".into());
        let app = create_app(settings).unwrap();

        let resp = app.oneshot(get("/health", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn models_lists_configured_ids() {
        let app = create_app(settings_for("http://127.0.0.1:9/api/chat".into())).unwrap();

        let resp = app.oneshot(get("/v1/models", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let v = body_json(resp).await;
        assert_eq!(v["object"], "list");
        let ids: Vec<&str> = v["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["L1T3-Ωᴹ²", "other"]);
        assert_eq!(v["data"][0]["object"], "model");
    }

    #[tokio::test]
    async fn models_requires_key_when_configured() {
        let mut settings = settings_for("http://127.0.0.1:9/api/chat".into());
        settings.auth.api_key = Some("sk-secret".into());
        let app = create_app(settings).unwrap();

        let resp = app.clone().oneshot(get("/v1/models", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = app
            .clone()
            .oneshot(get("/v1/models", Some("sk-wrong")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = app
            .oneshot(get("/v1/models", Some("sk-secret")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn cors_preflight_is_answered() {
        let app = create_app(settings_for("http://127.0.0.1:9/api/chat".into())).unwrap();
        let req = axum::http::Request::builder()
            .method("OPTIONS")
            .uri("/v1/chat/completions")
            .header("Origin", "https://app.example.com")
            .header("Access-Control-Request-Method", "POST")
            .body(axum::body::Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
