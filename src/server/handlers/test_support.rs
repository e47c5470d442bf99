use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header::CONTENT_TYPE},
    routing::post,
};
use serde_json::Value;

use crate::config::Settings;

pub type Captured = Arc<Mutex<Option<(HeaderMap, Value)>>>;

/// Local stand-in for the upstream chat endpoint; records the last request it saw.
pub async fn spawn_upstream(
    status: StatusCode,
    content_type: &'static str,
    body: &'static str,
) -> (String, Captured) {
    let seen: Captured = Arc::new(Mutex::new(None));
    let seen_in = seen.clone();
    let app = Router::new().route(
        "/api/chat",
        post(move |headers: HeaderMap, Json(v): Json<Value>| {
            let seen = seen_in.clone();
            async move {
                *seen.lock().unwrap() = Some((headers, v));
                (status, [(CONTENT_TYPE, content_type)], body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/api/chat", addr), seen)
}

pub fn settings_for(url: String) -> Settings {
    let mut settings = Settings::default();
    settings.upstream.url = url;
    settings.upstream.origin = Some("https://chat.example.com".into());
    settings.upstream.models = vec!["L1T3-Ωᴹ²".into(), "other".into()];
    settings.upstream.no_proxy_hosts = vec!["127.0.0.1".into()];
    settings
}

pub fn post_json(uri: &str, body: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(key) = bearer {
        builder = builder.header("Authorization", format!("Bearer {}", key));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(key) = bearer {
        builder = builder.header("Authorization", format!("Bearer {}", key));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(resp: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}
