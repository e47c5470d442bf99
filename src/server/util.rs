use axum::http::HeaderMap;

// HTTP helpers
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
}

// 日志中只出现脱敏后的 key
pub fn mask_key(key: &str) -> String {
    if key.len() <= 8 || !key.is_char_boundary(4) || !key.is_char_boundary(key.len() - 4) {
        return "****".to_string();
    }
    let (start, end) = (&key[..4], &key[key.len() - 4..]);
    format!("{}****{}", start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header::AUTHORIZATION};

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer sk-abc"));
        assert_eq!(bearer_token(&headers).as_deref(), Some("sk-abc"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic Zm9v"));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn masks_keys() {
        assert_eq!(mask_key("short"), "****");
        assert_eq!(mask_key("sk-1234567890"), "sk-1****7890");
    }
}
