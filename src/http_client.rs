use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::UpstreamConfig;

fn has_proxy_env() -> bool {
    [
        "HTTPS_PROXY",
        "https_proxy",
        "HTTP_PROXY",
        "http_proxy",
        "ALL_PROXY",
        "all_proxy",
    ]
    .iter()
    .any(|k| std::env::var(k).is_ok_and(|v| !v.trim().is_empty()))
}

fn should_bypass_proxy_impl(url: &str, proxy_env_present: bool, no_proxy_hosts: &[String]) -> bool {
    if !proxy_env_present || no_proxy_hosts.is_empty() {
        return false;
    }

    let Ok(u) = reqwest::Url::parse(url) else {
        return false;
    };
    let Some(host) = u.host_str() else {
        return false;
    };

    no_proxy_hosts.iter().any(|h| {
        let h = h.trim().trim_start_matches('.');
        !h.is_empty() && (host == h || host.ends_with(&format!(".{}", h)))
    })
}

pub fn maybe_disable_proxy(builder: ClientBuilder, url: &str, no_proxy_hosts: &[String]) -> ClientBuilder {
    if should_bypass_proxy_impl(url, has_proxy_env(), no_proxy_hosts) {
        builder.no_proxy()
    } else {
        builder
    }
}

/// Shared client for all upstream calls; built once at startup.
pub fn client_for_upstream(cfg: &UpstreamConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = cfg.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    maybe_disable_proxy(builder, &cfg.url, &cfg.no_proxy_hosts).build()
}
