//! Common test utilities for scrape-urls integration tests

#![allow(dead_code)]

use scrape_urls::{OutputFormat, RunConfig};
use std::path::Path;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mount a GET handler returning `status` with a plain-text `body`
pub async fn mount_page(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status).set_body_raw(body, "text/plain; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Mount a GET handler that answers after `delay`
pub async fn mount_slow_page(server: &MockServer, route: &str, delay: Duration, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// A URL on localhost where nothing is listening
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

/// Run config with short timeouts writing into `dir`
pub fn test_config(urls: Vec<String>, dir: &Path, format: OutputFormat) -> RunConfig {
    RunConfig {
        urls,
        output: Some(dir.join(format!("out.{}", format.extension()))),
        format,
        timeout: Duration::from_secs(2),
        user_agent: "scrape-urls-integration/1.0".to_string(),
        ..Default::default()
    }
}

/// Parse a structured output file
pub fn read_json(path: &Path) -> Vec<serde_json::Value> {
    let raw = std::fs::read_to_string(path).expect("output file exists");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("output is valid JSON");
    value.as_array().expect("output is an array").clone()
}
