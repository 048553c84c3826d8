use crate::app::ports::{HttpClientPort, HttpGetResult};
use crate::common::error::Result;
use crate::config::ScraperConfig;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// Blocking reqwest adapter for `HttpClientPort`
pub struct ReqwestHttp {
    client: reqwest::blocking::Client,
}

impl ReqwestHttp {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl HttpClientPort for ReqwestHttp {
    fn get(&self, url: &str) -> Result<HttpGetResult> {
        tracing::info!("HTTP GET request to: {}", url);
        let resp = self
            .client
            .get(url)
            .header("accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("accept-language", "en-US,en;q=0.9")
            .send()?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let body = resp.text()?;
        tracing::info!("HTTP response: status={}, size={} bytes", status, body.len());
        Ok(HttpGetResult { status, body, content_type })
    }
}
