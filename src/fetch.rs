use reqwest::{Client, ClientBuilder};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;
use tracing::{debug, warn};
use crate::error::{AppError, Result};

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// A successfully fetched page body.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub status_code: u16,
    pub body: String,
}

/// Build the shared HTTP client used for every outbound call.
pub fn build_client(timeout: Duration) -> Result<Client> {
    let client = ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(5))
        .build()?;
    Ok(client)
}

/// GET the page with a desktop-browser User-Agent.
///
/// Every failure, transport or non-2xx, comes back as `AppError::FetchError`
/// stamped with the time it happened.
pub async fn fetch_page(client: &Client, url: &str) -> Result<RawPage> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

    let response = client
        .get(url)
        .headers(headers)
        .send()
        .await
        .map_err(|e| AppError::fetch(url, None, format!("request error: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        warn!(url, status = status.as_u16(), "page fetch returned non-success status");
        return Err(AppError::fetch(url, Some(status.as_u16()), format!("HTTP {}", status)));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| {
            AppError::fetch(url, Some(status.as_u16()), format!("body read error: {}", e))
        })?;
    let body = String::from_utf8_lossy(&bytes).into_owned();
    debug!(url, bytes = body.len(), "page fetched");

    Ok(RawPage {
        status_code: status.as_u16(),
        body,
    })
}
