//! HTTP transport for upstream JSON calls
//!
//! Providers talk to the network only through [`Transport`], so tests can
//! substitute an in-process fake and assert what would have been sent.

use postcard_core::{PostcardError, Result};
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 120;
const MAX_RETRIES: usize = 3;
const RETRY_BASE_DELAY_MS: u64 = 500;
/// Generated 4K images arrive inline as base64
const MAX_RESPONSE_BYTES: u64 = 64 * 1024 * 1024;

/// POST a JSON body and return the parsed JSON response.
///
/// Any transport or service failure is reported as `PostcardError::Upstream`
/// with the service's own error text left intact.
pub trait Transport: Send + Sync {
    fn post_json(&self, url: &str, headers: &[(&str, &str)], body: &Value) -> Result<Value>;
}

/// `ureq`-backed transport with retry and exponential backoff
#[derive(Debug, Clone)]
pub struct HttpTransport {
    timeout_secs: u64,
    max_retries: usize,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self {
            timeout_secs: REQUEST_TIMEOUT_SECS,
            max_retries: MAX_RETRIES,
        }
    }
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries.max(1);
        self
    }

    fn build_agent(&self) -> ureq::Agent {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(self.timeout_secs)))
            .http_status_as_error(false)
            .build();
        config.into()
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &str, headers: &[(&str, &str)], body: &Value) -> Result<Value> {
        let agent = self.build_agent();

        for attempt in 0..self.max_retries {
            let mut request = agent.post(url).header("Content-Type", "application/json");
            for (name, value) in headers {
                request = request.header(*name, *value);
            }

            match request.send_json(body) {
                Ok(mut response) => {
                    let status = response.status().as_u16();
                    let bytes = response
                        .body_mut()
                        .with_config()
                        .limit(MAX_RESPONSE_BYTES)
                        .read_to_vec()
                        .map_err(|e| {
                            PostcardError::Upstream(format!("Failed to read response: {}", e))
                        })?;

                    if (200..300).contains(&status) {
                        return serde_json::from_slice(&bytes).map_err(|e| {
                            PostcardError::Upstream(format!("Failed to parse response: {}", e))
                        });
                    }

                    if attempt + 1 < self.max_retries && is_retryable_status(status) {
                        log::info!("Upstream returned {}, retrying", status);
                        sleep_backoff(attempt);
                        continue;
                    }
                    return Err(PostcardError::Upstream(status_error_text(
                        status,
                        &String::from_utf8_lossy(&bytes),
                    )));
                }
                Err(e) => {
                    if attempt + 1 < self.max_retries && is_retryable_error(&e) {
                        log::info!("Upstream request failed ({}), retrying", e);
                        sleep_backoff(attempt);
                        continue;
                    }
                    return Err(PostcardError::Upstream(format!("Request failed: {}", e)));
                }
            }
        }

        Err(PostcardError::Upstream(
            "Request failed after retries".to_string(),
        ))
    }
}

/// Error text for a non-success status: the status plus the raw body
pub fn status_error_text(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, body)
    }
}

fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

fn is_retryable_error(e: &ureq::Error) -> bool {
    matches!(
        e,
        ureq::Error::Timeout(_) | ureq::Error::Io(_) | ureq::Error::ConnectionFailed | ureq::Error::HostNotFound
    )
}

fn sleep_backoff(attempt: usize) {
    let delay_ms = RETRY_BASE_DELAY_MS.saturating_mul(1u64 << attempt);
    std::thread::sleep(Duration::from_millis(delay_ms));
}
