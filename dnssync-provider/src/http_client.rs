//! Generic HTTP request handling shared by cloud clients.
//!
//! Keeps the per-cloud modules down to URL construction and payload types:
//! sending requests, status triage, response logging and JSON parsing all
//! live here. Failed calls are never retried; the caller decides what a
//! failure means for the item being processed.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::CloudError;

/// Maximum response-body length echoed into debug logs.
const LOG_BODY_LIMIT: usize = 2048;

/// Truncate a response body for logging.
fn truncate_for_log(body: &str) -> String {
    if body.len() <= LOG_BODY_LIMIT {
        body.to_string()
    } else {
        let cut = body
            .char_indices()
            .take_while(|(i, _)| *i < LOG_BODY_LIMIT)
            .last()
            .map_or(0, |(i, c)| i + c.len_utf8());
        format!("{}... ({} bytes total)", &body[..cut], body.len())
    }
}

/// HTTP helper function set.
pub struct HttpUtils;

impl HttpUtils {
    /// Execute a request and return `(status_code, response_text)`.
    ///
    /// Network failures, timeouts and HTTP 429 are mapped here; any other
    /// non-2xx status is left to the caller, which has the context to map
    /// the body to a structured error.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        cloud_name: &str,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), CloudError> {
        log::debug!("[{cloud_name}] {method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                CloudError::Timeout {
                    cloud: cloud_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                CloudError::NetworkError {
                    cloud: cloud_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{cloud_name}] Response Status: {status_code}");

        // Extract Retry-After before consuming the body
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{cloud_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(CloudError::RateLimited {
                cloud: cloud_name.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{cloud_name}] Server error (HTTP {status_code})");
            return Err(CloudError::NetworkError {
                cloud: cloud_name.to_string(),
                detail: format!("HTTP {status_code}: {body}"),
            });
        }

        let response_text = response.text().await.map_err(|e| CloudError::NetworkError {
            cloud: cloud_name.to_string(),
            detail: format!("Failed to read response body: {e}"),
        })?;

        log::debug!(
            "[{cloud_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse a JSON response body.
    pub fn parse_json<T>(response_text: &str, cloud_name: &str) -> Result<T, CloudError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{cloud_name}] JSON parse failed: {e}");
            log::error!(
                "[{cloud_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            CloudError::ParseError {
                cloud: cloud_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}
