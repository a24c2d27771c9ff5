//! Designate HTTP request methods.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::error::{CloudError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{CloudErrorMapper, ErrorContext, RawApiError};

use super::DesignateCloud;
use super::types::ErrorResponse;

impl DesignateCloud {
    /// Map a non-2xx response to a structured error.
    fn handle_response_error(
        &self,
        status: u16,
        response_text: &str,
        ctx: ErrorContext,
    ) -> Result<()> {
        if (200..300).contains(&status) {
            return Ok(());
        }

        if let Ok(error) = serde_json::from_str::<ErrorResponse>(response_text) {
            if error.best_code().is_some() || error.message.is_some() {
                let raw = match error.best_code() {
                    Some(code) => {
                        RawApiError::with_code(code, error.message.unwrap_or_default())
                    }
                    None => RawApiError::new(error.message.unwrap_or_default()),
                };
                return Err(self.map_error(raw, ctx));
            }
        }

        // No structured body; fall back to the HTTP status.
        Err(self.map_http_status(status, response_text, ctx))
    }

    async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        ctx: ErrorContext,
    ) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{path}", self.endpoint);
        let method_name = method.as_str().to_string();

        let mut request = self
            .client
            .request(method, &url)
            .header("X-Auth-Token", &self.token);
        if let Some(payload) = body {
            log::debug!("[{}] Request Body: {payload}", self.cloud_name);
            request = request
                .header("Content-Type", "application/json")
                .body(payload);
        }

        let (status, response_text) =
            HttpUtils::execute_request(request, &self.cloud_name, &method_name, &url).await?;

        self.handle_response_error(status, &response_text, ctx)?;
        HttpUtils::parse_json(&response_text, &self.cloud_name)
    }

    fn encode_body<B: Serialize>(&self, body: &B) -> Result<String> {
        serde_json::to_string(body).map_err(|e| CloudError::SerializationError {
            cloud: self.cloud_name.clone(),
            detail: e.to_string(),
        })
    }

    pub(super) async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        self.request(Method::GET, path, None, ctx).await
    }

    pub(super) async fn post<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let payload = self.encode_body(body)?;
        self.request(Method::POST, path, Some(payload), ctx).await
    }

    pub(super) async fn put<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let payload = self.encode_body(body)?;
        self.request(Method::PUT, path, Some(payload), ctx).await
    }

    pub(super) async fn patch<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let payload = self.encode_body(body)?;
        self.request(Method::PATCH, path, Some(payload), ctx).await
    }

    /// DELETE returns no body worth parsing; 2xx means done.
    pub(super) async fn delete(&self, path: &str, ctx: ErrorContext) -> Result<()> {
        let url = format!("{}{path}", self.endpoint);
        let request = self
            .client
            .delete(&url)
            .header("X-Auth-Token", &self.token);

        let (status, response_text) =
            HttpUtils::execute_request(request, &self.cloud_name, "DELETE", &url).await?;

        self.handle_response_error(status, &response_text, ctx)
    }
}
