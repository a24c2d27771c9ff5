//! OpenStack Designate v2 client.
//!
//! Covers stock Designate deployments as well as derivatives (Open Telekom
//! Cloud and other Huawei-based offerings) that speak the same API with
//! vendor error codes on top.

mod auth;
mod client;
mod error;
mod http;
mod types;

use reqwest::Client;

use crate::config::{AuthMethod, CloudProfile};
use crate::error::{CloudError, Result};

/// Request timeout for every API call.
const REQUEST_TIMEOUT_SECS: u64 = 30;
/// Page size used for zone and record-set listings.
const PAGE_LIMIT: u32 = 100;

/// A connected Designate deployment.
pub struct DesignateCloud {
    /// Profile name, used in logs and errors.
    cloud_name: String,
    /// DNS service endpoint, no trailing slash.
    endpoint: String,
    /// Keystone token sent as `X-Auth-Token`.
    token: String,
    client: Client,
}

impl DesignateCloud {
    /// Authenticate against the profile and return a connected handle.
    pub async fn connect(name: &str, profile: &CloudProfile) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| CloudError::NetworkError {
                cloud: name.to_string(),
                detail: format!("failed to build HTTP client: {e}"),
            })?;

        let (token, endpoint) = match &profile.auth {
            AuthMethod::Password { .. } => {
                auth::authenticate(&client, name, profile).await?
            }
            AuthMethod::Token { token } => {
                // Config validation guarantees dns_endpoint is set for token auth.
                let endpoint = profile.dns_endpoint.clone().ok_or_else(|| {
                    CloudError::EndpointNotFound {
                        cloud: name.to_string(),
                        detail: "token auth requires dns_endpoint".to_string(),
                    }
                })?;
                (token.clone(), endpoint)
            }
        };

        log::info!("[{name}] Connected, DNS endpoint: {endpoint}");

        Ok(Self {
            cloud_name: name.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }
}
