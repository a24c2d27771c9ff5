//! Keystone v3 authentication and DNS endpoint discovery.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::{AuthMethod, CloudProfile};
use crate::error::{CloudError, Result};
use crate::http_client::HttpUtils;

/// Scoped token response body (the parts we read).
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: TokenBody,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    #[serde(default)]
    catalog: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(rename = "type")]
    service_type: String,
    #[serde(default)]
    endpoints: Vec<CatalogEndpoint>,
}

#[derive(Debug, Deserialize)]
struct CatalogEndpoint {
    interface: String,
    #[serde(default)]
    region: Option<String>,
    url: String,
}

/// Keystone v3 password-auth request body.
#[derive(Debug, Serialize)]
struct AuthRequest {
    auth: serde_json::Value,
}

fn password_auth_body(
    username: &str,
    password: &str,
    user_domain: &str,
    project_name: &str,
    project_domain: &str,
) -> AuthRequest {
    AuthRequest {
        auth: json!({
            "identity": {
                "methods": ["password"],
                "password": {
                    "user": {
                        "name": username,
                        "domain": { "name": user_domain },
                        "password": password
                    }
                }
            },
            "scope": {
                "project": {
                    "name": project_name,
                    "domain": { "name": project_domain }
                }
            }
        }),
    }
}

/// Authenticate with a password profile. Returns `(token, dns_endpoint)`.
///
/// The endpoint comes from the profile override when set, otherwise from
/// the service catalog returned alongside the token.
pub(super) async fn authenticate(
    client: &Client,
    cloud_name: &str,
    profile: &CloudProfile,
) -> Result<(String, String)> {
    let AuthMethod::Password {
        username,
        password,
        project_name,
        user_domain,
        project_domain,
    } = &profile.auth
    else {
        return Err(CloudError::AuthFailed {
            cloud: cloud_name.to_string(),
            detail: "authenticate() called without password credentials".to_string(),
        });
    };

    let url = format!("{}/auth/tokens", profile.auth_url.trim_end_matches('/'));
    let body = password_auth_body(username, password, user_domain, project_name, project_domain);

    log::debug!("[{cloud_name}] Requesting token for user '{username}' on project '{project_name}'");

    let request = client.post(&url).json(&body);
    let response = request.send().await.map_err(|e| {
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

    let status = response.status().as_u16();
    if status == 401 {
        let body = response.text().await.unwrap_or_default();
        return Err(CloudError::InvalidCredentials {
            cloud: cloud_name.to_string(),
            raw_message: Some(body),
        });
    }

    // Keystone hands the token back in a header, not the body.
    let token = response
        .headers()
        .get("x-subject-token")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let text = response.text().await.map_err(|e| CloudError::NetworkError {
        cloud: cloud_name.to_string(),
        detail: format!("Failed to read auth response: {e}"),
    })?;

    if !(200..300).contains(&status) {
        return Err(CloudError::AuthFailed {
            cloud: cloud_name.to_string(),
            detail: format!("HTTP {status}: {text}"),
        });
    }

    let token = token.ok_or_else(|| CloudError::AuthFailed {
        cloud: cloud_name.to_string(),
        detail: "auth response missing X-Subject-Token header".to_string(),
    })?;

    let endpoint = if let Some(explicit) = &profile.dns_endpoint {
        explicit.clone()
    } else {
        let parsed: TokenResponse = HttpUtils::parse_json(&text, cloud_name)?;
        find_dns_endpoint(cloud_name, &parsed.token.catalog, profile.region.as_deref())?
    };

    Ok((token, endpoint))
}

/// Pick the public DNS endpoint out of the service catalog, honoring the
/// profile's region filter when one is set.
fn find_dns_endpoint(
    cloud_name: &str,
    catalog: &[CatalogEntry],
    region: Option<&str>,
) -> Result<String> {
    let candidates = catalog
        .iter()
        .filter(|e| e.service_type == "dns")
        .flat_map(|e| e.endpoints.iter())
        .filter(|ep| ep.interface == "public");

    for ep in candidates {
        match region {
            Some(want) => {
                if ep.region.as_deref() == Some(want) {
                    return Ok(ep.url.clone());
                }
            }
            None => return Ok(ep.url.clone()),
        }
    }

    Err(CloudError::EndpointNotFound {
        cloud: cloud_name.to_string(),
        detail: match region {
            Some(r) => format!("no public 'dns' endpoint in catalog for region '{r}'"),
            None => "no public 'dns' endpoint in catalog".to_string(),
        },
    })
}
