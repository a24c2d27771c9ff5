//! Cloud profile configuration.
//!
//! Profiles live in a `clouds.json` file mapping a profile name (the value
//! given to `--from-cloud`/`--to-cloud`) to identity-service coordinates
//! and credentials:
//!
//! ```json
//! {
//!   "clouds": {
//!     "cloud1": {
//!       "auth_url": "https://iam.eu-de.example.com/v3",
//!       "region": "eu-de",
//!       "auth": {
//!         "type": "password",
//!         "username": "dns-sync",
//!         "password": "...",
//!         "project_name": "dns",
//!         "user_domain": "Default",
//!         "project_domain": "Default"
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! The file is taken from an explicit path, `$DNSSYNC_CLOUDS`,
//! `./clouds.json`, or `~/.config/dnssync/clouds.json`, in that order.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable overriding the clouds file location.
pub const CLOUDS_FILE_ENV: &str = "DNSSYNC_CLOUDS";
/// File name probed in the working directory and the config directory.
const CLOUDS_FILE_NAME: &str = "clouds.json";

/// Error raised while locating, loading or validating cloud profiles.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ConfigError {
    /// No clouds file was found at any probed location.
    FileNotFound {
        /// Locations that were probed.
        searched: Vec<String>,
    },
    /// The clouds file could not be read.
    Io {
        /// Path that failed.
        path: String,
        /// OS error detail.
        detail: String,
    },
    /// The clouds file is not valid JSON or has the wrong shape.
    Parse {
        /// Path that failed.
        path: String,
        /// Parser detail.
        detail: String,
    },
    /// The requested profile name is not present in the file.
    UnknownCloud {
        /// Requested profile name.
        cloud: String,
        /// Names that are present, for the diagnostic.
        available: Vec<String>,
    },
    /// A profile is present but unusable.
    InvalidProfile {
        /// Profile name.
        cloud: String,
        /// What's wrong with it.
        reason: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileNotFound { searched } => {
                write!(f, "no clouds file found (searched: {})", searched.join(", "))
            }
            Self::Io { path, detail } => write!(f, "cannot read '{path}': {detail}"),
            Self::Parse { path, detail } => write!(f, "cannot parse '{path}': {detail}"),
            Self::UnknownCloud { cloud, available } => {
                write!(
                    f,
                    "cloud '{cloud}' is not configured (available: {})",
                    available.join(", ")
                )
            }
            Self::InvalidProfile { cloud, reason } => {
                write!(f, "cloud '{cloud}' is misconfigured: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// How to authenticate against the identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthMethod {
    /// Keystone v3 password authentication, project-scoped.
    Password {
        /// User name.
        username: String,
        /// Password.
        password: String,
        /// Project (tenant) to scope the token to.
        project_name: String,
        /// Domain the user belongs to.
        #[serde(default = "default_domain")]
        user_domain: String,
        /// Domain the project belongs to.
        #[serde(default = "default_domain")]
        project_domain: String,
    },
    /// A pre-issued token. Requires `dns_endpoint` on the profile since no
    /// catalog lookup is performed.
    Token {
        /// Subject token.
        token: String,
    },
}

fn default_domain() -> String {
    "Default".to_string()
}

/// A single named cloud profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudProfile {
    /// Keystone v3 endpoint, e.g. `https://iam.example.com/v3`.
    pub auth_url: String,
    /// Region filter for catalog endpoint selection.
    #[serde(default)]
    pub region: Option<String>,
    /// Explicit DNS service endpoint, bypassing catalog discovery.
    #[serde(default)]
    pub dns_endpoint: Option<String>,
    /// Credentials.
    pub auth: AuthMethod,
}

/// The full clouds file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudProfiles {
    /// Profiles by name.
    pub clouds: HashMap<String, CloudProfile>,
}

impl CloudProfiles {
    /// Locate the clouds file: explicit path, `$DNSSYNC_CLOUDS`,
    /// `./clouds.json`, then `~/.config/dnssync/clouds.json`.
    pub fn locate(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let mut searched = Vec::new();
        if let Ok(from_env) = std::env::var(CLOUDS_FILE_ENV) {
            return Ok(PathBuf::from(from_env));
        }
        searched.push(format!("${CLOUDS_FILE_ENV}"));

        let cwd_candidate = PathBuf::from(CLOUDS_FILE_NAME);
        if cwd_candidate.is_file() {
            return Ok(cwd_candidate);
        }
        searched.push(format!("./{CLOUDS_FILE_NAME}"));

        if let Some(config_dir) = dirs::config_dir() {
            let candidate = config_dir.join("dnssync").join(CLOUDS_FILE_NAME);
            if candidate.is_file() {
                return Ok(candidate);
            }
            searched.push(candidate.display().to_string());
        }

        Err(ConfigError::FileNotFound { searched })
    }

    /// Load and validate a clouds file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        let profiles = Self::parse(&text).map_err(|detail| ConfigError::Parse {
            path: path.display().to_string(),
            detail,
        })?;
        for (name, profile) in &profiles.clouds {
            profile.validate(name)?;
        }
        Ok(profiles)
    }

    fn parse(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| e.to_string())
    }

    /// Resolve a profile by name.
    pub fn resolve(&self, cloud: &str) -> Result<&CloudProfile, ConfigError> {
        self.clouds.get(cloud).ok_or_else(|| {
            let mut available: Vec<String> = self.clouds.keys().cloned().collect();
            available.sort();
            ConfigError::UnknownCloud {
                cloud: cloud.to_string(),
                available,
            }
        })
    }
}

impl CloudProfile {
    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidProfile {
            cloud: name.to_string(),
            reason: reason.to_string(),
        };

        if self.auth_url.trim().is_empty() {
            return Err(invalid("auth_url must not be empty"));
        }
        match &self.auth {
            AuthMethod::Password {
                username,
                password,
                project_name,
                ..
            } => {
                if username.trim().is_empty() {
                    return Err(invalid("auth.username must not be empty"));
                }
                if password.is_empty() {
                    return Err(invalid("auth.password must not be empty"));
                }
                if project_name.trim().is_empty() {
                    return Err(invalid("auth.project_name must not be empty"));
                }
            }
            AuthMethod::Token { token } => {
                if token.trim().is_empty() {
                    return Err(invalid("auth.token must not be empty"));
                }
                if self.dns_endpoint.is_none() {
                    return Err(invalid("token auth requires an explicit dns_endpoint"));
                }
            }
        }
        Ok(())
    }
}
