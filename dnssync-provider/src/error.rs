use serde::{Deserialize, Serialize};

/// Unified error type for all cloud DNS operations.
///
/// Each variant carries a `cloud` field identifying which cloud profile
/// produced the error, plus variant-specific context. All variants are
/// serializable for structured error reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum CloudError {
    /// A network-level error occurred (DNS resolution failure, connection
    /// refused, unexpected 5xx, etc.). Failed calls are not retried; the
    /// affected item is reported and the run moves on.
    NetworkError {
        /// Cloud profile that produced the error.
        cloud: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Cloud profile that produced the error.
        cloud: String,
        /// Error details.
        detail: String,
    },

    /// Authentication against the identity service failed outright
    /// (malformed response, unreachable endpoint, missing token header).
    AuthFailed {
        /// Cloud profile that produced the error.
        cloud: String,
        /// Error details.
        detail: String,
    },

    /// The provided credentials were rejected by the cloud.
    InvalidCredentials {
        /// Cloud profile that produced the error.
        cloud: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// No usable DNS service endpoint was found in the service catalog.
    EndpointNotFound {
        /// Cloud profile that produced the error.
        cloud: String,
        /// Details (service type, region filter).
        detail: String,
    },

    /// The named zone does not exist in this cloud.
    ZoneNotFound {
        /// Cloud profile that produced the error.
        cloud: String,
        /// Zone name or id that was not found.
        zone: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// A zone with this name already exists.
    ZoneExists {
        /// Cloud profile that produced the error.
        cloud: String,
        /// Conflicting zone name.
        zone: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The specified record set was not found.
    RecordSetNotFound {
        /// Cloud profile that produced the error.
        cloud: String,
        /// Id of the record set that was not found.
        recordset_id: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// A record set with the same name/type already exists.
    RecordSetExists {
        /// Cloud profile that produced the error.
        cloud: String,
        /// Name of the conflicting record set.
        record_name: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// A request parameter is invalid (bad TTL, malformed record value, etc.).
    InvalidParameter {
        /// Cloud profile that produced the error.
        cloud: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The account's zone or record-set quota has been exceeded.
    QuotaExceeded {
        /// Cloud profile that produced the error.
        cloud: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429 or equivalent).
    RateLimited {
        /// Cloud profile that produced the error.
        cloud: String,
        /// Suggested wait time in seconds, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The authenticated user lacks permission for the requested operation.
    PermissionDenied {
        /// Cloud profile that produced the error.
        cloud: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the cloud's API response.
    ParseError {
        /// Cloud profile that produced the error.
        cloud: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Cloud profile that produced the error.
        cloud: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized error from the cloud API.
    Unknown {
        /// Cloud profile that produced the error.
        cloud: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl CloudError {
    /// Whether this is expected behavior (user input, resource absent)
    /// rather than an infrastructure fault, used for log leveling.
    ///
    /// `true` should log at `warn`, `false` at `error`.
    /// Keep this in sync when adding variants.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::ZoneNotFound { .. }
                | Self::ZoneExists { .. }
                | Self::RecordSetNotFound { .. }
                | Self::RecordSetExists { .. }
                | Self::InvalidParameter { .. }
                | Self::QuotaExceeded { .. }
                | Self::PermissionDenied { .. }
        )
    }
}

impl std::fmt::Display for CloudError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { cloud, detail } => {
                write!(f, "[{cloud}] Network error: {detail}")
            }
            Self::Timeout { cloud, detail } => {
                write!(f, "[{cloud}] Request timeout: {detail}")
            }
            Self::AuthFailed { cloud, detail } => {
                write!(f, "[{cloud}] Authentication failed: {detail}")
            }
            Self::InvalidCredentials { cloud, raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{cloud}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{cloud}] Invalid credentials")
                }
            }
            Self::EndpointNotFound { cloud, detail } => {
                write!(f, "[{cloud}] DNS endpoint not found: {detail}")
            }
            Self::ZoneNotFound {
                cloud,
                zone,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{cloud}] Zone '{zone}' not found: {msg}")
                } else {
                    write!(f, "[{cloud}] Zone '{zone}' not found")
                }
            }
            Self::ZoneExists { cloud, zone, .. } => {
                write!(f, "[{cloud}] Zone '{zone}' already exists")
            }
            Self::RecordSetNotFound {
                cloud,
                recordset_id,
                ..
            } => {
                write!(f, "[{cloud}] Record set '{recordset_id}' not found")
            }
            Self::RecordSetExists {
                cloud, record_name, ..
            } => {
                write!(f, "[{cloud}] Record set '{record_name}' already exists")
            }
            Self::InvalidParameter {
                cloud,
                param,
                detail,
            } => {
                write!(f, "[{cloud}] Invalid parameter '{param}': {detail}")
            }
            Self::QuotaExceeded { cloud, .. } => {
                write!(f, "[{cloud}] Quota exceeded")
            }
            Self::RateLimited {
                cloud, retry_after, ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{cloud}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{cloud}] Rate limited")
                }
            }
            Self::PermissionDenied { cloud, raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{cloud}] Permission denied: {msg}")
                } else {
                    write!(f, "[{cloud}] Permission denied")
                }
            }
            Self::ParseError { cloud, detail } => {
                write!(f, "[{cloud}] Parse error: {detail}")
            }
            Self::SerializationError { cloud, detail } => {
                write!(f, "[{cloud}] Serialization error: {detail}")
            }
            Self::Unknown {
                cloud, raw_message, ..
            } => {
                write!(f, "[{cloud}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for CloudError {}

/// Convenience type alias for `Result<T, CloudError>`.
pub type Result<T> = std::result::Result<T, CloudError>;
