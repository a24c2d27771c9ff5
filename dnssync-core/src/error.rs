//! Core error type.

use thiserror::Error;

pub use dnssync_provider::CloudError;

/// Errors raised while reconciling a zone.
#[derive(Error, Debug, Clone)]
pub enum SyncError {
    /// A zone that should carry an apex SOA record set doesn't.
    #[error("Zone '{zone}' has no SOA record set")]
    MissingSoa { zone: String },

    /// The apex SOA record text could not be parsed in any known style.
    #[error("Cannot parse SOA record '{text}': {reason}")]
    InvalidSoa { text: String, reason: String },

    /// Cloud API error (converted from the provider layer).
    #[error("{0}")]
    Cloud(#[from] CloudError),
}

impl SyncError {
    /// Whether this is expected behavior (user input, resource absent)
    /// rather than an infrastructure fault, used for log leveling.
    ///
    /// Update this method when adding variants.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::MissingSoa { .. } | Self::InvalidSoa { .. } => true,
            Self::Cloud(e) => e.is_expected(),
        }
    }
}

/// Result alias for reconciliation operations.
pub type SyncResult<T> = std::result::Result<T, SyncError>;
