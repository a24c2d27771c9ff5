use async_trait::async_trait;

use crate::error::{CloudError, Result};
use crate::types::{
    CreateRecordSetRequest, CreateZoneRequest, RecordSet, UpdateRecordSetRequest,
    UpdateZoneRequest, Zone,
};

/// Raw API error, before mapping (internal).
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Error code; either a Designate `type` string or an OTC `DNS.xxxx` code.
    pub code: Option<String>,
    /// Raw error message.
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Context carried into error mapping so mapped errors can name the
/// zone/record they concern (internal).
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Zone name or id (for `ZoneNotFound` and friends).
    pub zone: Option<String>,
    /// Record set name (for `RecordSetExists`).
    pub record_name: Option<String>,
    /// Record set id (for `RecordSetNotFound`).
    pub recordset_id: Option<String>,
}

/// Maps raw API errors to the unified [`CloudError`] taxonomy (internal).
pub(crate) trait CloudErrorMapper {
    /// The cloud profile name, used in every mapped error.
    fn cloud_name(&self) -> &str;

    /// Map a raw API error to a [`CloudError`].
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> CloudError;

    /// Shortcut: parse error.
    fn parse_error(&self, detail: impl ToString) -> CloudError {
        CloudError::ParseError {
            cloud: self.cloud_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Shortcut: unknown error (fallback).
    fn unknown_error(&self, raw: RawApiError) -> CloudError {
        CloudError::Unknown {
            cloud: self.cloud_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// A connected DNS-as-a-service cloud.
///
/// The sync core only ever talks through this trait: enumerate zones, look
/// a zone up by name, create/update zones, and CRUD record sets. Listings
/// return complete collections; paging is an implementation detail of the
/// cloud client.
#[async_trait]
pub trait DnsCloud: Send + Sync {
    /// The cloud profile name this handle was connected from, for diagnostics.
    fn name(&self) -> &str;

    /// List every zone visible to this account.
    async fn list_zones(&self) -> Result<Vec<Zone>>;

    /// Look a zone up by its fully-qualified name.
    ///
    /// Resolves to [`CloudError::ZoneNotFound`] when absent.
    async fn get_zone(&self, zone_name: &str) -> Result<Zone>;

    /// Create a zone.
    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<Zone>;

    /// Update a zone's SOA-derived settings (TTL, email).
    async fn update_zone(&self, zone_id: &str, req: &UpdateZoneRequest) -> Result<Zone>;

    /// List every record set in a zone, apex SOA and NS included.
    async fn list_record_sets(&self, zone_id: &str) -> Result<Vec<RecordSet>>;

    /// Create a record set.
    async fn create_record_set(&self, req: &CreateRecordSetRequest) -> Result<RecordSet>;

    /// Update an existing record set's TTL and values.
    async fn update_record_set(
        &self,
        recordset_id: &str,
        req: &UpdateRecordSetRequest,
    ) -> Result<RecordSet>;

    /// Delete a record set.
    async fn delete_record_set(&self, zone_id: &str, recordset_id: &str) -> Result<()>;
}
