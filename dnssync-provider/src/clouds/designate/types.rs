//! Designate v2 wire types.

use serde::{Deserialize, Serialize};

use crate::types::{RecordSet, RecordType, Zone, ZoneStatus};

// ============ Responses ============

/// A zone as the API returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiZone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub serial: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub record_num: Option<u32>,
}

impl From<ApiZone> for Zone {
    fn from(z: ApiZone) -> Self {
        let status = match z.status.as_deref() {
            Some("ACTIVE") => ZoneStatus::Active,
            Some("PENDING" | "PENDING_CREATE" | "PENDING_UPDATE" | "PENDING_DELETE") => {
                ZoneStatus::Pending
            }
            Some("ERROR") => ZoneStatus::Error,
            _ => ZoneStatus::Unknown,
        };
        Self {
            id: z.id,
            name: z.name,
            email: z.email.filter(|e| !e.is_empty()),
            ttl: z.ttl,
            serial: z.serial,
            status,
            record_count: z.record_num,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ZoneListResponse {
    #[serde(default)]
    pub zones: Vec<ApiZone>,
}

/// A record set as the API returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRecordSet {
    pub id: String,
    pub zone_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub records: Vec<String>,
}

impl From<ApiRecordSet> for RecordSet {
    fn from(rs: ApiRecordSet) -> Self {
        Self {
            id: rs.id,
            zone_id: rs.zone_id,
            name: rs.name,
            record_type: RecordType::from(rs.record_type),
            ttl: rs.ttl,
            records: rs.records,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordSetListResponse {
    #[serde(default)]
    pub recordsets: Vec<ApiRecordSet>,
}

// ============ Request Bodies ============

#[derive(Debug, Serialize)]
pub struct CreateZoneBody<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct UpdateZoneBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CreateRecordSetBody<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub record_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    pub records: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct UpdateRecordSetBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    pub records: &'a [String],
}

// ============ Errors ============

/// Error body. Stock Designate uses a numeric `code` plus a `type` string;
/// OTC deployments return a vendor `code` string like `DNS.0302`.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// The most specific error code available: the `type` string when
    /// present, otherwise a string-valued `code`.
    pub fn best_code(&self) -> Option<String> {
        if let Some(t) = &self.error_type {
            return Some(t.clone());
        }
        match &self.code {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }
}
