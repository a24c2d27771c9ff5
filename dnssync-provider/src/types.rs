use serde::{Deserialize, Serialize};

// ============ Record Types ============

/// DNS record type tag.
///
/// Serialized as the uppercase wire mnemonic (`"A"`, `"AAAA"`, `"SOA"`, ...).
/// Types this tool has no special handling for round-trip through
/// [`Other`](Self::Other) untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record (apex or delegation).
    Ns,
    /// Start of Authority record.
    Soa,
    /// Service locator record.
    Srv,
    /// Certificate Authority Authorization record.
    Caa,
    /// Reverse-mapping pointer record.
    Ptr,
    /// Any record type not listed above, preserved verbatim.
    Other(String),
}

impl RecordType {
    /// The uppercase wire mnemonic for this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Soa => "SOA",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
            Self::Ptr => "PTR",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for RecordType {
    fn from(s: String) -> Self {
        match s.to_uppercase().as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CNAME" => Self::Cname,
            "MX" => Self::Mx,
            "TXT" => Self::Txt,
            "NS" => Self::Ns,
            "SOA" => Self::Soa,
            "SRV" => Self::Srv,
            "CAA" => Self::Caa,
            "PTR" => Self::Ptr,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<RecordType> for String {
    fn from(t: RecordType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Zone Types ============

/// Status of a zone within the DNS service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    /// Zone is active and serving.
    Active,
    /// Zone is pending an asynchronous operation.
    Pending,
    /// Zone is in an error state.
    Error,
    /// Status could not be determined.
    Unknown,
}

/// A DNS zone as returned by the cloud.
///
/// `name` is the fully-qualified zone name exactly as the API returned it;
/// trailing-dot conventions are preserved, never normalized away.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    /// Cloud-specific zone identifier.
    pub id: String,
    /// Fully-qualified zone name (e.g. `"example.com."`).
    pub name: String,
    /// SOA responsible-party email, if the deployment exposes it.
    pub email: Option<String>,
    /// Zone default TTL in seconds, if the deployment exposes it.
    pub ttl: Option<u32>,
    /// SOA serial, if known.
    pub serial: Option<u64>,
    /// Current zone status.
    pub status: ZoneStatus,
    /// Number of record sets in this zone, if known.
    pub record_count: Option<u32>,
}

/// A record set: the group of values sharing a `(name, type)` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSet {
    /// Cloud-specific record set identifier.
    pub id: String,
    /// Zone identifier this record set belongs to.
    pub zone_id: String,
    /// Fully-qualified record name (e.g. `"www.example.com."`).
    pub name: String,
    /// Record type tag.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Time to live in seconds; `None` means the zone default applies.
    pub ttl: Option<u32>,
    /// Record values; ordering carries no meaning.
    pub records: Vec<String>,
}

impl RecordSet {
    /// Whether this record set sits at the zone apex.
    #[must_use]
    pub fn is_apex(&self, zone_name: &str) -> bool {
        normalized_name(&self.name) == normalized_name(zone_name)
    }
}

// ============ Requests ============

/// Request to create a new zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateZoneRequest {
    /// Fully-qualified zone name, trailing dot included.
    pub name: String,
    /// SOA responsible-party email.
    pub email: Option<String>,
    /// Zone default TTL in seconds.
    pub ttl: Option<u32>,
}

/// Request to update an existing zone's SOA-derived settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateZoneRequest {
    /// New SOA responsible-party email, if it should change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New zone default TTL, if it should change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// Request to create a record set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecordSetRequest {
    /// Zone identifier to create the record set in.
    pub zone_id: String,
    /// Fully-qualified record name, trailing dot included.
    pub name: String,
    /// Record type tag.
    pub record_type: RecordType,
    /// TTL in seconds; `None` lets the zone default apply.
    pub ttl: Option<u32>,
    /// Record values.
    pub records: Vec<String>,
}

/// Request to update an existing record set.
///
/// The `(name, type)` identity of a record set cannot change; only TTL and
/// values can.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRecordSetRequest {
    /// Zone identifier the record set belongs to.
    pub zone_id: String,
    /// New TTL in seconds; `None` lets the zone default apply.
    pub ttl: Option<u32>,
    /// New record values.
    pub records: Vec<String>,
}

// ============ Name Handling ============

/// Append the trailing dot if the caller left it off.
#[must_use]
pub fn ensure_fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

/// Canonical form for name comparison: lowercase, single trailing dot.
///
/// Only used for comparison; stored names keep their original spelling.
#[must_use]
pub fn normalized_name(name: &str) -> String {
    let mut n = name.trim_end_matches('.').to_lowercase();
    n.push('.');
    n
}
