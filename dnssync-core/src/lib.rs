//! Zone reconciliation core.
//!
//! Takes two connected clouds (see `dnssync_provider`) and makes the
//! target zone's record sets match the source's, one zone at a time.
//! Apex NS/SOA special-casing, delegation filtering, SOA style quirks and
//! per-zone reporting all live here; everything cloud-specific stays
//! behind the `DnsCloud` trait.

pub mod error;
pub mod reconciler;
pub mod soa;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use error::{SyncError, SyncResult};
pub use reconciler::ZoneReconciler;
pub use soa::{SoaRecord, SoaStyle, email_to_rname, rname_to_email};
pub use types::{SyncOptions, SyncStats, ZoneReport};

// Re-exported so the binary only needs one import path for cloud types.
pub use dnssync_provider::{CloudError, DnsCloud};
