use crate::error::SyncError;

/// Per-run reconciliation policy.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Delete target record sets that have no source counterpart.
    pub remove: bool,
    /// Override for the SOA responsible-party email.
    pub mail: Option<String>,
}

/// Counters for one reconciled zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Record sets created in the target.
    pub created: u32,
    /// Record sets updated in the target.
    pub updated: u32,
    /// Record sets deleted from the target.
    pub deleted: u32,
    /// Record sets already in sync.
    pub unchanged: u32,
    /// Record sets whose API call failed; the run continued without them.
    pub failed: u32,
}

impl SyncStats {
    /// Fold another zone's counters into this one.
    pub fn merge(&mut self, other: &Self) {
        self.created += other.created;
        self.updated += other.updated;
        self.deleted += other.deleted;
        self.unchanged += other.unchanged;
        self.failed += other.failed;
    }

    /// Whether any mutation was applied.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.created > 0 || self.updated > 0 || self.deleted > 0
    }
}

impl std::fmt::Display for SyncStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "created {}, updated {}, deleted {}, unchanged {}, failed {}",
            self.created, self.updated, self.deleted, self.unchanged, self.failed
        )
    }
}

/// Outcome of reconciling one zone in a multi-zone run.
#[derive(Debug, Clone)]
pub struct ZoneReport {
    /// Fully-qualified zone name as requested.
    pub zone: String,
    /// Counters on success, the fatal error otherwise.
    pub outcome: Result<SyncStats, SyncError>,
}

impl ZoneReport {
    /// Whether the zone failed outright (as opposed to partial record
    /// failures, which land in `SyncStats::failed`).
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.outcome.is_err()
    }
}
