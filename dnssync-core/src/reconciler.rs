//! One-way zone reconciliation.
//!
//! Given a zone name and two connected clouds, make the target zone's
//! record sets match the source's: create the zone if needed, align the
//! SOA-derived settings, copy record sets, and optionally remove target
//! record sets with no source counterpart. Apex NS and SOA record sets
//! are owned by the hosting cloud and never copied directly.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dnssync_provider::{
    CloudError, CreateRecordSetRequest, CreateZoneRequest, DnsCloud, RecordSet, RecordType,
    UpdateRecordSetRequest, UpdateZoneRequest, Zone, ensure_fqdn, normalized_name,
};

use crate::error::{SyncError, SyncResult};
use crate::soa::{SoaRecord, SoaStyle, email_to_rname};
use crate::types::{SyncOptions, SyncStats, ZoneReport};

/// Reconciles zones from a source cloud into a target cloud.
pub struct ZoneReconciler {
    source: Arc<dyn DnsCloud>,
    target: Arc<dyn DnsCloud>,
    options: SyncOptions,
}

/// The apex record set of the given type, if present.
fn apex_record<'a>(
    sets: &'a [RecordSet],
    zone_name: &str,
    record_type: &RecordType,
) -> Option<&'a RecordSet> {
    sets.iter()
        .find(|rs| rs.record_type == *record_type && rs.is_apex(zone_name))
}

/// Record values compared as sets; ordering carries no meaning.
fn values_equal(a: &[String], b: &[String]) -> bool {
    let mut a: Vec<&str> = a.iter().map(String::as_str).collect();
    let mut b: Vec<&str> = b.iter().map(String::as_str).collect();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

/// Whether every value of an NS record set points at one of the
/// authoritative nameservers (normalized comparison).
fn is_internal_delegation(rs: &RecordSet, authoritative: &HashSet<String>) -> bool {
    !rs.records.is_empty()
        && rs
            .records
            .iter()
            .all(|v| authoritative.contains(&normalized_name(v)))
}

/// Whether an observed SOA value already carries the given email: the
/// expected record is rendered in the observed value's own style and
/// compared byte-exactly, so style quirks never register as drift.
fn soa_carries_email(text: &str, email: &str) -> bool {
    let Ok(soa) = SoaRecord::parse(text) else {
        return false;
    };
    let expected = SoaRecord {
        rname: email_to_rname(email),
        ..soa
    };
    expected.format(SoaStyle::detect(text)) == text
}

impl ZoneReconciler {
    pub fn new(source: Arc<dyn DnsCloud>, target: Arc<dyn DnsCloud>, options: SyncOptions) -> Self {
        Self {
            source,
            target,
            options,
        }
    }

    /// Reconcile several zones sequentially. A zone-level failure lands in
    /// its report and does not abort the remaining zones.
    pub async fn sync_zones(&self, zone_names: &[String]) -> Vec<ZoneReport> {
        let mut reports = Vec::with_capacity(zone_names.len());
        for zone_name in zone_names {
            let outcome = self.sync_zone(zone_name).await;
            if let Err(e) = &outcome {
                if e.is_expected() {
                    log::warn!("Zone '{zone_name}' failed: {e}");
                } else {
                    log::error!("Zone '{zone_name}' failed: {e}");
                }
            }
            reports.push(ZoneReport {
                zone: ensure_fqdn(zone_name),
                outcome,
            });
        }
        reports
    }

    /// Reconcile a single zone. Zone lookup/creation failures are fatal for
    /// the zone; per-record-set failures are counted and skipped.
    pub async fn sync_zone(&self, zone_name: &str) -> SyncResult<SyncStats> {
        let zone_name = ensure_fqdn(zone_name);
        log::info!(
            "Syncing zone '{zone_name}': {} -> {}",
            self.source.name(),
            self.target.name()
        );

        let source_zone = self.source.get_zone(&zone_name).await?;
        let source_sets = self.source.list_record_sets(&source_zone.id).await?;

        let (desired_email, desired_ttl) =
            self.desired_settings(&zone_name, &source_zone, &source_sets)?;

        let target_zone = match self.target.get_zone(&zone_name).await {
            Ok(zone) => zone,
            Err(CloudError::ZoneNotFound { .. }) => {
                log::info!("Creating zone '{zone_name}' in {}", self.target.name());
                self.target
                    .create_zone(&CreateZoneRequest {
                        name: zone_name.clone(),
                        email: desired_email.clone(),
                        ttl: desired_ttl,
                    })
                    .await?
            }
            Err(e) => return Err(e.into()),
        };

        let target_sets = self.target.list_record_sets(&target_zone.id).await?;
        let target_soa = apex_record(&target_sets, &zone_name, &RecordType::Soa);

        self.sync_zone_settings(
            &target_zone,
            target_soa,
            desired_email.as_deref(),
            desired_ttl,
        )
        .await;

        // The apex NS values of both clouds count as authoritative for the
        // delegation-noise filter.
        let mut authoritative: HashSet<String> = HashSet::new();
        for sets in [&source_sets, &target_sets] {
            if let Some(ns) = apex_record(sets, &zone_name, &RecordType::Ns) {
                authoritative.extend(ns.records.iter().map(|v| normalized_name(v)));
            }
        }

        let target_map: HashMap<(String, RecordType), &RecordSet> = target_sets
            .iter()
            .map(|rs| ((normalized_name(&rs.name), rs.record_type.clone()), rs))
            .collect();

        let mut stats = SyncStats::default();

        for rs in &source_sets {
            if rs.is_apex(&zone_name)
                && matches!(rs.record_type, RecordType::Ns | RecordType::Soa)
            {
                continue;
            }
            if rs.record_type == RecordType::Ns && is_internal_delegation(rs, &authoritative) {
                log::debug!("Skipping internal delegation '{}'", rs.name);
                continue;
            }

            let key = (normalized_name(&rs.name), rs.record_type.clone());
            match target_map.get(&key) {
                Some(existing)
                    if existing.ttl == rs.ttl && values_equal(&existing.records, &rs.records) =>
                {
                    stats.unchanged += 1;
                }
                Some(existing) => {
                    log::info!("Updating {} {}", rs.record_type, rs.name);
                    let req = UpdateRecordSetRequest {
                        zone_id: target_zone.id.clone(),
                        ttl: rs.ttl,
                        records: rs.records.clone(),
                    };
                    match self.target.update_record_set(&existing.id, &req).await {
                        Ok(_) => stats.updated += 1,
                        Err(e) => {
                            Self::log_record_error("update", &rs.name, &e);
                            stats.failed += 1;
                        }
                    }
                }
                None => {
                    log::info!("Creating {} {}", rs.record_type, rs.name);
                    let req = CreateRecordSetRequest {
                        zone_id: target_zone.id.clone(),
                        name: rs.name.clone(),
                        record_type: rs.record_type.clone(),
                        ttl: rs.ttl,
                        records: rs.records.clone(),
                    };
                    match self.target.create_record_set(&req).await {
                        Ok(_) => stats.created += 1,
                        Err(e) => {
                            Self::log_record_error("create", &rs.name, &e);
                            stats.failed += 1;
                        }
                    }
                }
            }
        }

        if self.options.remove {
            let source_keys: HashSet<(String, RecordType)> = source_sets
                .iter()
                .map(|rs| (normalized_name(&rs.name), rs.record_type.clone()))
                .collect();

            for rs in &target_sets {
                if rs.is_apex(&zone_name)
                    && matches!(rs.record_type, RecordType::Ns | RecordType::Soa)
                {
                    continue;
                }
                if rs.record_type == RecordType::Ns && is_internal_delegation(rs, &authoritative)
                {
                    continue;
                }
                let key = (normalized_name(&rs.name), rs.record_type.clone());
                if !source_keys.contains(&key) {
                    log::info!("Deleting {} {}", rs.record_type, rs.name);
                    match self.target.delete_record_set(&target_zone.id, &rs.id).await {
                        Ok(()) => stats.deleted += 1,
                        Err(e) => {
                            Self::log_record_error("delete", &rs.name, &e);
                            stats.failed += 1;
                        }
                    }
                }
            }
        }

        log::info!("Zone '{zone_name}' done: {stats}");
        Ok(stats)
    }

    /// TTL and email the target zone should end up with: the mail override
    /// wins for email, then the source zone attributes, then the parsed
    /// source apex SOA (deployments differ in which of the two they expose).
    fn desired_settings(
        &self,
        zone_name: &str,
        source_zone: &Zone,
        source_sets: &[RecordSet],
    ) -> SyncResult<(Option<String>, Option<u32>)> {
        let parsed = match apex_record(source_sets, zone_name, &RecordType::Soa) {
            Some(rs) => {
                let text = rs.records.first().ok_or_else(|| SyncError::MissingSoa {
                    zone: zone_name.to_string(),
                })?;
                let soa = SoaRecord::parse(text).map_err(|reason| SyncError::InvalidSoa {
                    text: text.clone(),
                    reason,
                })?;
                Some((soa, rs.ttl))
            }
            None => None,
        };

        let email = self
            .options
            .mail
            .clone()
            .or_else(|| source_zone.email.clone())
            .or_else(|| parsed.as_ref().map(|(soa, _)| soa.email()));
        let ttl = source_zone
            .ttl
            .or_else(|| parsed.as_ref().and_then(|(_, ttl)| *ttl));

        Ok((email, ttl))
    }

    /// Bring the target zone's TTL/email in line with the desired settings.
    /// A failed update is logged but does not abort the zone; the record
    /// sync is still worth running.
    async fn sync_zone_settings(
        &self,
        target_zone: &Zone,
        target_soa: Option<&RecordSet>,
        desired_email: Option<&str>,
        desired_ttl: Option<u32>,
    ) {
        let mut update = UpdateZoneRequest {
            email: None,
            ttl: None,
        };

        if let Some(email) = desired_email {
            let in_sync = match &target_zone.email {
                Some(current) => current == email,
                None => target_soa
                    .and_then(|rs| rs.records.first())
                    .is_some_and(|text| soa_carries_email(text, email)),
            };
            if !in_sync {
                update.email = Some(email.to_string());
            }
        }

        if let Some(ttl) = desired_ttl {
            let current = target_zone.ttl.or_else(|| target_soa.and_then(|rs| rs.ttl));
            if current != Some(ttl) {
                update.ttl = Some(ttl);
            }
        }

        if update.email.is_none() && update.ttl.is_none() {
            return;
        }

        log::info!(
            "Updating zone '{}' settings (email: {:?}, ttl: {:?})",
            target_zone.name,
            update.email,
            update.ttl
        );
        if let Err(e) = self.target.update_zone(&target_zone.id, &update).await {
            Self::log_record_error("zone settings update", &target_zone.name, &e);
        }
    }

    fn log_record_error(action: &str, name: &str, e: &CloudError) {
        if e.is_expected() {
            log::warn!("Failed to {action} '{name}': {e}");
        } else {
            log::error!("Failed to {action} '{name}': {e}");
        }
    }
}
