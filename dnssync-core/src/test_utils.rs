//! In-memory `DnsCloud` for reconciler tests.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use dnssync_provider::{
    CloudError, CreateRecordSetRequest, CreateZoneRequest, DnsCloud, RecordSet, RecordType,
    Result, UpdateRecordSetRequest, UpdateZoneRequest, Zone, ZoneStatus,
};

use crate::soa::{SoaRecord, SoaStyle, email_to_rname};

/// An in-memory cloud. Creating a zone generates its apex NS and SOA
/// record sets the way real deployments do, with the SOA text rendered in
/// the cloud's configured style.
pub struct MockCloud {
    name: String,
    /// Authoritative nameservers handed to every hosted zone.
    nameservers: Vec<String>,
    soa_style: SoaStyle,
    /// When set, `Zone.email`/`Zone.ttl` come back as `None`, forcing
    /// callers onto the apex-SOA fallback path.
    hide_zone_attrs: bool,
    zones: RwLock<HashMap<String, Zone>>,
    record_sets: RwLock<HashMap<String, Vec<RecordSet>>>,
    /// Record names whose mutating calls fail with a network error.
    fail_names: RwLock<HashSet<String>>,
    next_id: AtomicU32,
}

impl MockCloud {
    pub fn new(name: &str, nameservers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            nameservers: nameservers.iter().map(ToString::to_string).collect(),
            soa_style: SoaStyle::Canonical,
            hide_zone_attrs: false,
            zones: RwLock::new(HashMap::new()),
            record_sets: RwLock::new(HashMap::new()),
            fail_names: RwLock::new(HashSet::new()),
            next_id: AtomicU32::new(1),
        }
    }

    pub fn with_soa_style(mut self, style: SoaStyle) -> Self {
        self.soa_style = style;
        self
    }

    pub fn with_hidden_zone_attrs(mut self) -> Self {
        self.hide_zone_attrs = true;
        self
    }

    fn fresh_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn soa_text(&self, zone_name: &str, email: Option<&str>, minimum: u32) -> String {
        let rname = email.map_or_else(
            || format!("hostmaster.{zone_name}"),
            email_to_rname,
        );
        let soa = SoaRecord {
            mname: self.nameservers[0].clone(),
            rname,
            serial: 1,
            refresh: 7200,
            retry: 900,
            expire: 1_209_600,
            minimum,
        };
        soa.format(self.soa_style)
    }

    /// Seed a zone directly, apex NS and SOA included. Returns the zone id.
    pub fn add_zone(&self, name: &str, email: Option<&str>, ttl: Option<u32>) -> String {
        let id = self.fresh_id("zone");
        let zone = Zone {
            id: id.clone(),
            name: name.to_string(),
            email: email.map(ToString::to_string),
            ttl,
            serial: Some(1),
            status: ZoneStatus::Active,
            record_count: None,
        };
        self.zones.write().unwrap().insert(id.clone(), zone);

        let apex_sets = vec![
            RecordSet {
                id: self.fresh_id("rs"),
                zone_id: id.clone(),
                name: name.to_string(),
                record_type: RecordType::Ns,
                ttl,
                records: self.nameservers.clone(),
            },
            RecordSet {
                id: self.fresh_id("rs"),
                zone_id: id.clone(),
                name: name.to_string(),
                record_type: RecordType::Soa,
                ttl,
                records: vec![self.soa_text(name, email, ttl.unwrap_or(300))],
            },
        ];
        self.record_sets.write().unwrap().insert(id.clone(), apex_sets);
        id
    }

    /// Seed a record set directly.
    pub fn add_record_set(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
        ttl: Option<u32>,
        records: &[&str],
    ) -> String {
        let id = self.fresh_id("rs");
        let rs = RecordSet {
            id: id.clone(),
            zone_id: zone_id.to_string(),
            name: name.to_string(),
            record_type,
            ttl,
            records: records.iter().map(ToString::to_string).collect(),
        };
        self.record_sets
            .write()
            .unwrap()
            .entry(zone_id.to_string())
            .or_default()
            .push(rs);
        id
    }

    /// Make every mutating call on the named record set fail.
    pub fn fail_record(&self, name: &str) {
        self.fail_names.write().unwrap().insert(name.to_string());
    }

    /// Fetch a record set for assertions.
    pub fn find_record_set(
        &self,
        zone_id: &str,
        name: &str,
        record_type: &RecordType,
    ) -> Option<RecordSet> {
        self.record_sets
            .read()
            .unwrap()
            .get(zone_id)?
            .iter()
            .find(|rs| rs.name == name && rs.record_type == *record_type)
            .cloned()
    }

    /// The stored zone, for assertions.
    pub fn find_zone(&self, name: &str) -> Option<Zone> {
        self.zones
            .read()
            .unwrap()
            .values()
            .find(|z| z.name == name)
            .cloned()
    }

    fn check_fail(&self, name: &str) -> Result<()> {
        if self.fail_names.read().unwrap().contains(name) {
            return Err(CloudError::NetworkError {
                cloud: self.name.clone(),
                detail: format!("injected failure for '{name}'"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DnsCloud for MockCloud {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_zones(&self) -> Result<Vec<Zone>> {
        let mut zones: Vec<Zone> = self.zones.read().unwrap().values().cloned().collect();
        zones.sort_by(|a, b| a.name.cmp(&b.name));
        if self.hide_zone_attrs {
            for z in &mut zones {
                z.email = None;
                z.ttl = None;
            }
        }
        Ok(zones)
    }

    async fn get_zone(&self, zone_name: &str) -> Result<Zone> {
        let mut zone = self
            .zones
            .read()
            .unwrap()
            .values()
            .find(|z| z.name == zone_name)
            .cloned()
            .ok_or_else(|| CloudError::ZoneNotFound {
                cloud: self.name.clone(),
                zone: zone_name.to_string(),
                raw_message: None,
            })?;
        if self.hide_zone_attrs {
            zone.email = None;
            zone.ttl = None;
        }
        Ok(zone)
    }

    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<Zone> {
        if self.zones.read().unwrap().values().any(|z| z.name == req.name) {
            return Err(CloudError::ZoneExists {
                cloud: self.name.clone(),
                zone: req.name.clone(),
                raw_message: None,
            });
        }
        self.add_zone(&req.name, req.email.as_deref(), req.ttl);
        self.get_zone(&req.name).await
    }

    async fn update_zone(&self, zone_id: &str, req: &UpdateZoneRequest) -> Result<Zone> {
        let mut zones = self.zones.write().unwrap();
        let zone = zones
            .get_mut(zone_id)
            .ok_or_else(|| CloudError::ZoneNotFound {
                cloud: self.name.clone(),
                zone: zone_id.to_string(),
                raw_message: None,
            })?;
        if let Some(email) = &req.email {
            zone.email = Some(email.clone());
        }
        if let Some(ttl) = req.ttl {
            zone.ttl = Some(ttl);
        }
        let (name, email, ttl) = (zone.name.clone(), zone.email.clone(), zone.ttl);
        let updated = zone.clone();
        drop(zones);

        // Keep the apex SOA consistent with the zone settings.
        let text = self.soa_text(&name, email.as_deref(), ttl.unwrap_or(300));
        if let Some(sets) = self.record_sets.write().unwrap().get_mut(zone_id) {
            for rs in sets {
                if rs.record_type == RecordType::Soa {
                    rs.records = vec![text.clone()];
                    rs.ttl = ttl;
                }
            }
        }
        Ok(updated)
    }

    async fn list_record_sets(&self, zone_id: &str) -> Result<Vec<RecordSet>> {
        Ok(self
            .record_sets
            .read()
            .unwrap()
            .get(zone_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_record_set(&self, req: &CreateRecordSetRequest) -> Result<RecordSet> {
        self.check_fail(&req.name)?;
        let mut sets = self.record_sets.write().unwrap();
        let zone_sets = sets.entry(req.zone_id.clone()).or_default();
        if zone_sets
            .iter()
            .any(|rs| rs.name == req.name && rs.record_type == req.record_type)
        {
            return Err(CloudError::RecordSetExists {
                cloud: self.name.clone(),
                record_name: req.name.clone(),
                raw_message: None,
            });
        }
        let rs = RecordSet {
            id: format!("rs-{}", self.next_id.fetch_add(1, Ordering::SeqCst)),
            zone_id: req.zone_id.clone(),
            name: req.name.clone(),
            record_type: req.record_type.clone(),
            ttl: req.ttl,
            records: req.records.clone(),
        };
        zone_sets.push(rs.clone());
        Ok(rs)
    }

    async fn update_record_set(
        &self,
        recordset_id: &str,
        req: &UpdateRecordSetRequest,
    ) -> Result<RecordSet> {
        let mut sets = self.record_sets.write().unwrap();
        let zone_sets = sets
            .get_mut(&req.zone_id)
            .ok_or_else(|| CloudError::ZoneNotFound {
                cloud: self.name.clone(),
                zone: req.zone_id.clone(),
                raw_message: None,
            })?;
        let rs = zone_sets
            .iter_mut()
            .find(|rs| rs.id == recordset_id)
            .ok_or_else(|| CloudError::RecordSetNotFound {
                cloud: self.name.clone(),
                recordset_id: recordset_id.to_string(),
                raw_message: None,
            })?;
        if self.fail_names.read().unwrap().contains(&rs.name) {
            return Err(CloudError::NetworkError {
                cloud: self.name.clone(),
                detail: format!("injected failure for '{}'", rs.name),
            });
        }
        rs.ttl = req.ttl;
        rs.records = req.records.clone();
        Ok(rs.clone())
    }

    async fn delete_record_set(&self, zone_id: &str, recordset_id: &str) -> Result<()> {
        let mut sets = self.record_sets.write().unwrap();
        let zone_sets = sets
            .get_mut(zone_id)
            .ok_or_else(|| CloudError::ZoneNotFound {
                cloud: self.name.clone(),
                zone: zone_id.to_string(),
                raw_message: None,
            })?;
        let Some(pos) = zone_sets.iter().position(|rs| rs.id == recordset_id) else {
            return Err(CloudError::RecordSetNotFound {
                cloud: self.name.clone(),
                recordset_id: recordset_id.to_string(),
                raw_message: None,
            });
        };
        if self.fail_names.read().unwrap().contains(&zone_sets[pos].name) {
            return Err(CloudError::NetworkError {
                cloud: self.name.clone(),
                detail: format!("injected failure for '{}'", zone_sets[pos].name),
            });
        }
        zone_sets.remove(pos);
        Ok(())
    }
}
