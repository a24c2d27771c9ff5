//! `DnsCloud` implementation for Designate.

use async_trait::async_trait;

use crate::error::{CloudError, Result};
use crate::traits::{DnsCloud, ErrorContext};
use crate::types::{
    CreateRecordSetRequest, CreateZoneRequest, RecordSet, UpdateRecordSetRequest,
    UpdateZoneRequest, Zone,
};

use super::types::{
    ApiRecordSet, ApiZone, CreateRecordSetBody, CreateZoneBody, RecordSetListResponse,
    UpdateRecordSetBody, UpdateZoneBody, ZoneListResponse,
};
use super::{DesignateCloud, PAGE_LIMIT};

impl DesignateCloud {
    fn zone_ctx(zone: &str) -> ErrorContext {
        ErrorContext {
            zone: Some(zone.to_string()),
            ..ErrorContext::default()
        }
    }
}

#[async_trait]
impl DnsCloud for DesignateCloud {
    fn name(&self) -> &str {
        &self.cloud_name
    }

    async fn list_zones(&self) -> Result<Vec<Zone>> {
        let mut zones = Vec::new();
        let mut marker: Option<String> = None;
        loop {
            let mut path = format!("/v2/zones?limit={PAGE_LIMIT}");
            if let Some(m) = &marker {
                path.push_str(&format!("&marker={}", urlencoding::encode(m)));
            }
            let page: ZoneListResponse = self.get(&path, ErrorContext::default()).await?;
            let page_len = page.zones.len();
            marker = page.zones.last().map(|z| z.id.clone());
            zones.extend(page.zones.into_iter().map(Zone::from));
            if page_len < PAGE_LIMIT as usize {
                break;
            }
        }
        log::debug!("[{}] Listed {} zones", self.cloud_name, zones.len());
        Ok(zones)
    }

    async fn get_zone(&self, zone_name: &str) -> Result<Zone> {
        let path = format!("/v2/zones?name={}", urlencoding::encode(zone_name));
        let page: ZoneListResponse = self.get(&path, Self::zone_ctx(zone_name)).await?;
        page.zones
            .into_iter()
            .next()
            .map(Zone::from)
            .ok_or_else(|| CloudError::ZoneNotFound {
                cloud: self.cloud_name.clone(),
                zone: zone_name.to_string(),
                raw_message: None,
            })
    }

    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<Zone> {
        let body = CreateZoneBody {
            name: &req.name,
            email: req.email.as_deref(),
            ttl: req.ttl,
        };
        let created: ApiZone = self
            .post("/v2/zones", &body, Self::zone_ctx(&req.name))
            .await?;
        log::info!("[{}] Created zone '{}'", self.cloud_name, req.name);
        Ok(created.into())
    }

    async fn update_zone(&self, zone_id: &str, req: &UpdateZoneRequest) -> Result<Zone> {
        let body = UpdateZoneBody {
            email: req.email.as_deref(),
            ttl: req.ttl,
        };
        let path = format!("/v2/zones/{zone_id}");
        let updated: ApiZone = self.patch(&path, &body, Self::zone_ctx(zone_id)).await?;
        log::info!("[{}] Updated zone '{}'", self.cloud_name, updated.name);
        Ok(updated.into())
    }

    async fn list_record_sets(&self, zone_id: &str) -> Result<Vec<RecordSet>> {
        let mut record_sets = Vec::new();
        let mut marker: Option<String> = None;
        loop {
            let mut path = format!("/v2/zones/{zone_id}/recordsets?limit={PAGE_LIMIT}");
            if let Some(m) = &marker {
                path.push_str(&format!("&marker={}", urlencoding::encode(m)));
            }
            let page: RecordSetListResponse = self.get(&path, Self::zone_ctx(zone_id)).await?;
            let page_len = page.recordsets.len();
            marker = page.recordsets.last().map(|rs| rs.id.clone());
            record_sets.extend(page.recordsets.into_iter().map(RecordSet::from));
            if page_len < PAGE_LIMIT as usize {
                break;
            }
        }
        log::debug!(
            "[{}] Listed {} record sets in zone {zone_id}",
            self.cloud_name,
            record_sets.len()
        );
        Ok(record_sets)
    }

    async fn create_record_set(&self, req: &CreateRecordSetRequest) -> Result<RecordSet> {
        let body = CreateRecordSetBody {
            name: &req.name,
            record_type: req.record_type.as_str(),
            ttl: req.ttl,
            records: &req.records,
        };
        let ctx = ErrorContext {
            zone: Some(req.zone_id.clone()),
            record_name: Some(req.name.clone()),
            ..ErrorContext::default()
        };
        let path = format!("/v2/zones/{}/recordsets", req.zone_id);
        let created: ApiRecordSet = self.post(&path, &body, ctx).await?;
        Ok(created.into())
    }

    async fn update_record_set(
        &self,
        recordset_id: &str,
        req: &UpdateRecordSetRequest,
    ) -> Result<RecordSet> {
        let body = UpdateRecordSetBody {
            ttl: req.ttl,
            records: &req.records,
        };
        let ctx = ErrorContext {
            zone: Some(req.zone_id.clone()),
            recordset_id: Some(recordset_id.to_string()),
            ..ErrorContext::default()
        };
        let path = format!("/v2/zones/{}/recordsets/{recordset_id}", req.zone_id);
        let updated: ApiRecordSet = self.put(&path, &body, ctx).await?;
        Ok(updated.into())
    }

    async fn delete_record_set(&self, zone_id: &str, recordset_id: &str) -> Result<()> {
        let ctx = ErrorContext {
            zone: Some(zone_id.to_string()),
            recordset_id: Some(recordset_id.to_string()),
            ..ErrorContext::default()
        };
        let path = format!("/v2/zones/{zone_id}/recordsets/{recordset_id}");
        self.delete(&path, ctx).await
    }
}
