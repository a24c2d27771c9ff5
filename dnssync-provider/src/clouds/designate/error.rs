//! Designate error mapping.
//!
//! Stock Designate returns a `type` string (`zone_not_found`,
//! `duplicate_zone`, ...); OTC-style deployments return Huawei vendor codes
//! (`DNS.xxxx`, `APIGW.xxxx`). Both funnel through the same mapper, with
//! the raw HTTP status as the fallback when the body carries neither.

use crate::error::CloudError;
use crate::traits::{CloudErrorMapper, ErrorContext, RawApiError};

use super::DesignateCloud;

impl CloudErrorMapper for DesignateCloud {
    fn cloud_name(&self) -> &str {
        &self.cloud_name
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> CloudError {
        let cloud = self.cloud_name.clone();
        match raw.code.as_deref() {
            // ============ Zone not found ============
            Some("zone_not_found" | "DNS.0302" | "DNS.0101" | "DNS.1206") => {
                CloudError::ZoneNotFound {
                    cloud,
                    zone: context.zone.unwrap_or_default(),
                    raw_message: Some(raw.message),
                }
            }

            // ============ Zone already exists ============
            Some("duplicate_zone" | "DNS.0203") => CloudError::ZoneExists {
                cloud,
                zone: context.zone.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // ============ Record set not found ============
            Some("recordset_not_found" | "DNS.0313" | "DNS.0004") => {
                CloudError::RecordSetNotFound {
                    cloud,
                    recordset_id: context.recordset_id.unwrap_or_default(),
                    raw_message: Some(raw.message),
                }
            }

            // ============ Record set already exists ============
            Some("duplicate_recordset" | "DNS.0312" | "DNS.0335" | "DNS.0016") => {
                CloudError::RecordSetExists {
                    cloud,
                    record_name: context.record_name.unwrap_or_default(),
                    raw_message: Some(raw.message),
                }
            }

            // ============ Credentials rejected ============
            Some(
                "invalid_token" | "unauthorized" | "APIGW.0301" | "APIGW.0303" | "APIGW.0305"
                | "DNS.0005" | "DNS.0013",
            ) => CloudError::InvalidCredentials {
                cloud,
                raw_message: Some(raw.message),
            },

            // ============ Permission denied ============
            Some("forbidden" | "APIGW.0302" | "APIGW.0306" | "DNS.0030" | "DNS.1802") => {
                CloudError::PermissionDenied {
                    cloud,
                    raw_message: Some(raw.message),
                }
            }

            // ============ Quota ============
            Some("over_quota" | "quota_resource_unknown" | "DNS.0403" | "DNS.0404" | "DNS.2002") => {
                CloudError::QuotaExceeded {
                    cloud,
                    raw_message: Some(raw.message),
                }
            }

            // ============ Invalid parameters ============
            Some("invalid_ttl" | "DNS.0303" | "DNS.0319") => CloudError::InvalidParameter {
                cloud,
                param: "ttl".to_string(),
                detail: raw.message,
            },
            Some("invalid_recordset_name" | "invalid_uuid" | "DNS.0304" | "DNS.0202") => {
                CloudError::InvalidParameter {
                    cloud,
                    param: "name".to_string(),
                    detail: raw.message,
                }
            }
            Some("unsupported_recordset_type" | "DNS.0307") => CloudError::InvalidParameter {
                cloud,
                param: "type".to_string(),
                detail: raw.message,
            },
            Some("invalid_object" | "invalid_recordset_records" | "DNS.0308") => {
                CloudError::InvalidParameter {
                    cloud,
                    param: "records".to_string(),
                    detail: raw.message,
                }
            }

            // ============ Backend/service faults ============
            Some("APIGW.0201" | "DNS.0012" | "DNS.0015") => CloudError::NetworkError {
                cloud,
                detail: raw.message,
            },

            _ => self.unknown_error(raw),
        }
    }
}

impl DesignateCloud {
    /// Fallback mapping when the error body has no usable code.
    pub(super) fn map_http_status(
        &self,
        status: u16,
        body: &str,
        ctx: ErrorContext,
    ) -> CloudError {
        let cloud = self.cloud_name.clone();
        let raw_message = if body.is_empty() {
            None
        } else {
            Some(body.to_string())
        };
        match status {
            401 => CloudError::InvalidCredentials { cloud, raw_message },
            403 => CloudError::PermissionDenied { cloud, raw_message },
            404 => {
                if let Some(recordset_id) = ctx.recordset_id {
                    CloudError::RecordSetNotFound {
                        cloud,
                        recordset_id,
                        raw_message,
                    }
                } else {
                    CloudError::ZoneNotFound {
                        cloud,
                        zone: ctx.zone.unwrap_or_default(),
                        raw_message,
                    }
                }
            }
            409 => {
                if let Some(record_name) = ctx.record_name {
                    CloudError::RecordSetExists {
                        cloud,
                        record_name,
                        raw_message,
                    }
                } else {
                    CloudError::ZoneExists {
                        cloud,
                        zone: ctx.zone.unwrap_or_default(),
                        raw_message,
                    }
                }
            }
            _ => CloudError::Unknown {
                cloud,
                raw_code: None,
                raw_message: format!("HTTP {status}: {body}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client;

    fn cloud() -> DesignateCloud {
        DesignateCloud {
            cloud_name: "tgt".to_string(),
            endpoint: "https://dns.example.com".to_string(),
            token: "tok".to_string(),
            client: Client::new(),
        }
    }

    fn zone_ctx() -> ErrorContext {
        ErrorContext {
            zone: Some("example.com.".to_string()),
            ..ErrorContext::default()
        }
    }

    #[test]
    fn designate_type_string_zone_not_found() {
        let err = cloud().map_error(
            RawApiError::with_code("zone_not_found", "Could not find Zone"),
            zone_ctx(),
        );
        match err {
            CloudError::ZoneNotFound { zone, .. } => assert_eq!(zone, "example.com."),
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn otc_vendor_code_zone_not_found() {
        let err = cloud().map_error(
            RawApiError::with_code("DNS.0302", "zone not exist"),
            zone_ctx(),
        );
        assert!(matches!(err, CloudError::ZoneNotFound { .. }));
    }

    #[test]
    fn duplicate_recordset_carries_record_name() {
        let ctx = ErrorContext {
            record_name: Some("www.example.com.".to_string()),
            ..ErrorContext::default()
        };
        let err = cloud().map_error(RawApiError::with_code("duplicate_recordset", "dup"), ctx);
        match err {
            CloudError::RecordSetExists { record_name, .. } => {
                assert_eq!(record_name, "www.example.com.");
            }
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn invalid_ttl_maps_to_parameter() {
        let err = cloud().map_error(
            RawApiError::with_code("invalid_ttl", "ttl out of range"),
            ErrorContext::default(),
        );
        assert!(matches!(
            err,
            CloudError::InvalidParameter { ref param, .. } if param == "ttl"
        ));
    }

    #[test]
    fn unrecognized_code_falls_back_to_unknown() {
        let err = cloud().map_error(
            RawApiError::with_code("DNS.9999", "mystery"),
            ErrorContext::default(),
        );
        match err {
            CloudError::Unknown { raw_code, .. } => {
                assert_eq!(raw_code.as_deref(), Some("DNS.9999"));
            }
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn status_fallback_404_with_recordset_ctx() {
        let ctx = ErrorContext {
            recordset_id: Some("rs-1".to_string()),
            ..ErrorContext::default()
        };
        let err = cloud().map_http_status(404, "", ctx);
        assert!(matches!(err, CloudError::RecordSetNotFound { .. }));
    }

    #[test]
    fn status_fallback_401() {
        let err = cloud().map_http_status(401, "denied", ErrorContext::default());
        assert!(matches!(err, CloudError::InvalidCredentials { .. }));
    }
}
