//! Cloud client implementations.
//!
//! Every supported cloud exposes the OpenStack Designate v2 API; what
//! differs per deployment is the identity endpoint, the region, and the odd
//! formatting quirk, all of which come in through the [`CloudProfile`].

use std::sync::Arc;

use crate::config::CloudProfile;
use crate::error::Result;
use crate::traits::DnsCloud;

pub mod designate;

pub use designate::DesignateCloud;

/// Connect to a cloud profile and return a ready-to-use handle.
///
/// Authentication happens here; the returned handle holds a valid token.
pub async fn connect(name: &str, profile: &CloudProfile) -> Result<Arc<dyn DnsCloud>> {
    let cloud = DesignateCloud::connect(name, profile).await?;
    Ok(Arc::new(cloud))
}
