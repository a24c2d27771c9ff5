//! Cloud DNS access layer.
//!
//! Defines the [`DnsCloud`] trait the sync core programs against, the
//! unified [`CloudError`] taxonomy, cloud profile configuration, and the
//! OpenStack Designate v2 client that implements the trait.
//!
//! # Example
//!
//! ```no_run
//! use dnssync_provider::{CloudProfiles, connect};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let path = CloudProfiles::locate(None)?;
//! let profiles = CloudProfiles::load(&path)?;
//! let cloud = connect("cloud1", profiles.resolve("cloud1")?).await?;
//! for zone in cloud.list_zones().await? {
//!     println!("{}", zone.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod clouds;
pub mod config;
pub mod error;
pub mod http_client;
pub mod traits;
pub mod types;

pub use clouds::{DesignateCloud, connect};
pub use config::{AuthMethod, CloudProfile, CloudProfiles, ConfigError};
pub use error::{CloudError, Result};
pub use traits::DnsCloud;
pub use types::{
    CreateRecordSetRequest, CreateZoneRequest, RecordSet, RecordType, UpdateRecordSetRequest,
    UpdateZoneRequest, Zone, ZoneStatus, ensure_fqdn, normalized_name,
};
