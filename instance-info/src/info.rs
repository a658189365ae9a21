use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::Result, host, imds, region};

/// Flat description of the instance served by the endpoint
///
/// Field order is the serialization order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceInfo {
  pub instance_id: String,
  pub public_ipv4: String,
  pub private_ipv4: String,
  pub availability_zone: String,
  pub region: String,
  pub instance_type: String,
  pub hostname: String,
  /// Always the same value as `availability_zone`
  pub location: String,
  /// Derived from `region`, `UTC` when the region is unknown
  pub timezone: String,
}

impl InstanceInfo {
  pub fn new(metadata: imds::InstanceMetadata, hostname: String) -> Self {
    let location = metadata.availability_zone.clone();
    let timezone = region::timezone(&metadata.region).to_owned();

    Self {
      instance_id: metadata.instance_id,
      public_ipv4: metadata.public_ipv4,
      private_ipv4: metadata.private_ipv4,
      availability_zone: metadata.availability_zone,
      region: metadata.region,
      instance_type: metadata.instance_type,
      hostname,
      location,
      timezone,
    }
  }
}

/// Collect the instance metadata and local hostname into an [`InstanceInfo`]
pub async fn collect(client: &imds::Client) -> Result<InstanceInfo> {
  let metadata = client.get_imds_data().await?;
  debug!("Instance metadata: {metadata:#?}");

  Ok(InstanceInfo::new(metadata, host::get_hostname()))
}
