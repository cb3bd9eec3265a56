//! Organization-wide inventory: networks and device uplinks.

use super::DashboardClient;
use crate::error::ApiError;
use crate::models::{DevicesByNetwork, NetworkLookup};

/// Everything the report needs from organization-wide calls.
#[derive(Debug, Default)]
pub struct Inventory {
    pub networks: NetworkLookup,
    pub devices: DevicesByNetwork,
}

/// Fetch all networks and uplink statuses of `org_id`.
///
/// Either call failing fails the whole fetch.
pub fn fetch_inventory(client: &DashboardClient, org_id: &str) -> Result<Inventory, ApiError> {
    log::info!("#Start fetch_inventory() org_id={org_id}");

    let networks: NetworkLookup = client.networks(org_id)?.into_iter().collect();
    log::info!("Got {} networks", networks.len());

    let devices: DevicesByNetwork = client.uplink_statuses(org_id)?.into_iter().collect();
    log::info!(
        "Got {} devices in {} networks",
        devices.device_count(),
        devices.len()
    );

    Ok(Inventory { networks, devices })
}
