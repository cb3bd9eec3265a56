//! Device uplink statuses and their grouping by network.

use serde::Deserialize;
use std::collections::HashMap;

/// One record of `GET /organizations/{orgId}/uplinks/statuses`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeviceUplinks {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub network_id: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub serial: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub model: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub uplinks: Vec<Uplink>,
}

/// A WAN-facing interface of a device.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Uplink {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub interface: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: String,
    /// Address assigned to the interface. `None` when the field is absent,
    /// `Some(None)` when the Dashboard sent `null`.
    #[serde(default, deserialize_with = "super::present")]
    pub ip: Option<Option<String>>,
    /// Address the Dashboard observed the device connecting from.
    #[serde(default, deserialize_with = "super::present")]
    pub public_ip: Option<Option<String>>,
}

/// Devices grouped by network id; groups keep the order their first device was seen in.
#[derive(Debug, Default, Clone)]
pub struct DevicesByNetwork {
    index: HashMap<String, usize>,
    groups: Vec<(String, Vec<DeviceUplinks>)>,
}

impl DevicesByNetwork {
    pub fn new() -> DevicesByNetwork {
        DevicesByNetwork::default()
    }

    pub fn push(&mut self, device: DeviceUplinks) {
        match self.index.get(&device.network_id) {
            Some(&i) => self.groups[i].1.push(device),
            None => {
                self.index
                    .insert(device.network_id.clone(), self.groups.len());
                self.groups.push((device.network_id.clone(), vec![device]));
            }
        }
    }

    /// Devices of one network, empty when the network has none.
    pub fn devices(&self, network_id: &str) -> &[DeviceUplinks] {
        match self.index.get(network_id) {
            Some(&i) => &self.groups[i].1,
            None => &[],
        }
    }

    pub fn contains(&self, network_id: &str) -> bool {
        self.index.contains_key(network_id)
    }

    /// Network ids in first-seen order.
    pub fn network_ids(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(id, _)| id.as_str())
    }

    /// Number of networks.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn device_count(&self) -> usize {
        self.groups.iter().map(|(_, devices)| devices.len()).sum()
    }
}

impl FromIterator<DeviceUplinks> for DevicesByNetwork {
    fn from_iter<I: IntoIterator<Item = DeviceUplinks>>(iter: I) -> Self {
        let mut grouped = DevicesByNetwork::new();
        for device in iter {
            grouped.push(device);
        }
        grouped
    }
}
