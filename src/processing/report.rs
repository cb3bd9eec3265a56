//! Join of networks, device uplinks and NAT rules into report rows.

use crate::error::ApiError;
use crate::models::{DeviceUplinks, DevicesByNetwork, NatKind, NatRule, NetworkLookup, ReportRow, RowType};
use crate::output::{progress, warning, Console};
use itertools::Itertools;

pub const UNKNOWN_NETWORK: &str = "Unknown Network";
pub const NO_TAGS: &str = "No Tags";
/// Shown for an uplink address field missing from the response.
pub const NOT_AVAILABLE: &str = "N/A";

/// Per-network NAT rule lookups.
pub trait NatRuleSource {
    fn nat_rules(&self, network_id: &str, kind: NatKind) -> Result<Vec<NatRule>, ApiError>;
}

/// Network columns shared by every row of one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkLabel {
    pub name: String,
    pub tags: String,
    pub url: String,
}

impl NetworkLabel {
    /// Metadata for `network_id`, with placeholders when the network is unknown.
    pub fn resolve(networks: &NetworkLookup, network_id: &str) -> NetworkLabel {
        match networks.get(network_id) {
            Some(network) => NetworkLabel {
                name: network.name.clone(),
                tags: if network.tags.is_empty() {
                    NO_TAGS.to_string()
                } else {
                    network.tags.iter().join(", ")
                },
                url: network.url.clone(),
            },
            None => NetworkLabel {
                name: UNKNOWN_NETWORK.to_string(),
                tags: NO_TAGS.to_string(),
                url: String::new(),
            },
        }
    }

    fn row(&self, network_id: &str, row_type: RowType) -> ReportRow {
        ReportRow {
            network_name: self.name.clone(),
            network_id: network_id.to_string(),
            tags: self.tags.clone(),
            dashboard_url: self.url.clone(),
            serial: String::new(),
            model: String::new(),
            interface: String::new(),
            row_type,
            public_ip: String::new(),
            private_ip: String::new(),
            rule_name: String::new(),
            status: String::new(),
        }
    }
}

/// Network ids in processing order: networks owning devices in first-seen
/// order, then the remaining listed networks in list order.
pub fn processing_order<'a>(
    devices: &'a DevicesByNetwork,
    networks: &'a NetworkLookup,
) -> Vec<&'a str> {
    devices
        .network_ids()
        .chain(networks.ids().filter(|id| !devices.contains(id)))
        .collect()
}

/// Build all report rows.
///
/// A failed NAT fetch is reported and skipped; it never stops the run or
/// the other rule kind of the same network.
pub fn build_report<N, C>(
    devices: &DevicesByNetwork,
    networks: &NetworkLookup,
    nat_source: &N,
    console: &mut C,
) -> Vec<ReportRow>
where
    N: NatRuleSource + ?Sized,
    C: Console + ?Sized,
{
    let order = processing_order(devices, networks);
    let total = order.len();
    log::info!("#Start build_report() networks={total}");

    let mut rows = Vec::new();
    for (i, network_id) in order.into_iter().enumerate() {
        let label = NetworkLabel::resolve(networks, network_id);
        console.say(&progress(&format!(
            "Processing network {} of {total}: {}",
            i + 1,
            label.name
        )));

        rows.extend(uplink_rows(&label, network_id, devices.devices(network_id)));

        for kind in [NatKind::OneToMany, NatKind::OneToOne] {
            match nat_source.nat_rules(network_id, kind) {
                Ok(rules) => rows.extend(nat_rows(&label, network_id, kind, rules)),
                Err(e) => {
                    log::warn!("{kind} NAT rules for {network_id} unavailable: {e}");
                    console.say(&warning(&format!(
                        "  Failed to retrieve {kind} NAT rules for {}",
                        label.name
                    )));
                }
            }
        }
    }

    log::info!("Built {} report rows", rows.len());
    rows
}

fn uplink_rows<'a>(
    label: &'a NetworkLabel,
    network_id: &'a str,
    devices: &'a [DeviceUplinks],
) -> impl Iterator<Item = ReportRow> + 'a {
    devices.iter().flat_map(move |device| {
        device.uplinks.iter().map(move |uplink| ReportRow {
            serial: device.serial.clone(),
            model: device.model.clone(),
            interface: uplink.interface.clone(),
            public_ip: address_column(&uplink.public_ip),
            private_ip: address_column(&uplink.ip),
            status: uplink.status.clone(),
            ..label.row(network_id, RowType::Uplink)
        })
    })
}

/// `N/A` for a missing field, empty for an explicit `null`.
fn address_column(address: &Option<Option<String>>) -> String {
    match address {
        None => NOT_AVAILABLE.to_string(),
        Some(None) => String::new(),
        Some(Some(ip)) => ip.clone(),
    }
}

fn nat_rows<'a>(
    label: &'a NetworkLabel,
    network_id: &'a str,
    kind: NatKind,
    rules: Vec<NatRule>,
) -> impl Iterator<Item = ReportRow> + 'a {
    rules.into_iter().map(move |rule| ReportRow {
        interface: rule.uplink,
        public_ip: rule.public_ip,
        private_ip: rule.internal_ip,
        rule_name: rule.name,
        ..label.row(network_id, kind.row_type())
    })
}
