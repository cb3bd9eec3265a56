//! Domain models for the public IP report.
//!
//! This module contains the data structures used throughout the application:
//! - [`Organization`] - Dashboard organization
//! - [`Network`] and [`NetworkLookup`] - Networks keyed by id
//! - [`DeviceUplinks`] and [`DevicesByNetwork`] - Uplink statuses grouped by network
//! - [`NatRule`] and [`NatKind`] - One-to-many and one-to-one NAT rules
//! - [`ReportRow`] and [`RowType`] - Flattened CSV rows

mod device;
mod nat;
mod network;
mod organization;
mod report_row;

use serde::{Deserialize, Deserializer};

// Re-export public types
pub use device::{DeviceUplinks, DevicesByNetwork, Uplink};
pub use nat::{NatKind, NatRule, NatRuleSet, OneToManyNatRule, OneToOneNatRule};
pub use network::{Network, NetworkLookup};
pub use organization::Organization;
pub use report_row::{ReportRow, RowType, CSV_HEADER};

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Mark a field as present, so `Option<Option<T>>` tells a missing field
/// (`None`) from an explicit `null` (`Some(None)`). Pair with `#[serde(default)]`.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
