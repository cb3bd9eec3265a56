//! One flattened line of the public IP report.

use std::fmt;

/// Column names, in output order.
pub const CSV_HEADER: [&str; 12] = [
    "Network Name",
    "Network ID",
    "Tags",
    "Dashboard URL",
    "Serial",
    "Model",
    "Interface/Uplink",
    "Type",
    "Public IP",
    "Private IP",
    "Rule Name",
    "Status",
];

/// Where a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowType {
    Uplink,
    OneToManyNat,
    OneToOneNat,
}

impl RowType {
    pub fn as_str(self) -> &'static str {
        match self {
            RowType::Uplink => "uplink",
            RowType::OneToManyNat => "one-to-many NAT",
            RowType::OneToOneNat => "one-to-one NAT",
        }
    }
}

impl fmt::Display for RowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub network_name: String,
    pub network_id: String,
    /// Tags joined by `", "`, or `No Tags`.
    pub tags: String,
    pub dashboard_url: String,
    pub serial: String,
    pub model: String,
    pub interface: String,
    pub row_type: RowType,
    pub public_ip: String,
    pub private_ip: String,
    pub rule_name: String,
    pub status: String,
}

impl ReportRow {
    /// Field values in [`CSV_HEADER`] order.
    pub fn fields(&self) -> [&str; 12] {
        [
            &self.network_name,
            &self.network_id,
            &self.tags,
            &self.dashboard_url,
            &self.serial,
            &self.model,
            &self.interface,
            self.row_type.as_str(),
            &self.public_ip,
            &self.private_ip,
            &self.rule_name,
            &self.status,
        ]
    }
}
