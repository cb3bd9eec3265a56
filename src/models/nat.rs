//! NAT rules configured on a network's security appliance.

use super::RowType;
use serde::Deserialize;
use std::fmt;

/// The two NAT rule collections fetched per network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NatKind {
    OneToMany,
    OneToOne,
}

impl NatKind {
    /// Last path segment of the firewall endpoint.
    pub fn endpoint(self) -> &'static str {
        match self {
            NatKind::OneToMany => "oneToManyNatRules",
            NatKind::OneToOne => "oneToOneNatRules",
        }
    }

    pub fn row_type(self) -> RowType {
        match self {
            NatKind::OneToMany => RowType::OneToManyNat,
            NatKind::OneToOne => RowType::OneToOneNat,
        }
    }
}

impl fmt::Display for NatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NatKind::OneToMany => write!(f, "One-to-Many"),
            NatKind::OneToOne => write!(f, "One-to-One"),
        }
    }
}

/// Body of both NAT endpoints: `{"rules": [...]}`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(bound(deserialize = "R: Deserialize<'de>"))]
pub struct NatRuleSet<R> {
    #[serde(default = "Vec::new", deserialize_with = "super::null_as_default")]
    pub rules: Vec<R>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OneToManyNatRule {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub uplink: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub public_ip: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub local_ip: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub name: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OneToOneNatRule {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub uplink: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub public_ip: String,
    /// Current firmware reports this as `lanIp`.
    #[serde(default, alias = "lanIp", deserialize_with = "super::null_as_default")]
    pub private_ip: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub name: String,
}

/// Either kind of NAT rule, reduced to the columns of the report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NatRule {
    pub uplink: String,
    pub public_ip: String,
    pub internal_ip: String,
    pub name: String,
}

impl From<OneToManyNatRule> for NatRule {
    fn from(rule: OneToManyNatRule) -> Self {
        NatRule {
            uplink: rule.uplink,
            public_ip: rule.public_ip,
            internal_ip: rule.local_ip,
            name: rule.name,
        }
    }
}

impl From<OneToOneNatRule> for NatRule {
    fn from(rule: OneToOneNatRule) -> Self {
        NatRule {
            uplink: rule.uplink,
            public_ip: rule.public_ip,
            internal_ip: rule.private_ip,
            name: rule.name,
        }
    }
}
