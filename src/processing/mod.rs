//! Report processing logic.
//!
//! This module contains the business logic between the API and the output:
//! - [`organization`] - Choosing the organization to report on
//! - [`report`] - Joining networks, uplinks and NAT rules into rows

mod organization;
mod report;

// Re-export public functions
pub use organization::{parse_selection, select_organization, SelectionError};
pub use report::{
    build_report, processing_order, NatRuleSource, NetworkLabel, NOT_AVAILABLE, NO_TAGS,
    UNKNOWN_NETWORK,
};
