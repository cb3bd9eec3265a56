//! Meraki Dashboard API interaction.
//!
//! This module handles all Dashboard-related operations:
//! - [`client`] - Blocking HTTP client for the API calls
//! - [`credential`] - API key resolution and validation
//! - [`inventory`] - Organization-wide networks and uplink statuses

mod client;
mod credential;
mod inventory;

// Re-export public types and functions
pub use client::DashboardClient;
pub use credential::{
    resolve, ApiKey, CredentialState, CredentialStore, EnvCredentialStore, Input,
    ResolvedCredential,
};
pub use inventory::{fetch_inventory, Inventory};
