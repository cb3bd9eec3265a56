// cargo watch -x 'fmt' -x 'run'

//! Public IP report for a Meraki organization.
//!
//! [`run`] walks the whole flow: resolve an API key, choose an
//! organization, fetch its networks and uplinks, join in the NAT rules of
//! every network, and write `public_ips_report.csv`.

pub mod config;
pub mod error;
pub mod logging;
pub mod meraki;
pub mod models;
pub mod output;
pub mod processing;

use config::Config;
use error::ReportError;
use meraki::{fetch_inventory, CredentialStore, DashboardClient};
use output::{success, Console};
use processing::{build_report, select_organization};
use std::path::PathBuf;

pub use error::{ApiError, CredentialError};

/// Produce the report and return the path it was written to.
pub fn run<S, C>(config: &Config, store: &mut S, console: &mut C) -> Result<PathBuf, ReportError>
where
    S: CredentialStore + ?Sized,
    C: Console + ?Sized,
{
    log::info!("#Start run() base_url={}", config.base_url);
    let started = chrono::Local::now();

    let resolved = meraki::resolve(store, console, |key| {
        DashboardClient::new(&config.base_url, key.clone())?.organizations()
    })?;
    let client = DashboardClient::new(&config.base_url, resolved.api_key)?;

    let organization = select_organization(&resolved.organizations, console)?;

    let inventory = fetch_inventory(&client, &organization.id)?;
    let rows = build_report(&inventory.devices, &inventory.networks, &client, console);

    let path = config.report_path();
    output::write_report(&path, &rows)?;
    console.say("");
    console.say(&success(&format!("Done! CSV exported to: {}", path.display())));

    log::info!(
        "#End run() org={} rows={} took {}s",
        organization.id,
        rows.len(),
        (chrono::Local::now() - started).num_seconds()
    );
    Ok(path)
}
