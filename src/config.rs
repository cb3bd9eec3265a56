//! Runtime configuration.
//!
//! Constants for the environment variables and file names the tool uses,
//! plus [`Config`], which is built once from the environment after `.env`
//! has been loaded.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable holding the Dashboard API key.
pub const API_KEY_ENV: &str = "MERAKI_DASHBOARD_API_KEY";
/// Environment variable overriding the Dashboard API base URL.
pub const BASE_URL_ENV: &str = "MERAKI_DASHBOARD_BASE_URL";
/// Environment variable overriding the directory the report is written to.
pub const REPORTS_DIR_ENV: &str = "MERAKI_REPORTS_DIR";

pub const DEFAULT_BASE_URL: &str = "https://api.meraki.com/api/v1";
pub const REPORTS_DIR_NAME: &str = "reports";
pub const REPORT_FILE_NAME: &str = "public_ips_report.csv";

/// log4rs config read from the working directory.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";
/// Log file used when [`LOG_CONFIG_FILE`] is absent.
pub const DEFAULT_LOG_FILE: &str = "log/meraki-public-ips.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Dashboard API base URL, without a trailing slash.
    pub base_url: String,
    /// Directory that receives [`REPORT_FILE_NAME`].
    pub reports_dir: PathBuf,
}

impl Config {
    /// Build the config from the process environment.
    ///
    /// The reports directory defaults to `reports/` next to the executable.
    pub fn from_env() -> io::Result<Config> {
        let app_root = app_root_dir()?;
        Ok(Config::from_lookup(|name| env::var(name).ok(), &app_root))
    }

    /// Build the config from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F, app_root: &Path) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = lookup(BASE_URL_ENV)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();

        let reports_dir = lookup(REPORTS_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| app_root.join(REPORTS_DIR_NAME));

        Config {
            base_url,
            reports_dir,
        }
    }

    /// Full path of the CSV report.
    pub fn report_path(&self) -> PathBuf {
        self.reports_dir.join(REPORT_FILE_NAME)
    }
}

/// Directory the running executable lives in.
pub fn app_root_dir() -> io::Result<PathBuf> {
    let exe = env::current_exe()?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
