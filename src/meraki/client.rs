//! Blocking client for the Meraki Dashboard API.
//!
//! Covers the five calls the report needs. Each call is a single GET; no
//! pagination, retries or rate-limit handling.
//!
//! Redirects are followed here rather than by reqwest, which drops the
//! `Authorization` header when the Dashboard sends a request on to a
//! regional host.

use super::ApiKey;
use crate::error::ApiError;
use crate::models::{
    DeviceUplinks, NatKind, NatRule, NatRuleSet, Network, OneToManyNatRule, OneToOneNatRule,
    Organization,
};
use crate::processing::NatRuleSource;
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, ACCEPT, LOCATION};
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

const USER_AGENT: &str = concat!("meraki-public-ips/", env!("CARGO_PKG_VERSION"));

/// Longest error body quoted back to the operator.
const MAX_ERROR_BODY: usize = 200;

const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone)]
pub struct DashboardClient {
    base_url: String,
    http: Client,
    api_key: ApiKey,
}

/// Dashboard error body: `{"errors": ["..."]}`.
#[derive(Deserialize)]
struct ErrorBody {
    errors: Vec<String>,
}

impl DashboardClient {
    pub fn new(base_url: &str, api_key: ApiKey) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(Policy::none())
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            api_key,
        })
    }

    /// `GET /organizations`
    pub fn organizations(&self) -> Result<Vec<Organization>, ApiError> {
        self.get("/organizations")
    }

    /// `GET /organizations/{orgId}/networks`
    pub fn networks(&self, org_id: &str) -> Result<Vec<Network>, ApiError> {
        self.get(&format!("/organizations/{org_id}/networks"))
    }

    /// `GET /organizations/{orgId}/uplinks/statuses`
    pub fn uplink_statuses(&self, org_id: &str) -> Result<Vec<DeviceUplinks>, ApiError> {
        self.get(&format!("/organizations/{org_id}/uplinks/statuses"))
    }

    /// `GET /networks/{networkId}/appliance/firewall/oneToManyNatRules`
    pub fn one_to_many_nat_rules(&self, network_id: &str) -> Result<Vec<NatRule>, ApiError> {
        let set: NatRuleSet<OneToManyNatRule> =
            self.get(&nat_path(network_id, NatKind::OneToMany))?;
        Ok(set.rules.into_iter().map(NatRule::from).collect())
    }

    /// `GET /networks/{networkId}/appliance/firewall/oneToOneNatRules`
    pub fn one_to_one_nat_rules(&self, network_id: &str) -> Result<Vec<NatRule>, ApiError> {
        let set: NatRuleSet<OneToOneNatRule> =
            self.get(&nat_path(network_id, NatKind::OneToOne))?;
        Ok(set.rules.into_iter().map(NatRule::from).collect())
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let mut url = format!("{}{}", self.base_url, path);
        log::debug!("GET {path}");

        let mut redirects = 0;
        let response = loop {
            let response = self
                .http
                .get(&url)
                .bearer_auth(self.api_key.expose())
                .header(ACCEPT, HeaderValue::from_static("application/json"))
                .send()?;

            let status = response.status();
            if !status.is_redirection() {
                break response;
            }
            let next = response
                .headers()
                .get(LOCATION)
                .and_then(|location| location.to_str().ok())
                .and_then(|location| response.url().join(location).ok());
            match next {
                Some(next) if redirects < MAX_REDIRECTS => {
                    redirects += 1;
                    log::debug!("GET {path} -> {status}, following to {next}");
                    url = next.to_string();
                }
                _ => {
                    return Err(ApiError::Status {
                        status: status.as_u16(),
                        path: path.to_string(),
                        message: format!("redirect not followed after {redirects} hops"),
                    })
                }
            }
        };

        let status = response.status();
        let body = response.text()?;
        log::debug!("GET {path} -> {status} ({} bytes)", body.len());

        match status {
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized {
                path: path.to_string(),
            }),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound {
                path: path.to_string(),
            }),
            s if !s.is_success() => Err(ApiError::Status {
                status: s.as_u16(),
                path: path.to_string(),
                message: error_message(&body),
            }),
            _ => decode(path, &body),
        }
    }
}

impl NatRuleSource for DashboardClient {
    fn nat_rules(&self, network_id: &str, kind: NatKind) -> Result<Vec<NatRule>, ApiError> {
        match kind {
            NatKind::OneToMany => self.one_to_many_nat_rules(network_id),
            NatKind::OneToOne => self.one_to_one_nat_rules(network_id),
        }
    }
}

fn nat_path(network_id: &str, kind: NatKind) -> String {
    format!(
        "/networks/{network_id}/appliance/firewall/{}",
        kind.endpoint()
    )
}

/// Decode a JSON body, reporting the path of the first mismatching field.
fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, ApiError> {
    let mut deserializer = serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::error!("Error decoding {path} at {}", e.path());
        log::trace!("BODY START:\n\n{body}\n\nBODY END\n");
        ApiError::Decode {
            path: path.to_string(),
            at: e.path().to_string(),
            source: e.into_inner(),
        }
    })
}

/// Message for a failed call: the Dashboard's `errors` list, else the raw body cut short.
fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if !parsed.errors.is_empty() {
            return parsed.errors.join("; ");
        }
    }
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
