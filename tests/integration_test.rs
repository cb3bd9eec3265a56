//! Integration tests for meraki-public-ips
//!
//! These tests drive the complete flow against a mock Dashboard: key
//! resolution, organization choice, inventory, NAT rules and the CSV file.

use httpmock::prelude::*;
use meraki_public_ips::config::Config;
use meraki_public_ips::error::{ApiError, CredentialError, ReportError};
use meraki_public_ips::meraki::{ApiKey, CredentialStore};
use meraki_public_ips::output::Console;
use meraki_public_ips::run;
use serde_json::json;
use std::collections::VecDeque;
use std::fs;
use std::io;

const ORG_ID: &str = "549236";
const HQ: &str = "L_646829496481105433";
const WELLINGTON: &str = "N_646829496481145678";

#[derive(Default)]
struct ScriptedConsole {
    answers: VecDeque<String>,
    secrets: VecDeque<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    fn new(answers: &[&str], secrets: &[&str]) -> Self {
        ScriptedConsole {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            secrets: secrets.iter().map(|s| s.to_string()).collect(),
            output: Vec::new(),
        }
    }

    fn said(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }
}

impl Console for ScriptedConsole {
    fn say(&mut self, line: &str) {
        self.output.push(line.to_string());
    }

    fn read_line(&mut self, _prompt: &str) -> io::Result<String> {
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more answers"))
    }

    fn read_secret(&mut self, _prompt: &str) -> io::Result<String> {
        self.secrets
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more secrets"))
    }
}

struct MemoryStore(Option<String>);

impl CredentialStore for MemoryStore {
    fn load(&self) -> Option<ApiKey> {
        self.0.clone().map(ApiKey::new)
    }
    fn clear(&mut self) {
        self.0 = None;
    }
}

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/tests/test_data/{name}"))
        .unwrap_or_else(|e| panic!("Error reading fixture {name}: {e}"))
}

/// Mock Dashboard serving the fixture organization. Requests without a
/// mock (the NAT rules of most networks) get httpmock's default 404.
fn mock_dashboard(server: &MockServer) {
    let organizations = fixture("organizations.json");
    let networks = fixture("networks.json");
    let uplinks = fixture("uplink_statuses.json");
    let one_to_many = fixture("one_to_many_nat_rules.json");
    let one_to_one = fixture("one_to_one_nat_rules.json");

    server.mock(|when, then| {
        when.method(GET)
            .path("/organizations")
            .header("Authorization", "Bearer good-key");
        then.status(200).body(organizations.as_str());
    });
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/organizations/{ORG_ID}/networks"));
        then.status(200).body(networks.as_str());
    });
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/organizations/{ORG_ID}/uplinks/statuses"));
        then.status(200).body(uplinks.as_str());
    });
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/networks/{HQ}/appliance/firewall/oneToManyNatRules"));
        then.status(200).body(one_to_many.as_str());
    });
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/networks/{HQ}/appliance/firewall/oneToOneNatRules"));
        then.status(200).body(one_to_one.as_str());
    });
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/networks/{WELLINGTON}/appliance/firewall/oneToOneNatRules"));
        then.status(200).json_body(json!({"rules": []}));
    });
}

fn config_for(server: &MockServer, dir: &tempfile::TempDir) -> Config {
    Config {
        base_url: server.base_url(),
        reports_dir: dir.path().join("reports"),
    }
}

#[test]
fn test_full_report_with_fixtures() {
    let server = MockServer::start();
    mock_dashboard(&server);
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, &dir);
    let mut store = MemoryStore(Some("good-key".to_string()));
    let mut console = ScriptedConsole::new(&["1"], &[]);

    let path = run(&config, &mut store, &mut console).expect("run failed");

    assert_eq!(path, dir.path().join("reports").join("public_ips_report.csv"));
    let csv = fs::read_to_string(&path).expect("Error reading report");
    let lines: Vec<&str> = csv.split_terminator("\r\n").collect();

    assert_eq!(lines.len(), 9, "header + 7 HQ rows + 1 Wellington row:\n{csv}");
    assert_eq!(
        lines[0],
        "Network Name,Network ID,Tags,Dashboard URL,Serial,Model,Interface/Uplink,Type,Public IP,Private IP,Rule Name,Status"
    );
    assert_eq!(
        lines[1],
        "\"HQ, Auckland\",L_646829496481105433,\"hq, production\",https://n149.meraki.com/HQ-Auckland/n/kWaHAbs/manage/usage/list,Q2QN-9J8L-SLPD,MX84,wan1,uplink,203.0.113.10,192.168.1.2,,active"
    );
    assert!(lines[2].contains(",MX84,wan2,uplink,198.51.100.7,10.10.0.2,,ready"));
    assert!(lines[3].contains(",MG21,cellular,uplink,,100.64.12.9,,active"));
    assert!(lines[4].contains(",,,internet1,one-to-many NAT,203.0.113.10,192.168.128.20,Web servers,"));
    assert!(lines[5].contains(",,,internet2,one-to-many NAT,203.0.113.11,,,"));
    assert!(lines[6].contains(",one-to-one NAT,203.0.113.20,192.168.128.22,Service behind NAT,"));
    assert!(lines[7].contains(",one-to-one NAT,203.0.113.21,192.168.128.25,\"Mail, primary\","));
    assert_eq!(
        lines[8],
        "Branch Wellington,N_646829496481145678,No Tags,https://n149.meraki.com/Branch-Wellingt/n/Hs8qAbs/manage/usage/list,Q2FV-ABCD-0001,MX67,wan1,uplink,N/A,N/A,,not connected"
    );

    // Orphan device network and the device-less lab are processed too.
    assert!(console.said("Processing network 1 of 4: HQ, Auckland"));
    assert!(console.said("Processing network 3 of 4: Unknown Network"));
    assert!(console.said("Processing network 4 of 4: Lab \"Switching\""));
    assert!(console.said("Failed to retrieve One-to-Many NAT rules for Branch Wellington"));
    assert!(!console.said("Failed to retrieve One-to-One NAT rules for Branch Wellington"));
    assert!(console.said("Done! CSV exported to:"));
}

#[test]
fn test_report_is_deterministic() {
    let server = MockServer::start();
    mock_dashboard(&server);
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, &dir);

    let first = run(
        &config,
        &mut MemoryStore(Some("good-key".to_string())),
        &mut ScriptedConsole::new(&["1"], &[]),
    )
    .expect("first run failed");
    let first = fs::read(first).unwrap();

    let second = run(
        &config,
        &mut MemoryStore(Some("good-key".to_string())),
        &mut ScriptedConsole::new(&["1"], &[]),
    )
    .expect("second run failed");
    let second = fs::read(second).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_invalid_key_is_replaced_by_prompted_key() {
    let server = MockServer::start();
    let rejected = server.mock(|when, then| {
        when.method(GET)
            .path("/organizations")
            .header("Authorization", "Bearer stale-key");
        then.status(401).json_body(json!({"errors": ["Invalid API key"]}));
    });
    let accepted = server.mock(|when, then| {
        when.method(GET)
            .path("/organizations")
            .header("Authorization", "Bearer fresh-key");
        then.status(200).json_body(json!([{"id": "42", "name": "Solo"}]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/organizations/42/networks");
        then.status(200).json_body(json!([]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/organizations/42/uplinks/statuses");
        then.status(200).json_body(json!([]));
    });
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, &dir);
    let mut store = MemoryStore(Some("stale-key".to_string()));
    let mut console = ScriptedConsole::new(&[], &["fresh-key"]);

    let path = run(&config, &mut store, &mut console).expect("run failed");

    rejected.assert_hits(1);
    accepted.assert_hits(1);
    assert!(store.0.is_none(), "rejected key is cleared");
    assert!(console.said("Invalid API key. Please try again."));
    assert!(console.said("One organization found: Solo (42)"));
    let csv = fs::read_to_string(path).unwrap();
    assert_eq!(csv.lines().count(), 1, "header only");
}

#[test]
fn test_zero_organizations_writes_no_report() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/organizations");
        then.status(200).json_body(json!([]));
    });
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, &dir);

    let err = run(
        &config,
        &mut MemoryStore(Some("k".to_string())),
        &mut ScriptedConsole::new(&[], &[]),
    )
    .unwrap_err();

    assert!(matches!(err, ReportError::NoOrganizations));
    assert!(!config.report_path().exists());
}

#[test]
fn test_server_error_on_validation_is_fatal() {
    let server = MockServer::start();
    let organizations = server.mock(|when, then| {
        when.method(GET).path("/organizations");
        then.status(500).json_body(json!({"errors": ["Internal error"]}));
    });
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, &dir);
    let mut store = MemoryStore(Some("k".to_string()));

    let err = run(&config, &mut store, &mut ScriptedConsole::new(&[], &[])).unwrap_err();

    organizations.assert_hits(1);
    assert!(matches!(
        err,
        ReportError::Credential(CredentialError::Api(ApiError::Status { status: 500, .. }))
    ));
    assert!(store.0.is_some(), "non-auth failure keeps the key");
    assert!(!config.report_path().exists());
}

#[test]
fn test_inventory_failure_is_fatal() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/organizations");
        then.status(200).json_body(json!([{"id": "42", "name": "Solo"}]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/organizations/42/networks");
        then.status(429).json_body(json!({"errors": ["Too many requests"]}));
    });
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, &dir);

    let err = run(
        &config,
        &mut MemoryStore(Some("k".to_string())),
        &mut ScriptedConsole::new(&[], &[]),
    )
    .unwrap_err();

    assert!(matches!(err, ReportError::Api(ApiError::Status { status: 429, .. })));
    assert!(!config.report_path().exists());
}
