//! Dashboard network and the id lookup built from the network list.

use serde::Deserialize;
use std::collections::HashMap;

/// A network as returned by `GET /organizations/{orgId}/networks`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Network {
    pub id: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub tags: Vec<String>,
    /// Dashboard URL of the network.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub url: String,
}

/// Networks indexed by id, remembering the order the API listed them in.
#[derive(Debug, Default, Clone)]
pub struct NetworkLookup {
    order: Vec<String>,
    by_id: HashMap<String, Network>,
}

impl NetworkLookup {
    pub fn new() -> NetworkLookup {
        NetworkLookup::default()
    }

    /// Add a network. A repeated id replaces the earlier entry but keeps its position.
    pub fn insert(&mut self, network: Network) {
        if !self.by_id.contains_key(&network.id) {
            self.order.push(network.id.clone());
        }
        self.by_id.insert(network.id.clone(), network);
    }

    pub fn get(&self, network_id: &str) -> Option<&Network> {
        self.by_id.get(network_id)
    }

    pub fn contains(&self, network_id: &str) -> bool {
        self.by_id.contains_key(network_id)
    }

    /// Network ids in list order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl FromIterator<Network> for NetworkLookup {
    fn from_iter<I: IntoIterator<Item = Network>>(iter: I) -> Self {
        let mut lookup = NetworkLookup::new();
        for network in iter {
            lookup.insert(network);
        }
        lookup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(id: &str, name: &str) -> Network {
        Network {
            id: id.to_string(),
            name: name.to_string(),
            tags: vec![],
            url: String::new(),
        }
    }

    #[test]
    fn test_decode_networks_fixture() {
        let json = std::fs::read_to_string("src/tests/test_data/networks.json")
            .expect("Error reading networks fixture");
        let networks: Vec<Network> = serde_json::from_str(&json).expect("Error decoding");
        assert_eq!(networks.len(), 3);
        assert_eq!(networks[0].name, "HQ, Auckland");
        assert_eq!(networks[0].tags, vec!["hq", "production"]);
        assert!(networks[1].tags.is_empty());
        // `"tags": null` decodes as no tags
        assert!(networks[2].tags.is_empty());
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let decoded: Network = serde_json::from_str(r#"{"id": "N_1"}"#).expect("Error decoding");
        assert_eq!(decoded, network("N_1", ""));
    }

    #[test]
    fn test_lookup_keeps_first_position_last_value() {
        let lookup: NetworkLookup = vec![
            network("N_1", "first"),
            network("N_2", "second"),
            network("N_1", "renamed"),
        ]
        .into_iter()
        .collect();

        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.ids().collect::<Vec<_>>(), vec!["N_1", "N_2"]);
        assert_eq!(lookup.get("N_1").map(|n| n.name.as_str()), Some("renamed"));
        assert!(lookup.contains("N_2"));
        assert!(lookup.get("N_3").is_none());
    }
}
