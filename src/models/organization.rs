//! Dashboard organization.

use serde::Deserialize;
use std::fmt;

/// An organization visible to the API key.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub name: String,
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
