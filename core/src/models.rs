//! Agent API types
//!
//! Structs that mirror the agent API JSON format (camelCase on the wire).
//! Records are immutable once fetched.

use serde::{Deserialize, Serialize};

/// Role name shown when an agent has no role
pub const UNKNOWN_ROLE: &str = "Unknown";

/// Envelope wrapping every API payload: `{ "data": ... }`
#[derive(Deserialize, Debug)]
pub struct ApiResponse<T> {
    /// The payload; `null` for a missing record
    pub data: Option<T>,
}

/// A playable character record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Opaque identifier (a UUID on the public API)
    #[serde(rename = "uuid")]
    pub id: String,
    /// Display name
    pub display_name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Internal developer codename
    #[serde(default)]
    pub developer_name: Option<String>,
    /// Icon URI
    pub display_icon: String,
    /// Bust portrait URI
    #[serde(default)]
    pub bust_portrait: Option<String>,
    /// Full-body portrait URI
    #[serde(default)]
    pub full_portrait: Option<String>,
    /// Role; the API sends `null` for some records
    #[serde(default)]
    pub role: Option<Role>,
    /// Abilities in API order
    #[serde(default)]
    pub abilities: Vec<Ability>,
}

impl Agent {
    /// Role display name, or [`UNKNOWN_ROLE`] when the agent has none
    pub fn role_name(&self) -> &str {
        self.role
            .as_ref()
            .map(|role| role.display_name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_ROLE)
    }
}

/// An agent's role (e.g. "Duelist")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Role identifier
    #[serde(rename = "uuid", default)]
    pub id: String,
    /// Display name
    pub display_name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Icon URI
    #[serde(default)]
    pub display_icon: Option<String>,
}

/// One of an agent's skills
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    /// Slot label (e.g. "Ability1", "Ultimate", "Passive")
    pub slot: String,
    /// Display name
    pub display_name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Icon URI; passives have none
    #[serde(default)]
    pub display_icon: Option<String>,
}

/// A device position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Degrees north
    pub latitude: f64,
    /// Degrees east
    pub longitude: f64,
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Latitude: {}, Longitude: {}",
            self.latitude, self.longitude
        )
    }
}
