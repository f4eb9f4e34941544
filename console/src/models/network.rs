//! Network choice models for the environment create form

use serde::{Deserialize, Serialize};

/// A network the user can join a new environment to.
///
/// The sentinel choice with a null id stands for "create new" when the
/// network service is reachable and "unavailable" when it is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkChoice {
    /// Network ID, null for the sentinel choice
    pub id: Option<String>,

    /// Human-readable label, null for the sentinel choice value
    pub label: Option<String>,

    /// Label shown in the form dropdown
    pub display: String,
}

impl NetworkChoice {
    pub fn sentinel(display: &str) -> Self {
        Self {
            id: None,
            label: None,
            display: display.to_string(),
        }
    }

    pub fn existing(id: &str, label: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            label: Some(label.to_string()),
            display: label.to_string(),
        }
    }
}

/// A network record as listed by the remote network service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    /// Network ID
    pub id: String,

    /// Network name
    pub name: String,
}
