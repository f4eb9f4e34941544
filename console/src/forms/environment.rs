//! Create/edit environment forms
//!
//! Validation runs entirely before any remote call; remote failures are
//! mapped onto user-facing flash messages afterwards.

use serde::{Deserialize, Serialize};

use crate::errors::ConsoleError;
use crate::models::environment::{EnvironmentCreate, JoinExistingNetwork};
use crate::models::network::{Network, NetworkChoice};

/// Maximum environment name length accepted by the form
pub const NAME_MAX_LEN: usize = 255;

/// Validation help text, also used as the invalid-name error message
pub const NAME_HELP_TEXT: &str = "Environment names must contain only \
     alphanumeric or '_-.' characters and must start with alpha";

/// Message shown when the remote service reports a name conflict
pub const ALREADY_EXISTS_MSG: &str = "Environment with specified name already exists";

/// Generic message for create failures
pub const CREATE_FAILED_MSG: &str = "Failed to create environment";

/// Help text for the network choice when the network service is reachable
pub const NETWORK_HELP: &str =
    "Choose an existing network for the environment, or have a new one created";

/// Help text shown when the network service is unavailable
pub const NETWORK_UNAVAILABLE_HELP: &str =
    "The network service is unavailable; the environment will use the default network";

/// Submitted create form fields
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEnvironmentForm {
    /// Desired environment name
    pub name: String,

    /// Network choice as a JSON pair literal, e.g. `["net-1","private"]`
    /// or `[null,null]`
    pub net_config: String,
}

/// Submitted edit form fields
#[derive(Debug, Clone, Deserialize)]
pub struct EditEnvironmentForm {
    /// New environment name
    pub name: String,
}

/// Create-form context served to the console frontend
#[derive(Debug, Clone, Serialize)]
pub struct CreateFormContext {
    pub net_choices: Vec<NetworkChoice>,
    pub net_help_text: &'static str,
    pub name_help_text: &'static str,
}

/// Validate an environment name: starts with an ASCII letter, then
/// alphanumeric or `_-.` only
pub fn validate_name(name: &str) -> Result<(), ConsoleError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => chars
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.'),
        _ => false,
    };

    if !valid || name.len() > NAME_MAX_LEN {
        return Err(ConsoleError::ValidationError(NAME_HELP_TEXT.to_string()));
    }
    Ok(())
}

/// Parse the submitted network choice literal. A null first element means
/// no explicit network join is requested.
pub fn parse_net_choice(literal: &str) -> Result<Option<String>, ConsoleError> {
    let (id, _label): (Option<String>, Option<String>) = serde_json::from_str(literal)
        .map_err(|_| {
            ConsoleError::ValidationError(format!("Invalid network choice: {}", literal))
        })?;
    Ok(id)
}

impl CreateEnvironmentForm {
    /// Validate the form and assemble the remote creation payload
    pub fn into_payload(self) -> Result<EnvironmentCreate, ConsoleError> {
        validate_name(&self.name)?;
        let network_id = parse_net_choice(&self.net_config)?;

        Ok(EnvironmentCreate {
            name: self.name,
            default_network: network_id.map(|network_id| JoinExistingNetwork { network_id }),
        })
    }
}

impl EditEnvironmentForm {
    /// Validate the form, yielding the new name
    pub fn into_name(self) -> Result<String, ConsoleError> {
        validate_name(&self.name)?;
        Ok(self.name)
    }
}

/// Build the network dropdown choices from the remote listing. A missing
/// network service yields a single "Unavailable" sentinel.
pub fn build_network_choices(networks: Option<Vec<Network>>) -> CreateFormContext {
    match networks {
        None => CreateFormContext {
            net_choices: vec![NetworkChoice::sentinel("Unavailable")],
            net_help_text: NETWORK_UNAVAILABLE_HELP,
            name_help_text: NAME_HELP_TEXT,
        },
        Some(networks) => {
            let mut choices = vec![NetworkChoice::sentinel("Create New")];
            choices.extend(
                networks
                    .iter()
                    .map(|net| NetworkChoice::existing(&net.id, &net.name)),
            );
            CreateFormContext {
                net_choices: choices,
                net_help_text: NETWORK_HELP,
                name_help_text: NAME_HELP_TEXT,
            }
        }
    }
}

/// Map a create failure onto its user-facing message. Conflicts are
/// user-correctable and get the specific message; everything else the
/// generic one.
pub fn create_failure_message(err: &ConsoleError) -> String {
    if err.is_conflict() {
        ALREADY_EXISTS_MSG.to_string()
    } else {
        CREATE_FAILED_MSG.to_string()
    }
}

/// Map an edit failure onto its user-facing message
pub fn edit_failure_message(err: &ConsoleError, name: &str) -> String {
    if err.is_conflict() {
        ALREADY_EXISTS_MSG.to_string()
    } else {
        format!("Unable to edit environment {}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_validation() {
        assert!(validate_name("prod").is_ok());
        assert!(validate_name("a1_b-c.d").is_ok());

        // Must start with a letter
        assert!(validate_name("1prod").is_err());
        assert!(validate_name("_prod").is_err());
        assert!(validate_name("").is_err());

        // Disallowed characters
        assert!(validate_name("my env").is_err());
        assert!(validate_name("env!").is_err());

        assert!(validate_name(&format!("a{}", "b".repeat(NAME_MAX_LEN))).is_err());
    }

    #[test]
    fn test_net_choice_parsing() {
        assert_eq!(parse_net_choice("[null, null]").unwrap(), None);
        assert_eq!(
            parse_net_choice(r#"["net-0481", "private"]"#).unwrap(),
            Some("net-0481".to_string())
        );

        assert!(parse_net_choice("not json").is_err());
        assert!(parse_net_choice(r#"["only-one"]"#).is_err());
        assert!(parse_net_choice(r#"["a", "b", "c"]"#).is_err());
    }

    #[test]
    fn test_create_payload_includes_network_join() {
        let form = CreateEnvironmentForm {
            name: "prod".to_string(),
            net_config: r#"["net-1", "private"]"#.to_string(),
        };
        let payload = form.into_payload().unwrap();
        assert_eq!(payload.default_network.unwrap().network_id, "net-1");

        let form = CreateEnvironmentForm {
            name: "prod".to_string(),
            net_config: "[null, null]".to_string(),
        };
        assert!(form.into_payload().unwrap().default_network.is_none());
    }

    #[test]
    fn test_failure_messages() {
        let conflict = ConsoleError::Conflict("name taken".to_string());
        assert_eq!(create_failure_message(&conflict), ALREADY_EXISTS_MSG);

        let other = ConsoleError::RemoteError {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(create_failure_message(&other), CREATE_FAILED_MSG);
        assert_eq!(
            edit_failure_message(&other, "prod"),
            "Unable to edit environment prod"
        );
    }

    #[test]
    fn test_network_choices() {
        let ctx = build_network_choices(None);
        assert_eq!(ctx.net_choices.len(), 1);
        assert_eq!(ctx.net_choices[0].display, "Unavailable");

        let ctx = build_network_choices(Some(vec![Network {
            id: "net-1".to_string(),
            name: "private".to_string(),
        }]));
        assert_eq!(ctx.net_choices.len(), 2);
        assert_eq!(ctx.net_choices[0].display, "Create New");
        assert_eq!(ctx.net_choices[1].id.as_deref(), Some("net-1"));
    }
}
