// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The action catalog: read-only input describing which actions exist and
//! which variables/results they declare. Consumed by the suggestion provider.
//!
//! The catalog arrives as loosely-typed JSON from the host; `validate_catalog`
//! is the boundary where it becomes trustworthy.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub variables: Vec<ActionVariable>,
    #[serde(default)]
    pub results: Vec<ActionResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionVariable {
    pub variable_id: String,
    pub key: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, rename = "actionType", skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_id: Option<String>,
    pub key: String,
    #[serde(default, rename = "actionType", skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    EmptyActionId { index: usize },
    EmptyActionName { action_id: String },
    EmptyVariableKey { action_id: String, index: usize },
    EmptyResultKey { action_id: String, index: usize },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyActionId { index } => {
                write!(f, "action at index {index} has an empty id")
            }
            Self::EmptyActionName { action_id } => {
                write!(f, "action '{action_id}' has an empty name")
            }
            Self::EmptyVariableKey { action_id, index } => {
                write!(f, "action '{action_id}' variable at index {index} has an empty key")
            }
            Self::EmptyResultKey { action_id, index } => {
                write!(f, "action '{action_id}' result at index {index} has an empty key")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

pub fn validate_catalog(actions: &[ActionDescriptor]) -> Result<(), CatalogError> {
    for (action_index, action) in actions.iter().enumerate() {
        if action.id.trim().is_empty() {
            return Err(CatalogError::EmptyActionId { index: action_index });
        }
        if action.name.trim().is_empty() {
            return Err(CatalogError::EmptyActionName { action_id: action.id.clone() });
        }
        for (index, variable) in action.variables.iter().enumerate() {
            if variable.key.trim().is_empty() {
                return Err(CatalogError::EmptyVariableKey {
                    action_id: action.id.clone(),
                    index,
                });
            }
        }
        for (index, result) in action.results.iter().enumerate() {
            if result.key.trim().is_empty() {
                return Err(CatalogError::EmptyResultKey {
                    action_id: action.id.clone(),
                    index,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_catalog, ActionDescriptor, CatalogError};

    #[test]
    fn catalog_parses_with_missing_optional_arrays() {
        let actions: Vec<ActionDescriptor> = serde_json::from_str(
            r#"[
                {"id": "a1", "name": "Lookup"},
                {
                    "id": "a2",
                    "name": "Send Email",
                    "variables": [
                        {"variable_id": "v1", "key": "email", "required": true, "actionType": "send"}
                    ],
                    "results": [{"key": "status"}]
                }
            ]"#,
        )
        .expect("catalog");

        assert_eq!(actions.len(), 2);
        assert!(actions[0].variables.is_empty());
        assert!(actions[0].results.is_empty());
        assert!(actions[1].variables[0].required);
        assert_eq!(actions[1].results[0].variable_id, None);
        validate_catalog(&actions).expect("valid catalog");
    }

    #[test]
    fn validation_rejects_blank_identifiers() {
        let actions: Vec<ActionDescriptor> =
            serde_json::from_str(r#"[{"id": " ", "name": "Lookup"}]"#).expect("catalog");
        assert_eq!(
            validate_catalog(&actions),
            Err(CatalogError::EmptyActionId { index: 0 })
        );
    }
}
