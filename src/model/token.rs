// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::grammar::ReferenceKind;
use super::ids::{ActionId, IdError, MentionId};

/// One embedded, typed reference inside instruction text.
///
/// A token is atomic: it is inserted, rendered, and deleted as one unit.
/// `id` is the durable identity used for persistence and stays stable across
/// renames; `label` is the human-visible name and may be rewritten freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    id: MentionId,
    label: String,
    kind: ReferenceKind,
    action_id: Option<ActionId>,
    action_type: Option<String>,
    action_name: Option<String>,
    replace_result_char: bool,
}

impl Token {
    pub fn new(id: MentionId, label: impl Into<String>, kind: ReferenceKind) -> Self {
        Self {
            id,
            label: label.into(),
            kind,
            action_id: None,
            action_type: None,
            action_name: None,
            replace_result_char: false,
        }
    }

    pub fn new_with(
        id: MentionId,
        label: impl Into<String>,
        kind: ReferenceKind,
        action_id: Option<ActionId>,
        action_type: Option<String>,
        action_name: Option<String>,
        replace_result_char: bool,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            kind,
            action_id,
            action_type,
            action_name,
            replace_result_char,
        }
    }

    pub fn id(&self) -> &MentionId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    pub fn action_id(&self) -> Option<&ActionId> {
        self.action_id.as_ref()
    }

    pub fn action_type(&self) -> Option<&str> {
        self.action_type.as_deref()
    }

    pub fn action_name(&self) -> Option<&str> {
        self.action_name.as_deref()
    }

    pub fn replace_result_char(&self) -> bool {
        self.replace_result_char
    }

    /// The bit-exact textual encoding: `{label}`, `#label`, `<label>`, or
    /// `{label}` for a result with `replace_result_char` set.
    pub fn render(&self) -> String {
        let closing = self.kind.closing_char(self.replace_result_char);
        let mut out = String::with_capacity(self.label.len().saturating_add(2));
        out.push(self.kind.trigger_char());
        out.push_str(&self.label);
        if let Some(ch) = closing {
            out.push(ch);
        }
        out
    }

    /// The label shown on the rendered chip. Variable/result tokens are
    /// prefixed with the owning action's name (whitespace replaced by `_`)
    /// when it is known; action tokens never carry the prefix.
    pub fn display_label(&self) -> String {
        match (self.kind, self.action_name.as_deref()) {
            (ReferenceKind::Variable | ReferenceKind::Result, Some(action_name)) => {
                let mut prefixed = String::with_capacity(
                    action_name.len().saturating_add(self.label.len()).saturating_add(1),
                );
                for ch in action_name.chars() {
                    prefixed.push(if ch.is_whitespace() { '_' } else { ch });
                }
                prefixed.push('_');
                prefixed.push_str(&self.label);
                prefixed
            }
            _ => self.label.clone(),
        }
    }

    pub fn to_attrs(&self) -> TokenAttrs {
        TokenAttrs {
            id: self.id.as_str().to_owned(),
            label: self.label.clone(),
            class: self.kind.color_class().to_owned(),
            replace_result_char: self.replace_result_char,
            action_id: self.action_id.as_ref().map(|id| id.as_str().to_owned()),
            action_type: self.action_type.clone(),
            action_name: self.action_name.clone(),
        }
    }

    pub fn from_attrs(attrs: &TokenAttrs) -> Result<Self, IdError> {
        let action_id = match &attrs.action_id {
            Some(raw) => Some(ActionId::new(raw.clone())?),
            None => None,
        };
        Ok(Self {
            id: MentionId::new(attrs.id.clone())?,
            label: attrs.label.clone(),
            // Kind is derived from the class marker, never stored twice.
            kind: ReferenceKind::from_class(&attrs.class),
            action_id,
            action_type: attrs.action_type.clone(),
            action_name: attrs.action_name.clone(),
            replace_result_char: attrs.replace_result_char,
        })
    }
}

/// Serialized attribute form of a mention, as persisted inside the document
/// tree. Field names match the wire format of the host editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAttrs {
    pub id: String,
    pub label: String,
    pub class: String,
    #[serde(default, rename = "replaceResultChar")]
    pub replace_result_char: bool,
    #[serde(default, rename = "actionId", skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
    #[serde(default, rename = "actionType", skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    #[serde(default, rename = "actionName", skip_serializing_if = "Option::is_none")]
    pub action_name: Option<String>,
}

/// Parses one textual reference back into `(kind, label)`.
///
/// A result encoded with `replace_result_char` renders as `{label}` and
/// therefore parses as a variable; downstream consumers that only understand
/// variable syntax rely on exactly that.
pub fn parse_reference(text: &str) -> Option<(ReferenceKind, &str)> {
    let mut chars = text.chars();
    let trigger = chars.next()?;
    let kind = ReferenceKind::from_trigger(trigger)?;
    let rest = chars.as_str();
    match kind.closing_char(false) {
        None => Some((kind, rest)),
        Some(closing) => {
            let label = rest.strip_suffix(closing).or_else(|| {
                // Flagged results close like variables.
                (kind == ReferenceKind::Result).then(|| rest.strip_suffix('}')).flatten()
            })?;
            Some((kind, label))
        }
    }
}
