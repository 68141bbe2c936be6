// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The suggestion provider: turns an action catalog into filterable,
//! groupable candidate lists for one reference kind.
//!
//! Suggestion items are derived and ephemeral; they are never persisted.
//! `display_label` may carry a trailing `*` required-marker that `label` and
//! `insert_text` never carry; the marker is visual only.

use smol_str::SmolStr;

use crate::model::catalog::ActionDescriptor;
use crate::model::grammar::ReferenceKind;

const REQUIRED_MARKER: char = '*';
const FALLBACK_GROUP: &str = "Other";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionItem {
    id: String,
    label: SmolStr,
    display_label: SmolStr,
    kind: ReferenceKind,
    action_id: Option<String>,
    action_name: Option<SmolStr>,
    value: SmolStr,
    insert_text: String,
}

impl SuggestionItem {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    pub fn action_id(&self) -> Option<&str> {
        self.action_id.as_deref()
    }

    pub fn action_name(&self) -> Option<&str> {
        self.action_name.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn insert_text(&self) -> &str {
        &self.insert_text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionList {
    kind: ReferenceKind,
    items: Vec<SuggestionItem>,
}

impl SuggestionList {
    pub fn from_catalog(
        actions: &[ActionDescriptor],
        kind: ReferenceKind,
        replace_result_char: bool,
    ) -> Self {
        let mut items = Vec::new();
        for action in actions {
            match kind {
                ReferenceKind::Variable => {
                    for variable in &action.variables {
                        items.push(build_item(
                            kind,
                            &variable.key,
                            non_empty(&variable.variable_id),
                            action,
                            variable.action_type.as_deref(),
                            variable.required,
                            replace_result_char,
                        ));
                    }
                }
                ReferenceKind::Result => {
                    for result in &action.results {
                        items.push(build_item(
                            kind,
                            &result.key,
                            result.variable_id.as_deref().and_then(non_empty),
                            action,
                            result.action_type.as_deref(),
                            false,
                            replace_result_char,
                        ));
                    }
                }
                ReferenceKind::Action => {
                    items.push(build_item(
                        kind,
                        &action.name,
                        non_empty(&action.id),
                        action,
                        None,
                        false,
                        replace_result_char,
                    ));
                }
            }
        }
        Self { kind, items }
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    pub fn items(&self) -> &[SuggestionItem] {
        &self.items
    }

    /// Case-insensitive substring match against `label` and `action_name`.
    pub fn filter(&self, query: &str) -> Vec<&SuggestionItem> {
        if query.is_empty() {
            return self.items.iter().collect();
        }
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                item.label.to_lowercase().contains(&needle)
                    || item
                        .action_name
                        .as_deref()
                        .is_some_and(|name| name.to_lowercase().contains(&needle))
            })
            .collect()
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.trim().is_empty()).then_some(value)
}

fn build_item(
    kind: ReferenceKind,
    label: &str,
    durable_id: Option<&str>,
    action: &ActionDescriptor,
    action_type: Option<&str>,
    required: bool,
    replace_result_char: bool,
) -> SuggestionItem {
    let action_name = match kind {
        // Action candidates are not grouped under themselves.
        ReferenceKind::Action => None,
        _ => Some(SmolStr::new(&action.name)),
    };

    let display_label = if required {
        let mut marked = String::with_capacity(label.len().saturating_add(1));
        marked.push_str(label);
        marked.push(REQUIRED_MARKER);
        SmolStr::new(marked)
    } else {
        SmolStr::new(label)
    };

    // Insert text is built from the unmarked label; the marker never leaks.
    let mut insert_text = String::with_capacity(label.len().saturating_add(2));
    insert_text.push(kind.trigger_char());
    insert_text.push_str(label);
    if let Some(closing) = kind.closing_char(replace_result_char) {
        insert_text.push(closing);
    }

    let id = match durable_id {
        Some(durable) => durable.to_owned(),
        // Deterministic composite so two structurally-identical suggestions
        // never collide.
        None => format!(
            "{}:{}:{}:{}",
            kind.as_str(),
            label,
            action.id,
            action_type.unwrap_or_default()
        ),
    };

    SuggestionItem {
        id,
        label: SmolStr::new(label),
        display_label,
        kind,
        action_id: Some(action.id.clone()),
        action_name,
        value: SmolStr::new(label),
        insert_text,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionGroup<'a> {
    name: SmolStr,
    items: Vec<&'a SuggestionItem>,
}

impl<'a> SuggestionGroup<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[&'a SuggestionItem] {
        &self.items
    }
}

/// Grouped rendering form of a candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupedSuggestions<'a> {
    /// A single group (or an all-"Other" result) renders without headers.
    Flat(Vec<&'a SuggestionItem>),
    Grouped(Vec<SuggestionGroup<'a>>),
}

/// Groups candidates by owning action name, falling back to a literal
/// `"Other"` group. Headers are rendered only when more than one non-"Other"
/// group exists.
pub fn group_suggestions<'a>(items: &[&'a SuggestionItem]) -> GroupedSuggestions<'a> {
    let mut groups: Vec<SuggestionGroup<'a>> = Vec::new();
    for item in items {
        let name = item
            .action_name()
            .map(SmolStr::new)
            .unwrap_or_else(|| SmolStr::new(FALLBACK_GROUP));
        match groups.iter_mut().find(|group| group.name == name) {
            Some(group) => group.items.push(item),
            None => groups.push(SuggestionGroup { name, items: vec![item] }),
        }
    }

    let named_groups = groups
        .iter()
        .filter(|group| group.name != FALLBACK_GROUP)
        .count();
    if named_groups > 1 {
        GroupedSuggestions::Grouped(groups)
    } else {
        GroupedSuggestions::Flat(items.to_vec())
    }
}

#[cfg(test)]
mod tests;
