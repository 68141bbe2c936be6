// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::{group_suggestions, GroupedSuggestions, SuggestionList};
use crate::model::catalog::{ActionDescriptor, ActionResult, ActionVariable};
use crate::model::grammar::ReferenceKind;

fn variable(variable_id: &str, key: &str, required: bool) -> ActionVariable {
    ActionVariable {
        variable_id: variable_id.to_owned(),
        key: key.to_owned(),
        required,
        action_type: None,
    }
}

#[fixture]
fn catalog() -> Vec<ActionDescriptor> {
    vec![
        ActionDescriptor {
            id: "a1".to_owned(),
            name: "Lookup".to_owned(),
            variables: vec![
                variable("v1", "email", true),
                variable("v2", "name", false),
            ],
            results: vec![ActionResult {
                variable_id: None,
                key: "record".to_owned(),
                action_type: Some("lookup".to_owned()),
            }],
        },
        ActionDescriptor {
            id: "a2".to_owned(),
            name: "Send Email".to_owned(),
            variables: vec![variable("v3", "subject", false)],
            results: vec![],
        },
    ]
}

#[rstest]
fn filtering_matches_label_case_insensitively(catalog: Vec<ActionDescriptor>) {
    let list = SuggestionList::from_catalog(&catalog, ReferenceKind::Variable, false);

    let hits = list.filter("ema");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].display_label(), "email*");
    assert_eq!(hits[0].label(), "email");
    assert_eq!(hits[0].insert_text(), "{email}");

    let hits = list.filter("EMA");
    assert_eq!(hits.len(), 1);
}

#[rstest]
fn filtering_matches_owning_action_name(catalog: Vec<ActionDescriptor>) {
    let list = SuggestionList::from_catalog(&catalog, ReferenceKind::Variable, false);
    let hits = list.filter("send");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].label(), "subject");
}

#[rstest]
fn empty_query_returns_every_candidate(catalog: Vec<ActionDescriptor>) {
    let list = SuggestionList::from_catalog(&catalog, ReferenceKind::Variable, false);
    assert_eq!(list.filter("").len(), 3);
}

#[rstest]
fn required_marker_never_reaches_value_or_insert_text(catalog: Vec<ActionDescriptor>) {
    let list = SuggestionList::from_catalog(&catalog, ReferenceKind::Variable, false);
    for item in list.items() {
        assert!(!item.label().contains('*'));
        assert!(!item.value().contains('*'));
        assert!(!item.insert_text().contains('*'));
    }
}

#[rstest]
fn result_candidates_without_durable_id_get_a_composite_id(catalog: Vec<ActionDescriptor>) {
    let list = SuggestionList::from_catalog(&catalog, ReferenceKind::Result, false);
    assert_eq!(list.items().len(), 1);
    assert_eq!(list.items()[0].id(), "result:record:a1:lookup");
    assert_eq!(list.items()[0].insert_text(), "<record>");
}

#[rstest]
fn result_insert_text_masquerades_as_variable_when_flagged(catalog: Vec<ActionDescriptor>) {
    let list = SuggestionList::from_catalog(&catalog, ReferenceKind::Result, true);
    assert_eq!(list.items()[0].insert_text(), "{record}");
}

#[rstest]
fn action_candidates_use_the_action_name_and_no_closing_char(catalog: Vec<ActionDescriptor>) {
    let list = SuggestionList::from_catalog(&catalog, ReferenceKind::Action, false);
    assert_eq!(list.items().len(), 2);
    assert_eq!(list.items()[0].insert_text(), "#Lookup");
    assert_eq!(list.items()[1].insert_text(), "#Send Email");
    assert_eq!(list.items()[0].action_name(), None);
}

#[rstest]
fn grouping_renders_headers_only_for_multiple_named_groups(catalog: Vec<ActionDescriptor>) {
    let list = SuggestionList::from_catalog(&catalog, ReferenceKind::Variable, false);
    let all = list.filter("");

    let GroupedSuggestions::Grouped(groups) = group_suggestions(&all) else {
        panic!("expected grouped rendering");
    };
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].name(), "Lookup");
    assert_eq!(groups[0].items().len(), 2);
    assert_eq!(groups[1].name(), "Send Email");
    assert_eq!(groups[1].items().len(), 1);
}

#[rstest]
fn a_single_group_renders_flat(catalog: Vec<ActionDescriptor>) {
    let list = SuggestionList::from_catalog(&catalog, ReferenceKind::Variable, false);
    let hits = list.filter("lookup");

    let GroupedSuggestions::Flat(items) = group_suggestions(&hits) else {
        panic!("expected flat rendering");
    };
    assert_eq!(items.len(), 2);
}

#[rstest]
fn an_all_other_result_renders_flat(catalog: Vec<ActionDescriptor>) {
    let list = SuggestionList::from_catalog(&catalog, ReferenceKind::Action, false);
    let all = list.filter("");

    assert!(matches!(group_suggestions(&all), GroupedSuggestions::Flat(_)));
}
