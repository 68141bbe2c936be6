// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{Block, Document, DocumentCommands, Inline};
use crate::model::grammar::ReferenceKind;
use crate::model::ids::{ActionId, MentionId};
use crate::model::token::Token;

fn mention(id: &str, label: &str, action_id: &str) -> Token {
    Token::new_with(
        MentionId::new(id).expect("mention id"),
        label,
        ReferenceKind::Variable,
        Some(ActionId::new(action_id).expect("action id")),
        None,
        Some("Lookup".to_owned()),
        false,
    )
}

fn fixture_document() -> Document {
    let mut document = Document::new();
    document.blocks_mut().clear();
    document.blocks_mut().push(Block::new(vec![
        Inline::Text("Send to ".to_owned()),
        Inline::Mention(mention("m:1", "email", "A1")),
        Inline::Text(" and ".to_owned()),
        Inline::Mention(mention("m:2", "name", "A1")),
    ]));
    document.blocks_mut().push(Block::new(vec![
        Inline::Mention(mention("m:1", "email", "A1")),
        Inline::Text(" again, then ".to_owned()),
        Inline::Mention(mention("m:3", "city", "A2")),
        Inline::Mention(mention("m:4", "zip", "A2")),
    ]));
    document
}

#[test]
fn json_round_trip_preserves_structure_and_tokens() {
    let document = fixture_document();
    let json = document.to_json_string();
    let hydrated = Document::from_json_string(&json);
    assert_eq!(hydrated, document);
}

#[test]
fn unparsable_content_hydrates_as_plain_literal_text() {
    let hydrated = Document::from_json_string("not json at all");
    assert_eq!(hydrated.to_text(), "not json at all");
    assert_eq!(hydrated.mentions().count(), 0);
}

#[test]
fn structurally_wrong_json_hydrates_as_plain_literal_text() {
    let raw = r#"{"type":"doc","content":[{"type":"doc","content":[]}]}"#;
    let hydrated = Document::from_json_string(raw);
    assert_eq!(hydrated.to_text(), raw);
}

#[test]
fn empty_doc_json_hydrates_as_the_empty_document() {
    let hydrated = Document::from_json_string(r#"{"type":"doc","content":[]}"#);
    assert_eq!(hydrated, Document::new());
}

#[test]
fn to_text_renders_tokens_with_the_grammar() {
    let document = fixture_document();
    assert_eq!(
        document.to_text(),
        "Send to {email} and {name}\n{email} again, then {city}{zip}"
    );
}

#[test]
fn remove_mentions_by_id_removes_every_instance() {
    let mut document = fixture_document();
    let id = MentionId::new("m:1").expect("mention id");

    let removed = document.remove_mentions_by_id(&id);
    assert_eq!(removed, 2);
    assert!(document.mentions().all(|token| token.id() != &id));
    assert_eq!(document.to_text(), "Send to  and {name}\n again, then {city}{zip}");
}

#[test]
fn remove_mentions_by_id_is_idempotent() {
    let mut document = fixture_document();
    let id = MentionId::new("m:1").expect("mention id");

    document.remove_mentions_by_id(&id);
    let after_first = document.clone();
    let removed_again = document.remove_mentions_by_id(&id);

    assert_eq!(removed_again, 0);
    assert_eq!(document, after_first);
}

#[test]
fn cascade_delete_by_action_id_removes_exactly_that_actions_mentions() {
    let mut document = fixture_document();
    let a1 = ActionId::new("A1").expect("action id");

    let removed = document.remove_all_mentions_by_action_id(&a1);
    assert_eq!(removed, 3);

    let remaining: Vec<_> = document
        .mentions()
        .map(|token| token.id().as_str().to_owned())
        .collect();
    assert_eq!(remaining, vec!["m:3", "m:4"]);
    // Non-token content is untouched.
    assert!(document.to_text().contains("Send to "));
    assert!(document.to_text().contains(" again, then "));
}

#[test]
fn commands_with_zero_matches_are_no_ops() {
    let mut document = fixture_document();
    let before = document.clone();

    let missing_mention = MentionId::new("m:404").expect("mention id");
    let missing_action = ActionId::new("A404").expect("action id");
    assert_eq!(document.remove_mentions_by_id(&missing_mention), 0);
    assert_eq!(document.update_mention_by_id(&missing_mention, "renamed"), 0);
    assert_eq!(document.remove_all_mentions_by_action_id(&missing_action), 0);
    assert_eq!(document, before);
}

#[test]
fn update_mention_by_id_renames_without_touching_identity() {
    let mut document = fixture_document();
    let id = MentionId::new("m:1").expect("mention id");

    let updated = document.update_mention_by_id(&id, "recipient_email");
    assert_eq!(updated, 2);

    for token in document.mentions().filter(|token| token.id() == &id) {
        assert_eq!(token.label(), "recipient_email");
        assert_eq!(token.action_id().map(|a| a.as_str()), Some("A1"));
    }
}

#[test]
fn removal_merges_the_surrounding_text_runs() {
    let mut document = Document::new();
    document.blocks_mut().clear();
    document.blocks_mut().push(Block::new(vec![
        Inline::Text("before ".to_owned()),
        Inline::Mention(mention("m:9", "gone", "A9")),
        Inline::Text(" after".to_owned()),
    ]));

    document.remove_mentions_by_id(&MentionId::new("m:9").expect("mention id"));

    assert_eq!(document.blocks()[0].content().len(), 1);
    assert_eq!(document.to_text(), "before  after");
}
