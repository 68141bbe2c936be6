// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End to end: hydrate a persisted workflow, edit its instruction document,
//! grow the graph, and hand the result back to the persistence collaborator.

use flowloom::document::{Document, DocumentCommands};
use flowloom::editor::{Editor, EditorConfig, EditorKey};
use flowloom::graph::insert_node;
use flowloom::layout::RepositionConfig;
use flowloom::model::{
    validate_catalog, ActionDescriptor, ActionId, NodeId, NodeVariant, Workflow,
};
use flowloom::store::{
    workflow_from_json, workflow_to_json, AutoSaveGate, SaveError, SaveOutcome, WorkflowSaver,
};

const PERSISTED_WORKFLOW: &str = r#"{
    "workflowId": "w:onboarding",
    "nodes": [
        {"id": "n:1", "position": {"x": 0.0, "y": 0.0},
         "data": {"label": "Step 1", "variant": "default"}},
        {"id": "n:2", "position": {"x": 0.0, "y": 120.0},
         "data": {"label": "Step 2", "variant": "default"}}
    ],
    "edges": [
        {"id": "e:0001", "source": "n:1", "target": "n:2"}
    ]
}"#;

fn catalog() -> Vec<ActionDescriptor> {
    let actions: Vec<ActionDescriptor> = serde_json::from_str(
        r#"[{
            "id": "a1",
            "name": "Lookup",
            "variables": [
                {"variable_id": "v1", "key": "email", "required": true},
                {"variable_id": "v2", "key": "name"}
            ]
        }]"#,
    )
    .expect("catalog json");
    validate_catalog(&actions).expect("valid catalog");
    actions
}

struct MemorySaver {
    saved: Vec<Workflow>,
    fail_next: bool,
}

impl WorkflowSaver for MemorySaver {
    fn save(&mut self, workflow: &Workflow) -> Result<(), SaveError> {
        if self.fail_next {
            self.fail_next = false;
            return Err(SaveError::new("backend unavailable"));
        }
        self.saved.push(workflow.clone());
        Ok(())
    }
}

#[test]
fn hydrate_edit_grow_and_persist() {
    let workflow = workflow_from_json(PERSISTED_WORKFLOW).expect("persisted payload");
    let mut store = flowloom::store::WorkflowStore::from_workflow(workflow);
    let config = RepositionConfig::default();

    // Grow the graph: a step under n:1, then a branch under that step.
    let parent = NodeId::new("n:1").expect("node id");
    let step = insert_node(&mut store, &parent, NodeVariant::Default, &config)
        .expect("insert step");
    let branch = insert_node(&mut store, step.node_id(), NodeVariant::Branch, &config)
        .expect("insert branch");

    // The step was spliced between n:1 and n:2, the branch between the step
    // and n:2; the branch grew a second fresh path.
    assert_eq!(branch.extra_node_ids().len(), 1);
    let branch_paths = store.outgoing_edges(branch.node_id());
    assert_eq!(branch_paths.len(), 2);
    assert_eq!(branch_paths[0].label(), Some("Branch 1"));

    // Nothing dangles after two splices.
    let edited = store.to_workflow();
    edited.validate().expect("referential integrity");

    // Hand the result to the persistence collaborator through the gate.
    let mut gate = AutoSaveGate::new();
    let mut saver = MemorySaver { saved: Vec::new(), fail_next: false };
    assert_eq!(gate.try_save(&mut saver, &edited), SaveOutcome::Dropped);
    gate.finish_initial_load();
    assert_eq!(gate.try_save(&mut saver, &edited), SaveOutcome::Saved);

    // What was saved round-trips bit-for-bit through the exchange payload.
    let json = workflow_to_json(&saver.saved[0]);
    assert_eq!(workflow_from_json(&json).expect("round trip"), edited);
}

#[test]
fn instruction_document_follows_the_catalog_lifecycle() {
    let mut editor = Editor::new(catalog(), EditorConfig::default());
    editor.insert_text("send to {ema");
    editor.handle_key(EditorKey::Enter);
    editor.insert_text("and {nam");
    editor.handle_key(EditorKey::Enter);

    assert_eq!(editor.document().to_text(), "send to {email} and {name} ");

    // Persist, hydrate elsewhere, then cascade-delete when the action goes.
    let persisted = editor.document().to_json_string();
    let mut document = Document::from_json_string(&persisted);
    assert_eq!(document.mentions().count(), 2);

    let action_id = ActionId::new("a1").expect("action id");
    assert_eq!(document.remove_all_mentions_by_action_id(&action_id), 2);
    assert_eq!(document.mentions().count(), 0);
    // Idempotent: a second cascade is a no-op, not an error.
    assert_eq!(document.remove_all_mentions_by_action_id(&action_id), 0);
}

#[test]
fn failed_save_does_not_wedge_later_saves() {
    let workflow = workflow_from_json(PERSISTED_WORKFLOW).expect("persisted payload");
    let mut gate = AutoSaveGate::new();
    gate.finish_initial_load();

    let mut saver = MemorySaver { saved: Vec::new(), fail_next: true };
    assert_eq!(gate.try_save(&mut saver, &workflow), SaveOutcome::Failed);
    assert_eq!(gate.try_save(&mut saver, &workflow), SaveOutcome::Saved);
    assert_eq!(saver.saved.len(), 1);
}
