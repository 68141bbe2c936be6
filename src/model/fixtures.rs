// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{EdgeId, NodeId};
use super::workflow::{NodeData, NodeVariant, Position, WorkflowEdge, WorkflowNode};

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("edge id")
}

pub(crate) fn step(id: &str, label: &str, x: f64, y: f64) -> WorkflowNode {
    WorkflowNode::new(
        nid(id),
        Position::new(x, y),
        NodeData::new(label, NodeVariant::Default),
    )
}

/// A straight four-step chain: `n:1 -> n:2 -> n:3 -> n:4`, spaced 120px apart.
pub(crate) fn chain_workflow() -> (Vec<WorkflowNode>, Vec<WorkflowEdge>) {
    let nodes = vec![
        step("n:1", "Step 1", 0.0, 0.0),
        step("n:2", "Step 2", 0.0, 120.0),
        step("n:3", "Step 3", 0.0, 240.0),
        step("n:4", "Step 4", 0.0, 360.0),
    ];
    let edges = vec![
        WorkflowEdge::new(eid("e:0001"), nid("n:1"), nid("n:2")),
        WorkflowEdge::new(eid("e:0002"), nid("n:2"), nid("n:3")),
        WorkflowEdge::new(eid("e:0003"), nid("n:3"), nid("n:4")),
    ];
    (nodes, edges)
}

/// A chain whose tail jumps back to an earlier step, so naive descendant
/// traversal would loop forever.
pub(crate) fn cyclic_jump_workflow() -> (Vec<WorkflowNode>, Vec<WorkflowEdge>) {
    let mut nodes = vec![
        step("n:1", "Step 1", 0.0, 0.0),
        step("n:2", "Step 2", 0.0, 120.0),
        step("n:3", "Step 3", 0.0, 240.0),
    ];
    nodes.push(WorkflowNode::new(
        nid("n:jump"),
        Position::new(0.0, 360.0),
        NodeData::new("Jump 1", NodeVariant::Jump),
    ));
    let edges = vec![
        WorkflowEdge::new(eid("e:0001"), nid("n:1"), nid("n:2")),
        WorkflowEdge::new(eid("e:0002"), nid("n:2"), nid("n:3")),
        WorkflowEdge::new(eid("e:0003"), nid("n:3"), nid("n:jump")),
        WorkflowEdge::new(eid("e:0004"), nid("n:jump"), nid("n:1")),
    ];
    (nodes, edges)
}

/// A long chain with `count` nodes, 120px vertical spacing, used to exercise
/// the spatial banding fast path (`count` above the 100-node threshold).
pub(crate) fn long_chain_workflow(count: usize) -> (Vec<WorkflowNode>, Vec<WorkflowEdge>) {
    let mut nodes = Vec::with_capacity(count);
    let mut edges = Vec::with_capacity(count.saturating_sub(1));
    for index in 0..count {
        nodes.push(step(
            &format!("n:{index:04}"),
            &format!("Step {}", index + 1),
            0.0,
            (index as f64) * 120.0,
        ));
        if index > 0 {
            edges.push(WorkflowEdge::new(
                eid(&format!("e:{index:04}")),
                nid(&format!("n:{:04}", index - 1)),
                nid(&format!("n:{index:04}")),
            ));
        }
    }
    (nodes, edges)
}
