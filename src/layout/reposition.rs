// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use smallvec::SmallVec;
use tracing::debug;

use crate::model::ids::NodeId;
use crate::model::workflow::{Position, WorkflowEdge, WorkflowNode};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepositionConfig {
    pub vertical_spacing: f64,
    pub minimum_movement: f64,
    pub band_height: f64,
    /// Node count above which candidate selection switches to the spatial
    /// banding fast path.
    pub fast_path_threshold: usize,
}

impl Default for RepositionConfig {
    fn default() -> Self {
        Self {
            vertical_spacing: 120.0,
            minimum_movement: 10.0,
            band_height: 150.0,
            fast_path_threshold: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeMove {
    node_id: NodeId,
    old_position: Position,
    new_position: Position,
}

impl NodeMove {
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn old_position(&self) -> Position {
        self.old_position
    }

    pub fn new_position(&self) -> Position {
        self.new_position
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RepositionPlan {
    moves: SmallVec<[NodeMove; 8]>,
}

impl RepositionPlan {
    pub fn moves(&self) -> &[NodeMove] {
        &self.moves
    }

    pub fn moved_count(&self) -> usize {
        self.moves.len()
    }

    pub fn any_moved(&self) -> bool {
        !self.moves.is_empty()
    }
}

/// Collects every node reachable from `parent_id` through outgoing edges,
/// excluding the parent itself. Breadth-first with a visited set: jump nodes
/// can make the adjacency cyclic, so traversal must guard against revisits
/// to terminate.
pub fn collect_descendants<'a>(
    nodes: &'a [WorkflowNode],
    edges: &[WorkflowEdge],
    parent_id: &NodeId,
) -> Vec<&'a WorkflowNode> {
    let mut adjacency = BTreeMap::<&NodeId, Vec<&NodeId>>::new();
    for edge in edges {
        adjacency.entry(edge.source()).or_default().push(edge.target());
    }

    let by_id: BTreeMap<&NodeId, &WorkflowNode> =
        nodes.iter().map(|node| (node.node_id(), node)).collect();

    let mut visited = BTreeSet::<&NodeId>::new();
    let mut queue = VecDeque::<&NodeId>::new();
    queue.push_back(parent_id);
    visited.insert(parent_id);

    let mut descendants = Vec::new();
    while let Some(current) = queue.pop_front() {
        let Some(children) = adjacency.get(current) else {
            continue;
        };
        for child in children {
            if !visited.insert(child) {
                continue;
            }
            if let Some(node) = by_id.get(child) {
                descendants.push(*node);
            }
            queue.push_back(child);
        }
    }
    descendants
}

fn band_index(y: f64, band_height: f64) -> i64 {
    (y / band_height).floor() as i64
}

/// Bounded-cost candidate selection for large graphs: fixed-height
/// horizontal bands, keeping only nodes in the insertion's band or below.
/// Unrelated nodes sharing the insertion band may be needlessly included;
/// that imprecision is the price of skipping the graph walk.
fn banded_candidates<'a>(
    nodes: &'a [WorkflowNode],
    parent: &WorkflowNode,
    config: &RepositionConfig,
) -> Vec<&'a WorkflowNode> {
    let insertion_band = band_index(parent.position().y(), config.band_height);
    nodes
        .iter()
        .filter(|node| node.node_id() != parent.node_id())
        .filter(|node| band_index(node.position().y(), config.band_height) >= insertion_band)
        .collect()
}

/// Computes the repositioning for inserting a child under `parent_id`,
/// without mutating anything. This is also the "preview" the host can show
/// before committing.
pub fn plan_insertion(
    nodes: &[WorkflowNode],
    edges: &[WorkflowEdge],
    parent_id: &NodeId,
    config: &RepositionConfig,
) -> RepositionPlan {
    let Some(parent) = nodes.iter().find(|node| node.node_id() == parent_id) else {
        return RepositionPlan::default();
    };

    let candidates = if nodes.len() > config.fast_path_threshold {
        banded_candidates(nodes, parent, config)
    } else {
        collect_descendants(nodes, edges, parent_id)
    };

    let mut moves = SmallVec::new();
    for node in candidates {
        let shift = config.vertical_spacing;
        // Skip shifts below the minimum movement so nodes that are already
        // clear do not jitter.
        if shift.abs() < config.minimum_movement {
            continue;
        }
        let old_position = node.position();
        moves.push(NodeMove {
            node_id: node.node_id().clone(),
            old_position,
            new_position: old_position.offset(0.0, shift),
        });
    }

    debug!(
        parent_id = %parent_id,
        candidates = moves.len(),
        fast_path = nodes.len() > config.fast_path_threshold,
        "plan_insertion"
    );
    RepositionPlan { moves }
}

/// Applies a plan by replacing `position` on matching nodes. Nodes without
/// a move entry are returned unchanged. Returns the number of nodes moved.
pub fn apply_plan(nodes: &mut [WorkflowNode], plan: &RepositionPlan) -> usize {
    let mut applied = 0usize;
    for node_move in plan.moves() {
        if let Some(node) = nodes
            .iter_mut()
            .find(|node| node.node_id() == node_move.node_id())
        {
            node.set_position(node_move.new_position());
            applied += 1;
        }
    }
    applied
}

/// Plan-then-apply convenience used by the insertion algorithm.
pub fn reposition_for_insertion(
    nodes: &mut [WorkflowNode],
    edges: &[WorkflowEdge],
    parent_id: &NodeId,
    config: &RepositionConfig,
) -> RepositionPlan {
    let plan = plan_insertion(nodes, edges, parent_id, config);
    apply_plan(nodes, &plan);
    plan
}
