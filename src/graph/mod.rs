// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Node insertion: deciding how a newly created node is spliced into the
//! existing topology, and wiring the branch construct's two labeled paths.

use std::fmt;

use tracing::debug;

use crate::layout::{apply_plan, plan_insertion, RepositionConfig, RepositionPlan};
use crate::model::ids::{EdgeId, NodeId};
use crate::model::workflow::{NodeData, NodeVariant, Position, WorkflowEdge, WorkflowNode};
use crate::store::{StoreError, WorkflowStore};

/// Horizontal fan-out applied to the second path of a fresh branch, so the
/// two children do not stack on the same column.
const BRANCH_FAN_OFFSET: f64 = 200.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    ParentNotFound { node_id: NodeId },
    Store(StoreError),
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParentNotFound { node_id } => {
                write!(f, "insertion parent not found: {node_id}")
            }
            Self::Store(err) => write!(f, "insertion failed: {err}"),
        }
    }
}

impl std::error::Error for InsertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::ParentNotFound { .. } => None,
        }
    }
}

impl From<StoreError> for InsertError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// What an insertion did to the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertOutcome {
    node_id: NodeId,
    extra_node_ids: Vec<NodeId>,
    added_edge_ids: Vec<EdgeId>,
    removed_edge_id: Option<EdgeId>,
    plan: RepositionPlan,
}

impl InsertOutcome {
    /// The node the caller asked for.
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Default-variant children created alongside a branch node.
    pub fn extra_node_ids(&self) -> &[NodeId] {
        &self.extra_node_ids
    }

    pub fn added_edge_ids(&self) -> &[EdgeId] {
        &self.added_edge_ids
    }

    /// The parent-to-first-child edge removed by the splice, if any.
    pub fn removed_edge_id(&self) -> Option<&EdgeId> {
        self.removed_edge_id.as_ref()
    }

    /// The repositioning applied before the node was committed.
    pub fn plan(&self) -> &RepositionPlan {
        &self.plan
    }
}

/// Inserts a new node of `variant` under `parent_id`.
///
/// Descendants are repositioned first so the new node's slot is clear, then
/// the node is spliced in:
/// - `default`/`jump`/`end`: between the parent and its first existing child
///   when one exists, replacing that edge; appended as the sole child
///   otherwise.
/// - `branch`: the branch construct takes the parent's first child as its
///   first path and grows a fresh default node as its second; with no
///   children both paths get fresh default nodes.
pub fn insert_node(
    store: &mut WorkflowStore,
    parent_id: &NodeId,
    variant: NodeVariant,
    config: &RepositionConfig,
) -> Result<InsertOutcome, InsertError> {
    let Some(parent) = store.node(parent_id) else {
        return Err(InsertError::ParentNotFound { node_id: parent_id.clone() });
    };
    let parent_position = parent.position();

    let plan = plan_insertion(store.nodes(), store.edges(), parent_id, config);
    apply_plan(store.nodes_mut(), &plan);

    let first_child = store
        .outgoing_edges(parent_id)
        .first()
        .map(|edge| (edge.edge_id().clone(), edge.target().clone()));

    // Numbering reads the live count at creation time. Deleting and
    // recreating nodes can renumber out of order; that is accepted.
    let sequence = store.count_variant(variant) + 1;
    let node_id = store.allocate_node_id();
    let position = parent_position.offset(0.0, config.vertical_spacing);
    store.add_node(WorkflowNode::new(
        node_id.clone(),
        position,
        NodeData::new(format!("{} {sequence}", variant.label_prefix()), variant),
    ))?;

    let mut extra_node_ids = Vec::new();
    let mut added_edge_ids = Vec::new();
    let mut removed_edge_id = None;

    if let Some((old_edge_id, _)) = &first_child {
        store.remove_edge(old_edge_id)?;
        removed_edge_id = Some(old_edge_id.clone());
    }
    added_edge_ids.push(link(store, parent_id, &node_id, None)?);

    match variant {
        NodeVariant::Branch => {
            let first_path_label = format!("Branch {sequence}");
            let second_path_label = format!("Branch {}", sequence + 1);

            let first_target = match &first_child {
                Some((_, child_id)) => child_id.clone(),
                None => grow_default_child(
                    store,
                    &position.offset(-BRANCH_FAN_OFFSET, config.vertical_spacing),
                    &mut extra_node_ids,
                )?,
            };
            added_edge_ids.push(link(store, &node_id, &first_target, Some(first_path_label))?);

            let second_target = grow_default_child(
                store,
                &position.offset(BRANCH_FAN_OFFSET, config.vertical_spacing),
                &mut extra_node_ids,
            )?;
            added_edge_ids.push(link(store, &node_id, &second_target, Some(second_path_label))?);
        }
        NodeVariant::Default | NodeVariant::Jump | NodeVariant::End => {
            if let Some((_, child_id)) = &first_child {
                added_edge_ids.push(link(store, &node_id, child_id, None)?);
            }
        }
    }

    debug!(
        parent_id = %parent_id,
        node_id = %node_id,
        variant = %variant,
        spliced = first_child.is_some(),
        repositioned = plan.moved_count(),
        "insert_node"
    );

    Ok(InsertOutcome { node_id, extra_node_ids, added_edge_ids, removed_edge_id, plan })
}

fn link(
    store: &mut WorkflowStore,
    source: &NodeId,
    target: &NodeId,
    label: Option<String>,
) -> Result<EdgeId, StoreError> {
    let edge_id = store.allocate_edge_id();
    store.add_edge(WorkflowEdge::new_with(
        edge_id.clone(),
        source.clone(),
        target.clone(),
        label,
    ))?;
    Ok(edge_id)
}

fn grow_default_child(
    store: &mut WorkflowStore,
    position: &Position,
    extra_node_ids: &mut Vec<NodeId>,
) -> Result<NodeId, StoreError> {
    let sequence = store.count_variant(NodeVariant::Default) + 1;
    let node_id = store.allocate_node_id();
    store.add_node(WorkflowNode::new(
        node_id.clone(),
        *position,
        NodeData::new(format!("Step {sequence}"), NodeVariant::Default),
    ))?;
    extra_node_ids.push(node_id.clone());
    Ok(node_id)
}
