// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The authoritative workflow graph state: node/edge collections plus the
//! drawer/selection UI state, with atomic mutation operations.
//!
//! The store is an owned instance passed to the graph-editing functions;
//! there is no ambient global. Mutations are synchronous and run to
//! completion within one event handler.

pub mod autosave;
mod payload;

pub use autosave::{AutoSaveGate, SaveError, SaveOutcome, WorkflowSaver};
pub use payload::{workflow_from_json, workflow_to_json};

use std::fmt;

use tracing::debug;

use crate::model::ids::{EdgeId, IdError, NodeId, WorkflowId};
use crate::model::workflow::{
    EdgeEndpoint, NodeVariant, Workflow, WorkflowEdge, WorkflowNode,
};

/// Which editing drawer is open, if any. Exactly one or zero drawers are
/// open at a time; opening one closes the others by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drawer {
    Step(NodeId),
    Branch(NodeId),
    Jump(NodeId),
    End(NodeId),
    GlobalSettings,
}

impl Drawer {
    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            Self::Step(id) | Self::Branch(id) | Self::Jump(id) | Self::End(id) => Some(id),
            Self::GlobalSettings => None,
        }
    }
}

/// Shallow patch merged into a node's `data`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeDataPatch {
    pub label: Option<String>,
    pub variant: Option<NodeVariant>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgePatch {
    pub source: Option<NodeId>,
    pub target: Option<NodeId>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Node,
    Edge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    AlreadyExists {
        kind: ObjectKind,
        id: String,
    },
    NotFound {
        kind: ObjectKind,
        id: String,
    },
    MissingEdgeEndpoint {
        edge_id: EdgeId,
        endpoint: EdgeEndpoint,
        node_id: NodeId,
    },
    InvalidId {
        field: &'static str,
        value: String,
        source: IdError,
    },
    InvalidVariant {
        value: String,
    },
    InvalidPayload {
        message: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists { kind, id } => {
                write!(f, "object already exists ({kind:?}, id={id})")
            }
            Self::NotFound { kind, id } => write!(f, "object not found ({kind:?}, id={id})"),
            Self::MissingEdgeEndpoint { edge_id, endpoint, node_id } => {
                let endpoint = match endpoint {
                    EdgeEndpoint::Source => "source",
                    EdgeEndpoint::Target => "target",
                };
                write!(f, "edge {edge_id} references unknown {endpoint} node {node_id}")
            }
            Self::InvalidId { field, value, source } => {
                write!(f, "invalid id in field '{field}': {value:?} ({source})")
            }
            Self::InvalidVariant { value } => {
                write!(f, "invalid node variant: {value:?} (expected default/branch/jump/end)")
            }
            Self::InvalidPayload { message } => write!(f, "invalid workflow payload: {message}"),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowStore {
    workflow_id: WorkflowId,
    nodes: Vec<WorkflowNode>,
    edges: Vec<WorkflowEdge>,
    drawer: Option<Drawer>,
}

impl WorkflowStore {
    pub fn new(workflow_id: WorkflowId) -> Self {
        Self { workflow_id, nodes: Vec::new(), edges: Vec::new(), drawer: None }
    }

    pub fn from_workflow(workflow: Workflow) -> Self {
        let workflow_id = workflow.workflow_id().clone();
        let nodes = workflow.nodes().to_vec();
        let edges = workflow.edges().to_vec();
        Self { workflow_id, nodes, edges, drawer: None }
    }

    pub fn to_workflow(&self) -> Workflow {
        Workflow::new_with(self.workflow_id.clone(), self.nodes.clone(), self.edges.clone())
    }

    pub fn workflow_id(&self) -> &WorkflowId {
        &self.workflow_id
    }

    pub fn nodes(&self) -> &[WorkflowNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut Vec<WorkflowNode> {
        &mut self.nodes
    }

    pub fn edges(&self) -> &[WorkflowEdge] {
        &self.edges
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|node| node.node_id() == node_id)
    }

    pub fn edge(&self, edge_id: &EdgeId) -> Option<&WorkflowEdge> {
        self.edges.iter().find(|edge| edge.edge_id() == edge_id)
    }

    /// Outgoing edges of a node, in insertion order. The first entry is the
    /// node's "first child" edge for splicing purposes.
    pub fn outgoing_edges(&self, node_id: &NodeId) -> Vec<&WorkflowEdge> {
        self.edges.iter().filter(|edge| edge.source() == node_id).collect()
    }

    pub fn count_variant(&self, variant: NodeVariant) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.data().variant() == variant)
            .count()
    }

    // ---- drawer state ----

    pub fn drawer(&self) -> Option<&Drawer> {
        self.drawer.as_ref()
    }

    pub fn open_drawer(&mut self, drawer: Drawer) {
        debug!(?drawer, "open_drawer");
        self.drawer = Some(drawer);
    }

    pub fn close_drawer(&mut self) {
        self.drawer = None;
    }

    // ---- mutation operations ----

    pub fn add_node(&mut self, node: WorkflowNode) -> Result<(), StoreError> {
        if self.node(node.node_id()).is_some() {
            return Err(StoreError::AlreadyExists {
                kind: ObjectKind::Node,
                id: node.node_id().as_str().to_owned(),
            });
        }
        debug!(node_id = %node.node_id(), variant = %node.data().variant(), "add_node");
        self.nodes.push(node);
        Ok(())
    }

    pub fn update_node(&mut self, node_id: &NodeId, patch: NodeDataPatch) -> Result<(), StoreError> {
        let Some(node) = self.nodes.iter_mut().find(|node| node.node_id() == node_id) else {
            return Err(StoreError::NotFound {
                kind: ObjectKind::Node,
                id: node_id.as_str().to_owned(),
            });
        };

        if let Some(label) = patch.label {
            node.data_mut().set_label(label);
        }
        if let Some(variant) = patch.variant {
            node.data_mut().set_variant(variant);
        }
        debug!(node_id = %node_id, "update_node");
        Ok(())
    }

    /// Removes the node and every edge touching it; a removal never leaves a
    /// dangling edge. A drawer open on the removed node closes.
    pub fn remove_node(&mut self, node_id: &NodeId) -> Result<(), StoreError> {
        let before_len = self.nodes.len();
        self.nodes.retain(|node| node.node_id() != node_id);
        if self.nodes.len() == before_len {
            return Err(StoreError::NotFound {
                kind: ObjectKind::Node,
                id: node_id.as_str().to_owned(),
            });
        }

        let edges_before = self.edges.len();
        self.edges.retain(|edge| !edge.touches(node_id));
        let cascaded = edges_before - self.edges.len();

        if self.drawer.as_ref().and_then(Drawer::node_id) == Some(node_id) {
            self.drawer = None;
        }

        debug!(node_id = %node_id, cascaded, "remove_node");
        Ok(())
    }

    pub fn add_edge(&mut self, edge: WorkflowEdge) -> Result<(), StoreError> {
        if self.edge(edge.edge_id()).is_some() {
            return Err(StoreError::AlreadyExists {
                kind: ObjectKind::Edge,
                id: edge.edge_id().as_str().to_owned(),
            });
        }
        for (endpoint, node_id) in [
            (EdgeEndpoint::Source, edge.source()),
            (EdgeEndpoint::Target, edge.target()),
        ] {
            if self.node(node_id).is_none() {
                return Err(StoreError::MissingEdgeEndpoint {
                    edge_id: edge.edge_id().clone(),
                    endpoint,
                    node_id: node_id.clone(),
                });
            }
        }
        debug!(edge_id = %edge.edge_id(), "add_edge");
        self.edges.push(edge);
        Ok(())
    }

    pub fn update_edge(&mut self, edge_id: &EdgeId, patch: EdgePatch) -> Result<(), StoreError> {
        for node_id in patch.source.iter().chain(patch.target.iter()) {
            if self.node(node_id).is_none() {
                return Err(StoreError::NotFound {
                    kind: ObjectKind::Node,
                    id: node_id.as_str().to_owned(),
                });
            }
        }

        let Some(edge) = self.edges.iter_mut().find(|edge| edge.edge_id() == edge_id) else {
            return Err(StoreError::NotFound {
                kind: ObjectKind::Edge,
                id: edge_id.as_str().to_owned(),
            });
        };

        if let Some(source) = patch.source {
            edge.set_source(source);
        }
        if let Some(target) = patch.target {
            edge.set_target(target);
        }
        if let Some(label) = patch.label {
            edge.set_label(Some(label));
        }
        debug!(edge_id = %edge_id, "update_edge");
        Ok(())
    }

    pub fn remove_edge(&mut self, edge_id: &EdgeId) -> Result<(), StoreError> {
        let before_len = self.edges.len();
        self.edges.retain(|edge| edge.edge_id() != edge_id);
        if self.edges.len() == before_len {
            return Err(StoreError::NotFound {
                kind: ObjectKind::Edge,
                id: edge_id.as_str().to_owned(),
            });
        }
        debug!(edge_id = %edge_id, "remove_edge");
        Ok(())
    }

    // ---- id allocation ----

    /// First free `n:<index>` handle. Deterministic; durable uniqueness is
    /// what matters, not monotonicity.
    pub fn allocate_node_id(&self) -> NodeId {
        allocate_id(self.nodes.len(), |index| {
            let candidate = format!("n:{index}");
            self.nodes.iter().all(|node| node.node_id().as_str() != candidate).then(|| {
                NodeId::new(candidate).expect("generated node id is valid")
            })
        })
    }

    pub fn allocate_edge_id(&self) -> EdgeId {
        allocate_id(self.edges.len(), |index| {
            let candidate = format!("e:{index:04}");
            self.edges.iter().all(|edge| edge.edge_id().as_str() != candidate).then(|| {
                EdgeId::new(candidate).expect("generated edge id is valid")
            })
        })
    }
}

fn allocate_id<T>(start: usize, try_index: impl Fn(usize) -> Option<T>) -> T {
    let mut index = start.saturating_add(1);
    loop {
        if let Some(id) = try_index(index) {
            return id;
        }
        index += 1;
    }
}
