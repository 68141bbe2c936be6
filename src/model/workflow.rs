// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::ids::{EdgeId, NodeId, WorkflowId};

/// Canvas position of a node, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Behavioral type of a workflow node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeVariant {
    Default,
    Branch,
    Jump,
    End,
}

impl NodeVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Branch => "branch",
            Self::Jump => "jump",
            Self::End => "end",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "default" => Some(Self::Default),
            "branch" => Some(Self::Branch),
            "jump" => Some(Self::Jump),
            "end" => Some(Self::End),
            _ => None,
        }
    }

    /// Prefix used when numbering freshly created nodes of this variant.
    pub fn label_prefix(self) -> &'static str {
        match self {
            Self::Default => "Step",
            Self::Branch => "Branch",
            Self::Jump => "Jump",
            Self::End => "End",
        }
    }
}

impl fmt::Display for NodeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    label: String,
    variant: NodeVariant,
}

impl NodeData {
    pub fn new(label: impl Into<String>, variant: NodeVariant) -> Self {
        Self { label: label.into(), variant }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn variant(&self) -> NodeVariant {
        self.variant
    }

    pub fn set_variant(&mut self, variant: NodeVariant) {
        self.variant = variant;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowNode {
    node_id: NodeId,
    position: Position,
    data: NodeData,
}

impl WorkflowNode {
    pub fn new(node_id: NodeId, position: Position, data: NodeData) -> Self {
        Self { node_id, position, data }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut NodeData {
        &mut self.data
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowEdge {
    edge_id: EdgeId,
    source: NodeId,
    target: NodeId,
    label: Option<String>,
}

impl WorkflowEdge {
    pub fn new(edge_id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self { edge_id, source, target, label: None }
    }

    pub fn new_with(
        edge_id: EdgeId,
        source: NodeId,
        target: NodeId,
        label: Option<String>,
    ) -> Self {
        Self { edge_id, source, target, label }
    }

    pub fn edge_id(&self) -> &EdgeId {
        &self.edge_id
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn set_source(&mut self, source: NodeId) {
        self.source = source;
    }

    pub fn set_target(&mut self, target: NodeId) {
        self.target = target;
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label<T: Into<String>>(&mut self, label: Option<T>) {
        self.label = label.map(Into::into);
    }

    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.source == node_id || &self.target == node_id
    }
}

/// The exchange payload handed to and received from the persistence
/// collaborator. No envelope fields beyond these are defined here.
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    workflow_id: WorkflowId,
    nodes: Vec<WorkflowNode>,
    edges: Vec<WorkflowEdge>,
}

impl Workflow {
    pub fn new(workflow_id: WorkflowId) -> Self {
        Self { workflow_id, nodes: Vec::new(), edges: Vec::new() }
    }

    pub fn new_with(
        workflow_id: WorkflowId,
        nodes: Vec<WorkflowNode>,
        edges: Vec<WorkflowEdge>,
    ) -> Self {
        Self { workflow_id, nodes, edges }
    }

    pub fn workflow_id(&self) -> &WorkflowId {
        &self.workflow_id
    }

    pub fn nodes(&self) -> &[WorkflowNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[WorkflowEdge] {
        &self.edges
    }

    /// Referential check used at the persistence boundary: every edge
    /// endpoint must name an existing node.
    pub fn validate(&self) -> Result<(), WorkflowValidationError> {
        for edge in &self.edges {
            for (endpoint, node_id) in [
                (EdgeEndpoint::Source, edge.source()),
                (EdgeEndpoint::Target, edge.target()),
            ] {
                if !self.nodes.iter().any(|node| node.node_id() == node_id) {
                    return Err(WorkflowValidationError::DanglingEdge {
                        edge_id: edge.edge_id().clone(),
                        endpoint,
                        node_id: node_id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEndpoint {
    Source,
    Target,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowValidationError {
    DanglingEdge {
        edge_id: EdgeId,
        endpoint: EdgeEndpoint,
        node_id: NodeId,
    },
}

impl fmt::Display for WorkflowValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingEdge { edge_id, endpoint, node_id } => {
                let endpoint = match endpoint {
                    EdgeEndpoint::Source => "source",
                    EdgeEndpoint::Target => "target",
                };
                write!(f, "edge {edge_id} references unknown {endpoint} node {node_id}")
            }
        }
    }
}

impl std::error::Error for WorkflowValidationError {}
