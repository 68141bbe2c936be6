// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire form of the workflow exchange payload. Domain types stay std-only;
//! serde lives in plain-string mirror structs converted at this boundary.

use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::model::ids::{EdgeId, IdError, NodeId, WorkflowId};
use crate::model::workflow::{
    NodeData, NodeVariant, Position, Workflow, WorkflowEdge, WorkflowNode,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkflowJson {
    #[serde(rename = "workflowId")]
    workflow_id: String,
    #[serde(default)]
    nodes: Vec<NodeJson>,
    #[serde(default)]
    edges: Vec<EdgeJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeJson {
    id: String,
    position: PositionJson,
    data: NodeDataJson,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PositionJson {
    x: f64,
    y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeDataJson {
    label: String,
    variant: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EdgeJson {
    id: String,
    source: String,
    target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

pub fn workflow_to_json(workflow: &Workflow) -> String {
    let json = WorkflowJson {
        workflow_id: workflow.workflow_id().as_str().to_owned(),
        nodes: workflow
            .nodes()
            .iter()
            .map(|node| NodeJson {
                id: node.node_id().as_str().to_owned(),
                position: PositionJson { x: node.position().x(), y: node.position().y() },
                data: NodeDataJson {
                    label: node.data().label().to_owned(),
                    variant: node.data().variant().as_str().to_owned(),
                },
            })
            .collect(),
        edges: workflow
            .edges()
            .iter()
            .map(|edge| EdgeJson {
                id: edge.edge_id().as_str().to_owned(),
                source: edge.source().as_str().to_owned(),
                target: edge.target().as_str().to_owned(),
                label: edge.label().map(ToOwned::to_owned),
            })
            .collect(),
    };
    serde_json::to_string(&json).expect("workflow payload serializes")
}

pub fn workflow_from_json(raw: &str) -> Result<Workflow, StoreError> {
    let json: WorkflowJson = serde_json::from_str(raw)
        .map_err(|err| StoreError::InvalidPayload { message: err.to_string() })?;

    let workflow_id = parse_id(&json.workflow_id, "workflowId", WorkflowId::new)?;

    let mut nodes = Vec::with_capacity(json.nodes.len());
    for node in &json.nodes {
        let node_id = parse_id(&node.id, "nodes[].id", NodeId::new)?;
        let variant = NodeVariant::parse(&node.data.variant).ok_or_else(|| {
            StoreError::InvalidVariant { value: node.data.variant.clone() }
        })?;
        nodes.push(WorkflowNode::new(
            node_id,
            Position::new(node.position.x, node.position.y),
            NodeData::new(node.data.label.clone(), variant),
        ));
    }

    let mut edges = Vec::with_capacity(json.edges.len());
    for edge in &json.edges {
        edges.push(WorkflowEdge::new_with(
            parse_id(&edge.id, "edges[].id", EdgeId::new)?,
            parse_id(&edge.source, "edges[].source", NodeId::new)?,
            parse_id(&edge.target, "edges[].target", NodeId::new)?,
            edge.label.clone(),
        ));
    }

    let workflow = Workflow::new_with(workflow_id, nodes, edges);
    workflow
        .validate()
        .map_err(|err| StoreError::InvalidPayload { message: err.to_string() })?;
    Ok(workflow)
}

fn parse_id<F, T>(value: &str, field: &'static str, make: F) -> Result<T, StoreError>
where
    F: FnOnce(String) -> Result<T, IdError>,
{
    make(value.to_owned()).map_err(|source| StoreError::InvalidId {
        field,
        value: value.to_owned(),
        source,
    })
}
