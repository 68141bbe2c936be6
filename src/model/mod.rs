// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: typed ids, the token grammar, tokens, the action
//! catalog, and the workflow node/edge/payload types.

pub mod catalog;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod grammar;
pub mod ids;
pub mod token;
pub mod workflow;

pub use catalog::{validate_catalog, ActionDescriptor, ActionResult, ActionVariable, CatalogError};
pub use grammar::ReferenceKind;
pub use ids::{ActionId, EdgeId, Id, IdError, MentionId, NodeId, WorkflowId};
pub use token::{parse_reference, Token, TokenAttrs};
pub use workflow::{
    EdgeEndpoint, NodeData, NodeVariant, Position, Workflow, WorkflowEdge, WorkflowNode,
    WorkflowValidationError,
};
