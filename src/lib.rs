// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Flowloom: building blocks for agent conversation workflows.
//!
//! Token grammar and instruction documents, autocomplete suggestions, the
//! workflow graph store with node insertion, and automatic repositioning.

pub mod document;
pub mod editor;
pub mod graph;
pub mod layout;
pub mod model;
pub mod store;
pub mod suggest;
