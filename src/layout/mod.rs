// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Automatic repositioning: shifting descendants down so an inserted node
//! never visually overlaps the nodes that logically come after it.

mod reposition;

pub use reposition::{
    apply_plan, collect_descendants, plan_insertion, reposition_for_insertion, NodeMove,
    RepositionConfig, RepositionPlan,
};
