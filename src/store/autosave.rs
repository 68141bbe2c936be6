// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The auto-save gate.
//!
//! Two booleans form a simple mutual-exclusion gate: a save request is
//! dropped entirely, not queued and not retried, while a save is in flight
//! or the initial load has not finished. A burst of edits during an
//! in-flight save is only persisted if a later edit triggers another save
//! after the gate clears. That is an accepted-lossy design, preserved
//! exactly: no queueing, no retry-with-backoff.

use std::fmt;

use tracing::warn;

use crate::model::workflow::Workflow;

/// The persistence collaborator, injected by the host.
pub trait WorkflowSaver {
    fn save(&mut self, workflow: &Workflow) -> Result<(), SaveError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveError {
    message: String,
}

impl SaveError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "save failed: {}", self.message)
    }
}

impl std::error::Error for SaveError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The gate was closed; no save attempt was made.
    Dropped,
    /// The saver ran and failed; the failure was logged and the gate released.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoSaveGate {
    is_auto_saving: bool,
    is_initial_load: bool,
}

impl Default for AutoSaveGate {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoSaveGate {
    /// A fresh gate starts gated: saves are dropped until the initial load
    /// finishes, so hydration never writes back a half-loaded workflow.
    pub fn new() -> Self {
        Self { is_auto_saving: false, is_initial_load: true }
    }

    pub fn is_auto_saving(&self) -> bool {
        self.is_auto_saving
    }

    pub fn is_initial_load(&self) -> bool {
        self.is_initial_load
    }

    pub fn finish_initial_load(&mut self) {
        self.is_initial_load = false;
    }

    /// Marks an externally-driven save as in flight. Returns `false` without
    /// touching any flag when the gate is already closed.
    pub fn begin_external_save(&mut self) -> bool {
        if self.is_auto_saving || self.is_initial_load {
            return false;
        }
        self.is_auto_saving = true;
        true
    }

    pub fn finish_external_save(&mut self) {
        self.is_auto_saving = false;
    }

    /// The save trigger. Drops the request while the gate is closed; runs
    /// the saver otherwise. A failure is caught and logged here, and the
    /// in-flight flag is released on every exit path so a failed save never
    /// wedges the gate.
    pub fn try_save(
        &mut self,
        saver: &mut dyn WorkflowSaver,
        workflow: &Workflow,
    ) -> SaveOutcome {
        if self.is_auto_saving || self.is_initial_load {
            return SaveOutcome::Dropped;
        }

        self.is_auto_saving = true;
        let result = saver.save(workflow);
        self.is_auto_saving = false;

        match result {
            Ok(()) => SaveOutcome::Saved,
            Err(err) => {
                warn!(workflow_id = %workflow.workflow_id(), error = %err, "auto-save failed");
                SaveOutcome::Failed
            }
        }
    }
}
