// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The token grammar: trigger and closing characters per reference kind.
//!
//! The textual encoding is bit-exact and shared with downstream consumers:
//! `{label}` for variables, `#label` for actions (no closing delimiter),
//! `<label>` for results. When `replace_result_char` is set, results close
//! with `}` instead so that consumers which only understand variable syntax
//! can still resolve them. That asymmetry is a compatibility shim and must
//! be preserved exactly.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReferenceKind {
    Variable,
    Action,
    Result,
}

impl ReferenceKind {
    pub fn trigger_char(self) -> char {
        match self {
            Self::Variable => '{',
            Self::Action => '#',
            Self::Result => '<',
        }
    }

    /// Actions are never wrapped, so their closing character is `None`.
    pub fn closing_char(self, replace_result_char: bool) -> Option<char> {
        match self {
            Self::Variable => Some('}'),
            Self::Action => None,
            Self::Result => Some(if replace_result_char { '}' } else { '>' }),
        }
    }

    pub fn from_trigger(ch: char) -> Option<Self> {
        match ch {
            '{' => Some(Self::Variable),
            '#' => Some(Self::Action),
            '<' => Some(Self::Result),
            _ => None,
        }
    }

    /// The rendering class carried on serialized mention attributes. The
    /// class name encodes the kind as a marker substring, see `from_class`.
    pub fn color_class(self) -> &'static str {
        match self {
            Self::Variable => "mention-variable",
            Self::Action => "mention-action",
            Self::Result => "mention-result",
        }
    }

    /// Inverse of `color_class`, matching on the kind marker substring.
    /// Unknown classes fall back to the variable treatment, never an error.
    pub fn from_class(class: &str) -> Self {
        if class.contains("action") {
            Self::Action
        } else if class.contains("result") {
            Self::Result
        } else {
            Self::Variable
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Variable => "variable",
            Self::Action => "action",
            Self::Result => "result",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
