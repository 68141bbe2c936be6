// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The instruction document: a tree of paragraphs holding literal text runs
//! and atomic mention tokens.
//!
//! The document is persisted as a serialized JSON structural form. A
//! persisted value that fails to parse as structured content hydrates as
//! plain literal text instead; that fallback is deliberate and silent.

mod commands;

pub use commands::DocumentCommands;

use serde::{Deserialize, Serialize};

use crate::model::token::{Token, TokenAttrs};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Mention(Token),
}

impl Inline {
    pub fn as_mention(&self) -> Option<&Token> {
        match self {
            Self::Mention(token) => Some(token),
            Self::Text(_) => None,
        }
    }

    pub fn char_len(&self) -> usize {
        match self {
            Self::Text(text) => text.chars().count(),
            // A mention occupies one caret position: atomic, indivisible.
            Self::Mention(_) => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    content: Vec<Inline>,
}

impl Block {
    pub fn new(content: Vec<Inline>) -> Self {
        Self { content }
    }

    pub fn content(&self) -> &[Inline] {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut Vec<Inline> {
        &mut self.content
    }

    /// Joins adjacent text runs and drops empty ones, so positional editing
    /// always sees at most one text run between two mentions.
    pub fn normalize(&mut self) {
        let mut normalized: Vec<Inline> = Vec::with_capacity(self.content.len());
        for inline in self.content.drain(..) {
            match (&inline, normalized.last_mut()) {
                (Inline::Text(text), _) if text.is_empty() => {}
                (Inline::Text(text), Some(Inline::Text(previous))) => {
                    previous.push_str(text);
                }
                _ => normalized.push(inline),
            }
        }
        self.content = normalized;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document still carries one empty paragraph, matching the
    /// structural form the host editor produces for "no content yet".
    pub fn new() -> Self {
        Self { blocks: vec![Block::default()] }
    }

    pub fn from_plain_text(text: &str) -> Self {
        let blocks = text
            .split('\n')
            .map(|line| {
                if line.is_empty() {
                    Block::default()
                } else {
                    Block::new(vec![Inline::Text(line.to_owned())])
                }
            })
            .collect();
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }

    pub fn mentions(&self) -> impl Iterator<Item = &Token> {
        self.blocks
            .iter()
            .flat_map(|block| block.content().iter())
            .filter_map(Inline::as_mention)
    }

    /// Plain-text rendering using the token grammar, for host previews.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (index, block) in self.blocks.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            for inline in block.content() {
                match inline {
                    Inline::Text(text) => out.push_str(text),
                    Inline::Mention(token) => out.push_str(&token.render()),
                }
            }
        }
        out
    }

    pub fn to_json_string(&self) -> String {
        let json = NodeJson::Doc {
            content: self.blocks.iter().map(block_to_json).collect(),
        };
        serde_json::to_string(&json).expect("document tree serializes")
    }

    /// Hydrates a persisted document. Anything that does not parse as the
    /// structural form becomes one plain literal text document; this is a
    /// fallback, not an error.
    pub fn from_json_string(raw: &str) -> Self {
        match serde_json::from_str::<NodeJson>(raw) {
            Ok(NodeJson::Doc { content }) => {
                let blocks = content
                    .into_iter()
                    .map(json_to_block)
                    .collect::<Option<Vec<_>>>();
                match blocks {
                    Some(blocks) if !blocks.is_empty() => Self { blocks },
                    Some(_) => Self::new(),
                    None => Self::from_plain_text(raw),
                }
            }
            _ => Self::from_plain_text(raw),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum NodeJson {
    Doc {
        #[serde(default)]
        content: Vec<NodeJson>,
    },
    Paragraph {
        #[serde(default)]
        content: Vec<NodeJson>,
    },
    Text {
        text: String,
    },
    Mention {
        attrs: TokenAttrs,
    },
}

fn block_to_json(block: &Block) -> NodeJson {
    NodeJson::Paragraph {
        content: block
            .content()
            .iter()
            .map(|inline| match inline {
                Inline::Text(text) => NodeJson::Text { text: text.clone() },
                Inline::Mention(token) => NodeJson::Mention { attrs: token.to_attrs() },
            })
            .collect(),
    }
}

fn json_to_block(json: NodeJson) -> Option<Block> {
    let NodeJson::Paragraph { content } = json else {
        return None;
    };
    let mut inlines = Vec::with_capacity(content.len());
    for child in content {
        match child {
            NodeJson::Text { text } => inlines.push(Inline::Text(text)),
            NodeJson::Mention { attrs } => {
                inlines.push(Inline::Mention(Token::from_attrs(&attrs).ok()?));
            }
            NodeJson::Doc { .. } | NodeJson::Paragraph { .. } => return None,
        }
    }
    Some(Block::new(inlines))
}

#[cfg(test)]
mod tests;
