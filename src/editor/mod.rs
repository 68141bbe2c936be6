// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The document editor facade: live autocomplete over the instruction
//! document plus the imperative command surface exposed to the host.
//!
//! One trigger scan runs per keystroke. A trigger character only opens the
//! suggestion view when preceded by a space, start-of-text, `:` or a quote
//! character; glued to other text it is just a literal character. Every
//! document mutation re-serializes the whole document into the update
//! callback; there are no partial updates.

use std::fmt;

use tracing::debug;

use crate::document::{Block, Document, Inline};
use crate::model::catalog::ActionDescriptor;
use crate::model::grammar::ReferenceKind;
use crate::model::ids::{ActionId, MentionId};
use crate::model::token::Token;
use crate::suggest::{SuggestionItem, SuggestionList};

/// Which reference kinds autocomplete, and how result tokens close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    pub enable_variables: bool,
    pub enable_actions: bool,
    pub enable_results: bool,
    pub replace_result_char: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            enable_variables: true,
            enable_actions: true,
            enable_results: true,
            replace_result_char: false,
        }
    }
}

impl EditorConfig {
    fn kind_enabled(&self, kind: ReferenceKind) -> bool {
        match kind {
            ReferenceKind::Variable => self.enable_variables,
            ReferenceKind::Action => self.enable_actions,
            ReferenceKind::Result => self.enable_results,
        }
    }
}

/// Caret position: a block index plus a slot offset inside the block.
/// Every text character and every mention occupies exactly one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Caret {
    pub block: usize,
    pub position: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
}

/// Open-suggestion state, one per editor at most.
struct SuggestionSession {
    kind: ReferenceKind,
    block: usize,
    /// Slot of the trigger character itself.
    trigger_position: usize,
    query: String,
    selected_index: usize,
    list: SuggestionList,
}

/// Read-only snapshot of the open suggestion view.
pub struct SuggestionView<'a> {
    kind: ReferenceKind,
    query: &'a str,
    selected_index: usize,
    items: Vec<&'a SuggestionItem>,
}

impl<'a> SuggestionView<'a> {
    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    pub fn query(&self) -> &str {
        self.query
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn items(&self) -> &[&'a SuggestionItem] {
        &self.items
    }
}

pub struct Editor {
    document: Document,
    caret: Caret,
    actions: Vec<ActionDescriptor>,
    config: EditorConfig,
    session: Option<SuggestionSession>,
    on_update: Option<Box<dyn FnMut(&str)>>,
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("caret", &self.caret)
            .field("blocks", &self.document.blocks().len())
            .field("suggesting", &self.session.is_some())
            .finish()
    }
}

impl Editor {
    pub fn new(actions: Vec<ActionDescriptor>, config: EditorConfig) -> Self {
        Self::with_document(Document::new(), actions, config)
    }

    /// Wraps an existing (hydrated) document; the caret lands at the end.
    pub fn with_document(
        document: Document,
        actions: Vec<ActionDescriptor>,
        config: EditorConfig,
    ) -> Self {
        let block = document.blocks().len().saturating_sub(1);
        let position = document
            .blocks()
            .last()
            .map(block_slot_len)
            .unwrap_or_default();
        Self {
            document,
            caret: Caret { block, position },
            actions,
            config,
            session: None,
            on_update: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn caret(&self) -> Caret {
        self.caret
    }

    /// Host-driven caret placement, clamped to the document's shape.
    pub fn set_caret(&mut self, caret: Caret) {
        let block = caret.block.min(self.document.blocks().len().saturating_sub(1));
        let position = self
            .document
            .blocks()
            .get(block)
            .map(|b| caret.position.min(block_slot_len(b)))
            .unwrap_or_default();
        self.caret = Caret { block, position };
        self.session = None;
    }

    /// The sole channel through which content escapes: called with the whole
    /// serialized document after every mutation.
    pub fn set_update_callback(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_update = Some(Box::new(callback));
    }

    /// Tears the facade down: closes any open view and detaches the host.
    pub fn destroy(&mut self) {
        self.session = None;
        self.on_update = None;
    }

    pub fn suggestion_view(&self) -> Option<SuggestionView<'_>> {
        let session = self.session.as_ref()?;
        Some(SuggestionView {
            kind: session.kind,
            query: &session.query,
            selected_index: session.selected_index,
            items: session.list.filter(&session.query),
        })
    }

    pub fn insert_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.insert_char(ch);
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        let caret = self.caret;
        let Some(block) = self.document.blocks_mut().get_mut(caret.block) else {
            return;
        };
        let mut units = explode(block);
        let at = caret.position.min(units.len());
        units.insert(at, Unit::Char(ch));
        *block = rebuild(units);
        self.caret.position = at + 1;

        if self.session.is_some() {
            if ch == ' ' {
                self.session = None;
            } else if let Some(session) = self.session.as_mut() {
                session.query.push(ch);
                session.selected_index = 0;
            }
        } else {
            self.scan_for_trigger(ch);
        }
        self.emit_update();
    }

    pub fn backspace(&mut self) {
        let caret = self.caret;
        if caret.position == 0 {
            if caret.block == 0 {
                return;
            }
            // Join this paragraph onto the previous one.
            let removed = self.document.blocks_mut().remove(caret.block);
            let previous = &mut self.document.blocks_mut()[caret.block - 1];
            let landing = block_slot_len(previous);
            previous.content_mut().extend(removed.content().iter().cloned());
            previous.normalize();
            self.caret = Caret { block: caret.block - 1, position: landing };
            self.emit_update();
            return;
        }

        let Some(block) = self.document.blocks_mut().get_mut(caret.block) else {
            return;
        };
        let mut units = explode(block);
        let at = caret.position.min(units.len());
        if at == 0 {
            return;
        }
        // A mention before the caret is deleted whole; it never splits.
        units.remove(at - 1);
        *block = rebuild(units);
        self.caret.position = at - 1;

        let removed_trigger = self
            .session
            .as_ref()
            .is_some_and(|session| at - 1 <= session.trigger_position);
        if removed_trigger {
            // The trigger character itself was deleted.
            self.session = None;
        } else if let Some(session) = self.session.as_mut() {
            if session.query.pop().is_some() {
                session.selected_index = 0;
            }
        }
        self.emit_update();
    }

    /// Keyboard contract while the suggestion view is open. Returns whether
    /// the key was consumed by the view.
    pub fn handle_key(&mut self, key: EditorKey) -> bool {
        if self.session.is_none() {
            return false;
        }
        match key {
            EditorKey::ArrowUp => self.move_selection(-1),
            EditorKey::ArrowDown => self.move_selection(1),
            EditorKey::Enter => self.commit_selected(),
            EditorKey::Escape => self.session = None,
        }
        true
    }

    fn move_selection(&mut self, delta: isize) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let count = session.list.filter(&session.query).len();
        if count == 0 {
            return;
        }
        // Cyclic: both ends wrap, computed modulo the candidate count.
        let current = session.selected_index as isize;
        let count = count as isize;
        session.selected_index = ((current + delta).rem_euclid(count)) as usize;
    }

    fn commit_selected(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        let filtered = session.list.filter(&session.query);
        let Some(item) = filtered.get(session.selected_index) else {
            return;
        };
        let Ok(token) = token_from_item(item, self.config.replace_result_char) else {
            return;
        };

        let Some(block) = self.document.blocks_mut().get_mut(session.block) else {
            return;
        };
        let mut units = explode(block);
        let start = session.trigger_position.min(units.len());
        // Replace the trigger plus the typed query.
        let mut end = (start + 1 + session.query.chars().count()).min(units.len());
        // Swallow a pre-existing following space so commit never doubles it.
        if matches!(units.get(end), Some(Unit::Char(' '))) {
            end += 1;
        }
        units.splice(start..end, [Unit::Mention(token), Unit::Char(' ')]);
        *block = rebuild(units);

        // Caret collapses to just after the inserted space.
        self.caret = Caret { block: session.block, position: start + 2 };
        debug!(kind = %session.kind, label = item.label(), "commit_suggestion");
        self.emit_update();
    }

    fn scan_for_trigger(&mut self, ch: char) {
        let Some(kind) = ReferenceKind::from_trigger(ch) else {
            return;
        };
        if !self.config.kind_enabled(kind) {
            return;
        }
        let trigger_position = self.caret.position - 1;
        let Some(block) = self.document.blocks().get(self.caret.block) else {
            return;
        };
        if !valid_trigger_prefix(block, trigger_position) {
            return;
        }
        debug!(kind = %kind, "open_suggestions");
        self.session = Some(SuggestionSession {
            kind,
            block: self.caret.block,
            trigger_position,
            query: String::new(),
            selected_index: 0,
            list: SuggestionList::from_catalog(&self.actions, kind, self.config.replace_result_char),
        });
    }

    fn emit_update(&mut self) {
        if let Some(callback) = self.on_update.as_mut() {
            callback(&self.document.to_json_string());
        }
    }
}

fn token_from_item(
    item: &SuggestionItem,
    replace_result_char: bool,
) -> Result<Token, crate::model::ids::IdError> {
    let action_id = match item.action_id() {
        Some(raw) => Some(ActionId::new(raw)?),
        None => None,
    };
    Ok(Token::new_with(
        MentionId::new(item.id())?,
        item.value(),
        item.kind(),
        action_id,
        None,
        item.action_name().map(str::to_owned),
        replace_result_char,
    ))
}

/// Only space, start-of-text, `:` or a quote may precede a trigger; a
/// trigger glued to other text (or to a mention) stays literal.
fn valid_trigger_prefix(block: &Block, trigger_position: usize) -> bool {
    if trigger_position == 0 {
        return true;
    }
    match unit_at(block, trigger_position - 1) {
        Some(Unit::Char(ch)) => matches!(ch, ' ' | ':' | '"' | '\''),
        Some(Unit::Mention(_)) => false,
        None => true,
    }
}

enum Unit {
    Char(char),
    Mention(Token),
}

fn explode(block: &Block) -> Vec<Unit> {
    let mut units = Vec::new();
    for inline in block.content() {
        match inline {
            Inline::Text(text) => units.extend(text.chars().map(Unit::Char)),
            Inline::Mention(token) => units.push(Unit::Mention(token.clone())),
        }
    }
    units
}

fn rebuild(units: Vec<Unit>) -> Block {
    let mut content: Vec<Inline> = Vec::new();
    for unit in units {
        match unit {
            Unit::Char(ch) => match content.last_mut() {
                Some(Inline::Text(text)) => text.push(ch),
                _ => content.push(Inline::Text(ch.to_string())),
            },
            Unit::Mention(token) => content.push(Inline::Mention(token)),
        }
    }
    Block::new(content)
}

fn unit_at(block: &Block, position: usize) -> Option<Unit> {
    let mut index = 0usize;
    for inline in block.content() {
        match inline {
            Inline::Text(text) => {
                for ch in text.chars() {
                    if index == position {
                        return Some(Unit::Char(ch));
                    }
                    index += 1;
                }
            }
            Inline::Mention(token) => {
                if index == position {
                    return Some(Unit::Mention(token.clone()));
                }
                index += 1;
            }
        }
    }
    None
}

fn block_slot_len(block: &Block) -> usize {
    block.content().iter().map(Inline::char_len).sum()
}
