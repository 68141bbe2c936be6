// SPDX-FileCopyrightText: 2026 Flowloom Contributors
// SPDX-License-Identifier: LicenseRef-Flowloom-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowloom and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::debug;

use super::{Document, Inline};
use crate::model::ids::{ActionId, MentionId};

/// Imperative commands the host holds on a document, obtained through
/// dependency injection rather than reaching into the tree directly.
///
/// All commands are idempotent and safe to call with zero matches; they
/// return the number of mentions affected.
pub trait DocumentCommands {
    /// Deletes every mention whose durable id matches.
    fn remove_mentions_by_id(&mut self, id: &MentionId) -> usize;

    /// Rewrites the label on every matching mention. Identity and position
    /// stay untouched, so references survive renames.
    fn update_mention_by_id(&mut self, id: &MentionId, new_label: &str) -> usize;

    /// Cascade delete: removes every mention produced by the given action.
    /// Used when the action itself is deleted upstream.
    fn remove_all_mentions_by_action_id(&mut self, action_id: &ActionId) -> usize;
}

impl DocumentCommands for Document {
    fn remove_mentions_by_id(&mut self, id: &MentionId) -> usize {
        let removed = remove_mentions_where(self, |token| token.id() == id);
        debug!(id = %id, removed, "remove_mentions_by_id");
        removed
    }

    fn update_mention_by_id(&mut self, id: &MentionId, new_label: &str) -> usize {
        let mut updated = 0usize;
        for block in self.blocks_mut() {
            for inline in block.content_mut() {
                if let Inline::Mention(token) = inline {
                    if token.id() == id {
                        token.set_label(new_label);
                        updated += 1;
                    }
                }
            }
        }
        debug!(id = %id, updated, "update_mention_by_id");
        updated
    }

    fn remove_all_mentions_by_action_id(&mut self, action_id: &ActionId) -> usize {
        let removed =
            remove_mentions_where(self, |token| token.action_id() == Some(action_id));
        debug!(action_id = %action_id, removed, "remove_all_mentions_by_action_id");
        removed
    }
}

/// Deletions walk blocks and inlines last-to-first so that removing one
/// mention never invalidates the position of a mention still to be removed.
fn remove_mentions_where(
    document: &mut Document,
    matches: impl Fn(&crate::model::token::Token) -> bool,
) -> usize {
    let mut removed = 0usize;
    for block in document.blocks_mut().iter_mut().rev() {
        let content = block.content_mut();
        for index in (0..content.len()).rev() {
            let Inline::Mention(token) = &content[index] else {
                continue;
            };
            if matches(token) {
                content.remove(index);
                removed += 1;
            }
        }
        block.normalize();
    }
    removed
}
