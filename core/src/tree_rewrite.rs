// Copyright 2026 The Rehash Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Recursive tree reconstruction with structural sharing.
//!
//! A tree is re-emitted only if some entry in its recursive subtree actually
//! changed; otherwise the source tree's id is returned unchanged. This is the
//! engine's single most important correctness invariant for large
//! repositories: without it, a one-character rename deep in a path would
//! force every tree on the path, and every commit that reaches it, to be
//! recreated even when nothing else about them changed.

use gix::bstr::ByteSlice;
use gix::ObjectId;

use crate::error::EngineError;
use crate::replacer::Replacer;
use crate::store::{EntryKind, ObjectStore, TreeEntry};

/// Rewrites `tree_id` and everything beneath it, renaming entries through
/// `replacer` when `rename_names` is set.
///
/// Returns the id of the rewritten tree (which equals `tree_id` unchanged if
/// nothing underneath it required substitution) and whether anything
/// changed, so a caller rewriting an ancestor tree knows whether to re-emit
/// it too.
pub fn rewrite(
    store: &dyn ObjectStore,
    replacer: &Replacer,
    rename_names: bool,
    tree_id: ObjectId,
) -> Result<(ObjectId, bool), EngineError> {
    let entries = store.read_tree(tree_id)?;
    let mut rewritten = Vec::with_capacity(entries.len());
    let mut any_changed = false;

    for entry in entries {
        let TreeEntry { name, mode, kind, id } = entry;

        let child_id = match kind {
            EntryKind::Tree => {
                let (new_id, child_changed) = rewrite(store, replacer, rename_names, id)?;
                any_changed |= child_changed;
                new_id
            }
            EntryKind::Blob | EntryKind::Commit => id,
            EntryKind::Other => {
                return Err(EngineError::UnsupportedTreeEntry {
                    tree: tree_id,
                    name,
                });
            }
        };

        let name = if rename_names {
            match name.to_str() {
                Ok(name_str) => {
                    let (renamed, count) = replacer.replace(name_str);
                    if count > 0 {
                        any_changed = true;
                    }
                    renamed.into()
                }
                // Non-UTF-8 names cannot be matched against a `&str` pattern;
                // leave them untouched rather than corrupt them.
                Err(_) => name,
            }
        } else {
            name
        };

        rewritten.push(TreeEntry {
            name,
            mode,
            kind,
            id: child_id,
        });
    }

    if any_changed {
        let new_id = store.write_tree(rewritten)?;
        Ok((new_id, true))
    } else {
        Ok((tree_id, false))
    }
}
