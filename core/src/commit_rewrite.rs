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

//! Rewrites a single commit once all of its parents have been rewritten.

use std::collections::HashMap;

use gix::bstr::ByteSlice;
use gix::ObjectId;

use crate::error::EngineError;
use crate::replacer::Replacer;
use crate::store::{CommitData, NewCommit, ObjectStore};
use crate::tree_rewrite;

/// The encoding Git treats as the implicit default; a commit with no
/// `encoding` header, or one whose header names this value, is safe to
/// substitute as UTF-8 text.
const DEFAULT_ENCODING: &[u8] = b"UTF-8";

/// Rewrites `commit_id`, whose parents must already be present in
/// `old_to_new`, and returns the new commit's id.
///
/// `rename_names` controls whether tree entries are renamed through
/// `replacer`; `rewrite_messages` controls whether the commit message is.
/// Neither flag affects author, committer, or parent handling.
pub fn rewrite(
    store: &dyn ObjectStore,
    replacer: &Replacer,
    rename_names: bool,
    rewrite_messages: bool,
    old_to_new: &HashMap<ObjectId, ObjectId>,
    commit_id: ObjectId,
    commit: CommitData,
) -> Result<ObjectId, EngineError> {
    let mut new_parents = Vec::with_capacity(commit.parents.len());
    for parent in &commit.parents {
        let new_parent =
            old_to_new
                .get(parent)
                .copied()
                .ok_or_else(|| EngineError::MissingParentMapping {
                    commit: commit_id,
                    parent: *parent,
                })?;
        new_parents.push(new_parent);
    }

    let has_default_encoding = commit
        .encoding
        .as_deref()
        .map_or(true, |encoding| encoding.trim() == DEFAULT_ENCODING);

    let message = if rewrite_messages && has_default_encoding {
        match commit.message.to_str() {
            Ok(text) => replacer.replace(text).0.into(),
            // A non-UTF-8 message with no declared encoding is not safe to
            // run through a `&str` pattern either; leave it untouched.
            Err(_) => commit.message,
        }
    } else {
        commit.message
    };

    let new_tree = if rename_names {
        tree_rewrite::rewrite(store, replacer, true, commit.tree)?.0
    } else {
        commit.tree
    };

    let new_commit = NewCommit {
        parents: new_parents,
        tree: new_tree,
        author: commit.author,
        committer: commit.committer,
        message,
        encoding: commit.encoding,
    };
    store.write_commit(new_commit)
}
