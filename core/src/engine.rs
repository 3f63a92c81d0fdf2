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

//! Owns the construction-time configuration of a rewrite run and sequences
//! `GraphBuilder` → `Scheduler` → `RefRebinder`.
//!
//! `Engine` is a plain value, constructed explicitly by its caller (the CLI,
//! or a test) and torn down by simply dropping it; there is no hidden
//! process-global state.

use crate::error::EngineError;
use crate::graph;
use crate::ref_rebind;
use crate::replacer::Replacer;
use crate::scheduler;
use crate::store::ObjectStore;

/// Summary of a completed rewrite, reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub commits_rewritten: usize,
    pub refs_updated: usize,
}

/// Construction-time configuration for a single rewrite run.
pub struct Engine<'a> {
    store: &'a dyn ObjectStore,
    replacer: Replacer,
    rename_names: bool,
    rewrite_messages: bool,
}

impl<'a> Engine<'a> {
    /// Builds an `Engine` that rewrites in place in `store`: new objects are
    /// written into, and references force-updated on, the very store that
    /// is read from. This is the only destination mode implemented today; a
    /// two-repository mode (reading from one store and writing into a
    /// freshly initialized other one) is an equally valid construction this
    /// type could grow a variant for, but no caller in this crate needs it.
    pub fn new_in_place(store: &'a dyn ObjectStore, replacer: Replacer) -> Self {
        Self {
            store,
            replacer,
            rename_names: false,
            rewrite_messages: true,
        }
    }

    /// Enables rewriting file and directory names inside tree objects.
    pub fn rename_names(mut self, rename_names: bool) -> Self {
        self.rename_names = rename_names;
        self
    }

    /// Controls whether commit messages are rewritten. Enabled by default;
    /// exists mainly so the engine can be exercised with only name-rewriting
    /// active, and so a future content-rewriting flag composes cleanly
    /// without re-threading every call site.
    pub fn rewrite_messages(mut self, rewrite_messages: bool) -> Self {
        self.rewrite_messages = rewrite_messages;
        self
    }

    /// Runs the full rewrite: discovers the reachable commit graph, rewrites
    /// every commit in topological order, and re-anchors every saved
    /// reference onto its rewritten commit.
    #[tracing::instrument(skip(self))]
    pub fn run(&self) -> Result<Summary, EngineError> {
        let graph = graph::build(self.store)?;
        let old_to_new = scheduler::run(
            self.store,
            &self.replacer,
            self.rename_names,
            self.rewrite_messages,
            &graph,
        )?;
        let refs_updated = ref_rebind::run(self.store, &old_to_new, &graph.ref_table)?;
        let summary = Summary {
            commits_rewritten: old_to_new.len(),
            refs_updated,
        };
        tracing::info!(?summary, "rewrite complete");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{commit, id, FakeStore};

    #[test]
    fn end_to_end_rewrite_updates_refs_and_preserves_tree_identity() {
        let mut store = FakeStore::default();
        let a = id(1);
        let b = id(2);
        let c = id(3);
        store.insert_commit(a, commit(vec![]));
        store.insert_commit(b, commit(vec![a]));
        store.insert_commit(c, commit(vec![b]));
        store.branches.push(("refs/heads/main".to_owned(), c));

        let replacer = Replacer::configure("^$", "x").unwrap();
        let engine = Engine::new_in_place(&store, replacer);
        let summary = engine.run().unwrap();

        assert_eq!(summary.commits_rewritten, 3);
        assert_eq!(summary.refs_updated, 1);
        let head = store.resolved_ref("refs/heads/main").unwrap();
        let head_commit = store.read_commit(head).unwrap();
        // No name ever matched, so the tree is structurally shared.
        assert_eq!(head_commit.tree, id(0xee));
    }

    #[test]
    fn name_rewrite_disabled_leaves_trees_byte_identical() {
        let mut store = FakeStore::default();
        let tree = id(0xee);
        store.insert_tree(tree, vec![]);
        let a = id(1);
        store.insert_commit(a, commit(vec![]));
        store.branches.push(("refs/heads/main".to_owned(), a));

        let replacer = Replacer::configure("foo", "bar").unwrap();
        let engine = Engine::new_in_place(&store, replacer).rename_names(false);
        engine.run().unwrap();

        let head = store.resolved_ref("refs/heads/main").unwrap();
        let head_commit = store.read_commit(head).unwrap();
        assert_eq!(head_commit.tree, tree);
    }
}
