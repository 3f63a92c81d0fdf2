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

//! Drives the topological traversal over the commit graph, dispatching each
//! ready commit to [`crate::commit_rewrite`] exactly once.

use std::collections::{HashMap, HashSet, VecDeque};

use gix::ObjectId;

use crate::commit_rewrite;
use crate::error::EngineError;
use crate::graph::Graph;
use crate::replacer::Replacer;
use crate::store::ObjectStore;

/// Rewrites every commit in `graph` in topological order and returns the
/// `old id -> new id` mapping, total over `graph.reachable()`.
///
/// A commit is dispatched once every one of its parents has already been
/// rewritten; the initial `Pending` queue is seeded with `graph.roots`, and
/// each commit's children are re-examined for readiness as soon as it
/// completes.
#[tracing::instrument(skip(store, replacer, graph))]
pub fn run(
    store: &dyn ObjectStore,
    replacer: &Replacer,
    rename_names: bool,
    rewrite_messages: bool,
    graph: &Graph,
) -> Result<HashMap<ObjectId, ObjectId>, EngineError> {
    let mut old_to_new: HashMap<ObjectId, ObjectId> = HashMap::with_capacity(graph.parents_of.len());
    let mut pending: VecDeque<ObjectId> = graph.roots.iter().copied().collect();
    let mut queued: HashSet<ObjectId> = graph.roots.iter().copied().collect();

    while let Some(commit_id) = pending.pop_front() {
        let commit = store.read_commit(commit_id)?;
        let new_id = commit_rewrite::rewrite(
            store,
            replacer,
            rename_names,
            rewrite_messages,
            &old_to_new,
            commit_id,
            commit,
        )?;
        old_to_new.insert(commit_id, new_id);
        tracing::debug!(old = %commit_id, new = %new_id, "rewrote commit");

        let Some(children) = graph.children_of.get(&commit_id) else {
            continue;
        };
        for &child in children {
            if queued.contains(&child) || old_to_new.contains_key(&child) {
                continue;
            }
            let ready = graph.parents_of[&child]
                .iter()
                .all(|parent| old_to_new.contains_key(parent));
            if ready {
                queued.insert(child);
                pending.push_back(child);
            }
        }
    }

    tracing::info!(commits = old_to_new.len(), "scheduling complete");
    Ok(old_to_new)
}
