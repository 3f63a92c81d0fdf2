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

//! Discovers the reachable commit DAG from the set of local branch tips.

use std::collections::{HashMap, HashSet, VecDeque};

use gix::ObjectId;

use crate::error::EngineError;
use crate::store::{ObjectStore, RefName};

/// The graph artifacts `GraphBuilder` produces: `ParentsOf`, `ChildrenOf`,
/// `RefTable`, and `Roots`.
#[derive(Debug, Default)]
pub struct Graph {
    pub parents_of: HashMap<ObjectId, Vec<ObjectId>>,
    pub children_of: HashMap<ObjectId, HashSet<ObjectId>>,
    pub ref_table: Vec<(RefName, ObjectId)>,
    pub roots: HashSet<ObjectId>,
}

impl Graph {
    /// All commit ids discovered by the traversal.
    pub fn reachable(&self) -> impl Iterator<Item = &ObjectId> {
        self.parents_of.keys()
    }
}

/// Walks `store` from every local branch tip and builds the reachable
/// parent/child graph.
#[tracing::instrument(skip(store))]
pub fn build(store: &dyn ObjectStore) -> Result<Graph, EngineError> {
    let branches = store.local_branches()?;

    let mut graph = Graph::default();
    let mut pending: VecDeque<ObjectId> = VecDeque::new();
    let mut queued: HashSet<ObjectId> = HashSet::new();
    let mut done: HashSet<ObjectId> = HashSet::new();

    for (ref_name, tip) in branches {
        graph.ref_table.push((ref_name, tip));
        if queued.insert(tip) {
            pending.push_back(tip);
        }
    }

    while let Some(commit_id) = pending.pop_front() {
        if !done.insert(commit_id) {
            continue;
        }
        let commit = store.read_commit(commit_id)?;
        if commit.parents.is_empty() {
            graph.roots.insert(commit_id);
        }
        let entry = graph.parents_of.entry(commit_id).or_default();
        for parent_id in commit.parents {
            entry.push(parent_id);
            graph
                .children_of
                .entry(parent_id)
                .or_default()
                .insert(commit_id);
            if !done.contains(&parent_id) && queued.insert(parent_id) {
                pending.push_back(parent_id);
            }
        }
    }

    tracing::info!(
        commits = graph.parents_of.len(),
        roots = graph.roots.len(),
        refs = graph.ref_table.len(),
        "graph built"
    );
    Ok(graph)
}
