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

//! A tiny in-memory [`ObjectStore`] shared by the unit tests in this crate,
//! so graph, tree, commit, and scheduler logic can be exercised without a
//! real on-disk Git repository.

use std::cell::RefCell;
use std::collections::HashMap;

use gix::ObjectId;

use crate::error::EngineError;
use crate::store::{CommitData, NewCommit, ObjectStore, RefName, TreeEntry};

#[derive(Default)]
pub(crate) struct FakeStore {
    pub commits: RefCell<HashMap<ObjectId, CommitData>>,
    pub trees: RefCell<HashMap<ObjectId, Vec<TreeEntry>>>,
    pub branches: Vec<(RefName, ObjectId)>,
    pub refs: RefCell<HashMap<String, ObjectId>>,
    next_id: RefCell<u8>,
}

impl FakeStore {
    pub(crate) fn insert_commit(&mut self, id: ObjectId, commit: CommitData) {
        self.commits.get_mut().insert(id, commit);
    }

    pub(crate) fn insert_tree(&mut self, id: ObjectId, entries: Vec<TreeEntry>) {
        self.trees.get_mut().insert(id, entries);
    }

    pub(crate) fn resolved_ref(&self, name: &str) -> Option<ObjectId> {
        self.refs.borrow().get(name).copied()
    }

    pub(crate) fn tree(&self, id: ObjectId) -> Vec<TreeEntry> {
        self.trees.borrow()[&id].clone()
    }

    fn fresh_id(&self) -> ObjectId {
        let mut counter = self.next_id.borrow_mut();
        *counter += 1;
        // Distinct, deterministic ids that never collide with the fixed test
        // ids used across this crate's unit tests (which all start with a
        // low byte and are zero-padded).
        let mut bytes = [0xAAu8; 20];
        bytes[19] = *counter;
        ObjectId::from_bytes_or_panic(&bytes)
    }
}

impl ObjectStore for FakeStore {
    fn local_branches(&self) -> Result<Vec<(RefName, ObjectId)>, EngineError> {
        Ok(self.branches.clone())
    }

    fn read_commit(&self, id: ObjectId) -> Result<CommitData, EngineError> {
        self.commits
            .borrow()
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::LookupFailure {
                id,
                source: "no such commit".into(),
            })
    }

    fn read_tree(&self, id: ObjectId) -> Result<Vec<TreeEntry>, EngineError> {
        self.trees
            .borrow()
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::LookupFailure {
                id,
                source: "no such tree".into(),
            })
    }

    fn blob_size(&self, _id: ObjectId) -> Result<u64, EngineError> {
        Ok(0)
    }

    fn write_tree(&self, entries: Vec<TreeEntry>) -> Result<ObjectId, EngineError> {
        let id = self.fresh_id();
        self.trees.borrow_mut().insert(id, entries);
        Ok(id)
    }

    fn write_commit(&self, commit: NewCommit) -> Result<ObjectId, EngineError> {
        let id = self.fresh_id();
        let data = CommitData {
            parents: commit.parents,
            tree: commit.tree,
            author: commit.author,
            committer: commit.committer,
            message: commit.message,
            encoding: commit.encoding,
        };
        self.commits.borrow_mut().insert(id, data);
        Ok(id)
    }

    fn update_ref(&self, name: &str, target: ObjectId, _log_message: &str) -> Result<(), EngineError> {
        self.refs.borrow_mut().insert(name.to_owned(), target);
        Ok(())
    }
}

pub(crate) fn id(byte: u8) -> ObjectId {
    let mut bytes = [0u8; 20];
    bytes[0] = byte;
    ObjectId::from_bytes_or_panic(&bytes)
}

pub(crate) fn sig(name: &str) -> gix::actor::Signature {
    gix::actor::Signature {
        name: name.into(),
        email: format!("{name}@example.com").into(),
        time: gix::date::Time::new(0, 0),
    }
}

pub(crate) fn commit(parents: Vec<ObjectId>) -> CommitData {
    CommitData {
        parents,
        tree: id(0xee),
        author: sig("author"),
        committer: sig("committer"),
        message: "msg".into(),
        encoding: None,
    }
}
