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

//! Error types for the history-rewrite engine.

use gix::bstr::BString;
use gix::ObjectId;

/// Errors that can occur while configuring or running a rewrite.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("{0}")]
    UsageError(String),

    #[error("failed to open repository at {path}")]
    OpenFailure {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("could not resolve object {id}")]
    LookupFailure {
        id: ObjectId,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("commit {commit} references parent {parent}, which has not been rewritten")]
    MissingParentMapping { commit: ObjectId, parent: ObjectId },

    #[error("tree entry {name} of tree {tree} has an unsupported entry kind")]
    UnsupportedTreeEntry { tree: ObjectId, name: BString },

    #[error("failed to create {object_type} object")]
    CreateFailure {
        object_type: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("reference {name} has no mapping for old commit {old_id}")]
    RefMissingMapping { name: String, old_id: ObjectId },

    #[error("invalid replacement pattern {pattern:?}")]
    ReplacerError {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
