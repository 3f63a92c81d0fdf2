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

//! The history-rewrite engine: discovers the reachable commit graph of a
//! Git repository, rewrites every commit and tree entry that matches a
//! caller-supplied substitution, and re-anchors references onto the
//! rewritten history.
//!
//! [`Engine`] is the entry point; everything else in this crate is a
//! component it sequences. The engine never touches `gix` directly — it
//! talks only to the [`ObjectStore`](store::ObjectStore) trait, which keeps
//! [`graph`], [`tree_rewrite`], [`commit_rewrite`], and [`scheduler`]
//! unit-testable against small in-memory fixtures, and [`store::GixStore`]
//! as the one implementation backed by a real on-disk repository.

mod commit_rewrite;
pub mod engine;
pub mod error;
mod graph;
mod ref_rebind;
pub mod replacer;
mod scheduler;
pub mod store;

#[cfg(test)]
mod testutil;

pub use engine::{Engine, Summary};
pub use error::{EngineError, EngineResult};
pub use replacer::Replacer;
pub use store::{GixStore, ObjectStore};
