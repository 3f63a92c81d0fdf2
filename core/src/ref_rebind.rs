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

//! Re-anchors every saved reference onto its rewritten commit, once
//! scheduling has finished.

use std::collections::HashMap;

use gix::ObjectId;

use crate::error::EngineError;
use crate::store::ObjectStore;

/// Force-updates every `(name, old_id)` pair in `ref_table` to point at
/// `old_to_new[old_id]`, and returns the number of references updated.
///
/// Fails with [`EngineError::RefMissingMapping`] if any `old_id` has no
/// entry in `old_to_new` — that indicates the scheduler did not rewrite
/// every commit a reference points at, which is an engine bug, not a user
/// error, and must not be silently skipped.
#[tracing::instrument(skip(store, old_to_new, ref_table))]
pub fn run(
    store: &dyn ObjectStore,
    old_to_new: &HashMap<ObjectId, ObjectId>,
    ref_table: &[(String, ObjectId)],
) -> Result<usize, EngineError> {
    for (name, old_id) in ref_table {
        let new_id =
            old_to_new
                .get(old_id)
                .copied()
                .ok_or_else(|| EngineError::RefMissingMapping {
                    name: name.clone(),
                    old_id: *old_id,
                })?;
        let log_message = format!("rehash: rewrote {old_id} to {new_id}");
        store.update_ref(name, new_id, &log_message)?;
        tracing::debug!(%name, old = %old_id, new = %new_id, "rebound reference");
    }
    tracing::info!(refs = ref_table.len(), "refs rebound");
    Ok(ref_table.len())
}
