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

//! The `ObjectStore` capability: typed read/write access to commits,
//! trees, blobs, and references.
//!
//! The engine only ever talks to this trait, never to `gix` directly, which
//! is what keeps [`crate::graph`], [`crate::tree_rewrite`], and
//! [`crate::commit_rewrite`] unit-testable against small in-memory fixtures.
//! [`GixStore`] is the concrete, on-disk-Git-backed implementation the CLI
//! wires up.

use gix::bstr::BString;
use gix::ObjectId;

use crate::error::EngineError;

/// A local branch name or other fully-qualified reference name
/// (e.g. `refs/heads/main`).
pub type RefName = String;

/// The coarse object kind a tree entry refers to: trees recurse, blobs and
/// submodule (commit) entries pass through unchanged, anything else is a
/// hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Tree,
    Blob,
    Commit,
    Other,
}

/// One entry of a tree object, in source order.
#[derive(Debug, Clone)]
pub struct TreeEntry {
    pub name: BString,
    pub mode: gix::objs::tree::EntryMode,
    pub kind: EntryKind,
    pub id: ObjectId,
}

/// The fields of a commit the engine needs to read.
#[derive(Debug, Clone)]
pub struct CommitData {
    pub parents: Vec<ObjectId>,
    pub tree: ObjectId,
    pub author: gix::actor::Signature,
    pub committer: gix::actor::Signature,
    pub message: BString,
    /// The Git `encoding` commit header, when present and non-default.
    pub encoding: Option<BString>,
}

/// The fields needed to create a new commit.
#[derive(Debug, Clone)]
pub struct NewCommit {
    pub parents: Vec<ObjectId>,
    pub tree: ObjectId,
    pub author: gix::actor::Signature,
    pub committer: gix::actor::Signature,
    pub message: BString,
    pub encoding: Option<BString>,
}

/// Typed read/write access to the backing object store.
///
/// Every method is synchronous: the engine has no suspension points.
pub trait ObjectStore {
    /// Enumerates local branches as `(ref_name, commit_id)` pairs.
    fn local_branches(&self) -> Result<Vec<(RefName, ObjectId)>, EngineError>;

    /// Reads a commit's author, committer, message, encoding, parents, and
    /// root tree.
    fn read_commit(&self, id: ObjectId) -> Result<CommitData, EngineError>;

    /// Reads a tree's entries in source order.
    fn read_tree(&self, id: ObjectId) -> Result<Vec<TreeEntry>, EngineError>;

    /// Looks up a blob's size in bytes. Not used by the engine today; kept on
    /// the trait because the planned content-rewriting feature will need it.
    fn blob_size(&self, id: ObjectId) -> Result<u64, EngineError>;

    /// Constructs a tree from an ordered sequence of entries and returns its
    /// id. Entries need not be pre-sorted; the implementation is responsible
    /// for storing them in the order the backing format requires.
    fn write_tree(&self, entries: Vec<TreeEntry>) -> Result<ObjectId, EngineError>;

    /// Creates a new commit and returns its id.
    fn write_commit(&self, commit: NewCommit) -> Result<ObjectId, EngineError>;

    /// Creates or force-updates a reference to point at `target`.
    fn update_ref(
        &self,
        name: &str,
        target: ObjectId,
        log_message: &str,
    ) -> Result<(), EngineError>;
}

/// A Git object store backed by a real on-disk repository, accessed through
/// `gix`.
#[derive(Debug)]
pub struct GixStore {
    repo: gix::Repository,
}

impl GixStore {
    /// Opens the repository at `path`.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let repo = gix::open(path).map_err(|err| EngineError::OpenFailure {
            path: path.display().to_string(),
            source: Box::new(err),
        })?;
        Ok(Self { repo })
    }

    /// Returns the underlying `gix::Repository`, e.g. for test fixtures that
    /// want to inspect the result of a rewrite directly.
    pub fn repo(&self) -> &gix::Repository {
        &self.repo
    }
}

/// Converts a borrowed commit signature into an owned one. The raw
/// `time` field is parsed eagerly; a malformed timestamp falls back to the
/// Unix epoch rather than failing the whole read.
fn owned_signature(sig: gix::actor::SignatureRef<'_>) -> gix::actor::Signature {
    gix::actor::Signature {
        name: sig.name.to_owned(),
        email: sig.email.to_owned(),
        time: sig.time().unwrap_or_default(),
    }
}

fn entry_kind_of(mode: gix::objs::tree::EntryMode) -> EntryKind {
    use gix::objs::tree::EntryKind as GixKind;
    match mode.kind() {
        GixKind::Tree => EntryKind::Tree,
        GixKind::Blob | GixKind::BlobExecutable | GixKind::Link => EntryKind::Blob,
        GixKind::Commit => EntryKind::Commit,
    }
}

impl ObjectStore for GixStore {
    #[tracing::instrument(skip(self))]
    fn local_branches(&self) -> Result<Vec<(RefName, ObjectId)>, EngineError> {
        let platform = self.repo.references().map_err(|err| EngineError::OpenFailure {
            path: self.repo.path().display().to_string(),
            source: Box::new(err),
        })?;
        let iter = platform.local_branches().map_err(|err| EngineError::OpenFailure {
            path: self.repo.path().display().to_string(),
            source: Box::new(err),
        })?;
        let mut branches = Vec::new();
        for reference in iter {
            let reference = reference.map_err(|err| EngineError::OpenFailure {
                path: self.repo.path().display().to_string(),
                source: Box::new(err),
            })?;
            let name = reference.name().as_bstr().to_string();
            let id = reference
                .into_fully_peeled_id()
                .map_err(|err| EngineError::OpenFailure {
                    path: name.clone(),
                    source: Box::new(err),
                })?
                .detach();
            branches.push((name, id));
        }
        Ok(branches)
    }

    fn read_commit(&self, id: ObjectId) -> Result<CommitData, EngineError> {
        let lookup_err = |source: Box<dyn std::error::Error + Send + Sync>| EngineError::LookupFailure { id, source };
        let object = self
            .repo
            .find_object(id)
            .map_err(|err| lookup_err(Box::new(err)))?;
        let commit = object
            .try_to_commit_ref()
            .map_err(|err| lookup_err(Box::new(err)))?;
        let parents = commit.parents().collect();
        let author = owned_signature(commit.author());
        let committer = owned_signature(commit.committer());
        let message: BString = commit.message.into();
        let encoding: Option<BString> = commit.encoding.map(Into::into);
        Ok(CommitData {
            parents,
            tree: commit.tree(),
            author,
            committer,
            message,
            encoding,
        })
    }

    fn read_tree(&self, id: ObjectId) -> Result<Vec<TreeEntry>, EngineError> {
        let lookup_err = |source: Box<dyn std::error::Error + Send + Sync>| EngineError::LookupFailure { id, source };
        let tree = self
            .repo
            .find_object(id)
            .map_err(|err| lookup_err(Box::new(err)))?
            .try_into_tree()
            .map_err(|err| lookup_err(Box::new(err)))?;
        let mut entries = Vec::new();
        for entry in tree.iter() {
            let entry = entry.map_err(|err| lookup_err(Box::new(err)))?;
            let name: BString = entry.filename().into();
            entries.push(TreeEntry {
                name,
                mode: entry.mode(),
                kind: entry_kind_of(entry.mode()),
                id: entry.oid().to_owned(),
            });
        }
        Ok(entries)
    }

    fn blob_size(&self, id: ObjectId) -> Result<u64, EngineError> {
        let lookup_err = |source: Box<dyn std::error::Error + Send + Sync>| EngineError::LookupFailure { id, source };
        let header = self
            .repo
            .objects
            .header(id)
            .map_err(|err| lookup_err(Box::new(err)))?;
        Ok(header.size())
    }

    fn write_tree(&self, entries: Vec<TreeEntry>) -> Result<ObjectId, EngineError> {
        let mut gix_entries: Vec<_> = entries
            .into_iter()
            .map(|entry| gix::objs::tree::Entry {
                mode: entry.mode,
                filename: entry.name,
                oid: entry.id,
            })
            .collect();
        gix_entries.sort_unstable();
        self.repo
            .write_object(gix::objs::Tree {
                entries: gix_entries,
            })
            .map(|id| id.detach())
            .map_err(|err| EngineError::CreateFailure {
                object_type: "tree",
                source: Box::new(err),
            })
    }

    fn write_commit(&self, commit: NewCommit) -> Result<ObjectId, EngineError> {
        let new_commit = gix::objs::Commit {
            message: commit.message,
            tree: commit.tree,
            author: commit.author,
            committer: commit.committer,
            encoding: commit.encoding,
            parents: commit.parents.into(),
            extra_headers: Vec::new(),
        };
        self.repo
            .write_object(&new_commit)
            .map(|id| id.detach())
            .map_err(|err| EngineError::CreateFailure {
                object_type: "commit",
                source: Box::new(err),
            })
    }

    #[tracing::instrument(skip(self))]
    fn update_ref(&self, name: &str, target: ObjectId, log_message: &str) -> Result<(), EngineError> {
        let full_name: gix::refs::FullName =
            name.try_into().map_err(|err| EngineError::CreateFailure {
                object_type: "reference",
                source: Box::new(err),
            })?;
        let edit = gix::refs::transaction::RefEdit {
            change: gix::refs::transaction::Change::Update {
                log: gix::refs::transaction::LogChange {
                    message: log_message.into(),
                    ..Default::default()
                },
                expected: gix::refs::transaction::PreviousValue::Any,
                new: gix::refs::Target::Object(target),
            },
            name: full_name,
            deref: false,
        };
        self.repo
            .edit_reference(edit)
            .map_err(|err| EngineError::CreateFailure {
                object_type: "reference",
                source: Box::new(err),
            })?;
        tracing::debug!(%name, %target, "updated reference");
        Ok(())
    }
}
