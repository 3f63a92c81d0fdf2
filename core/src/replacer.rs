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

//! A compiled regular-expression substitution rule.
//!
//! This is deliberately thin — the engine treats substitution as an opaque
//! operation and never inspects the pattern or replacement text itself.

use crate::error::EngineError;

/// A compiled pattern/replacement pair, backed by [`regex::Regex`].
#[derive(Debug, Clone)]
pub struct Replacer {
    pattern: regex::Regex,
    replacement: String,
}

impl Replacer {
    /// Compiles `pattern` and pairs it with `replacement`.
    ///
    /// `replacement` may use `regex`'s `$name`/`${name}` backreference
    /// syntax; it is otherwise treated as a literal string.
    pub fn configure(pattern: &str, replacement: impl Into<String>) -> Result<Self, EngineError> {
        let pattern = regex::Regex::new(pattern).map_err(|source| EngineError::ReplacerError {
            pattern: pattern.to_owned(),
            source,
        })?;
        Ok(Self {
            pattern,
            replacement: replacement.into(),
        })
    }

    /// Performs a global, non-overlapping substitution over `input`.
    ///
    /// Returns the substituted string and the number of matches replaced;
    /// a count of zero means `output == input`.
    pub fn replace(&self, input: &str) -> (String, usize) {
        let count = self.pattern.find_iter(input).count();
        let output = self.pattern.replace_all(input, self.replacement.as_str());
        (output.into_owned(), count)
    }
}
