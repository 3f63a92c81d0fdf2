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

//! `rehash`: rewrite commit messages and tree entry names across a Git
//! repository's history by a regular-expression substitution.
//!
//! This binary is a thin driver over [`rehash_core`]: it parses arguments,
//! opens the repository, builds an [`rehash_core::Engine`], runs it, and
//! reports the outcome. All of the interesting behavior lives in the core
//! crate.

use std::process::ExitCode;

use clap::Parser;
use rehash_core::{Engine, EngineError, GixStore, Replacer};

/// Rewrite Git history by applying a regex substitution to commit messages
/// and tree entry names.
#[derive(clap::Parser, Debug)]
#[command(name = "rehash", version, about)]
struct Args {
    /// Repository path.
    #[arg(short = 'd', long = "dir", value_name = "PATH", default_value = ".")]
    dir: String,

    /// Regular-expression pattern to match.
    #[arg(short = 'p', long = "pattern", value_name = "PATTERN")]
    pattern: String,

    /// Replacement text (supports `$name`/`${name}` backreferences).
    #[arg(short = 'r', long = "replacement", value_name = "REPLACEMENT")]
    replacement: String,

    /// Rewrite file and directory names inside tree objects.
    #[arg(short = 'f', long = "rename-files")]
    rename_files: bool,

    /// Rewrite blob contents. Not yet implemented.
    #[arg(short = 'c', long = "rewrite-contents")]
    rewrite_contents: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("REHASH_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // clap prints its own usage message; `-h`/`--help` and
            // `--version` exit 0 through `err.exit()`, everything else is a
            // usage error and should exit 1, not clap's default of 2.
            if err.exit_code() == 0 {
                err.exit();
            }
            eprint!("{err}");
            return ExitCode::FAILURE;
        }
    };
    match run(&args) {
        Ok(summary) => {
            println!(
                "rewrote {} commits, updated {} refs",
                summary.commits_rewritten, summary.refs_updated
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "rehash failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<rehash_core::Summary, EngineError> {
    if args.rewrite_contents {
        return Err(EngineError::UsageError(
            "content rewriting is not implemented".to_owned(),
        ));
    }

    let store = GixStore::open(&args.dir)?;
    let replacer = Replacer::configure(&args.pattern, args.replacement.clone())?;
    let engine = Engine::new_in_place(&store, replacer).rename_names(args.rename_files);
    engine.run()
}
