// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_playground
//!
//! Core of an interactive Markdown playground: prose interleaved with fenced code
//! blocks, where the block under the cursor can be executed against a live
//! interpreter subprocess and its output streamed back.
//!
//! Two pieces make up the core, and they carry all the non-trivial invariants:
//!
//! 1. **Document model** ([`md_doc`]): parses text into an AST and derives an
//!    ordered list of code block descriptors with precise byte ranges. Reparsing is
//!    synchronous and total; ranges are correct under multi-byte text (emoji,
//!    combining marks) because one coordinate unit (UTF-8 byte offsets) is used
//!    end to end, from parser output to cursor lookup.
//!
//! 2. **REPL channel** ([`repl`]): owns a child interpreter process, multiplexes
//!    its stdout/stderr byte streams asynchronously, and frames raw bytes into
//!    complete, safely-decoded, newline-terminated text chunks before delivering
//!    them to per-stream subscriber sinks. A chunk boundary never tears a
//!    multi-byte code point and never exposes a half-written line.
//!
//! The thin orchestrator ([`session`]) wires the two together: text edit → reparse
//! → block list; cursor offset → block lookup → `execute` → interpreter stdin;
//! interpreter output → line buffer → sink.
//!
//! Everything else (window chrome, styling, menus, file persistence, undo) is an
//! external collaborator consuming these interfaces. There is no network protocol,
//! no on-disk format, and no CLI surface here.
//!
//! ```rust,no_run
//! use r3bl_playground::{DocumentKind, OutputSink, PlaygroundSession,
//!                       ReplCommandBuilder};
//!
//! # #[tokio::main]
//! # async fn main() -> miette::Result<()> {
//! let on_stdout: OutputSink = Box::new(|text| print!("{text}"));
//! let on_stderr: OutputSink = Box::new(|text| eprint!("{text}"));
//!
//! let mut session = PlaygroundSession::start(
//!     DocumentKind::Markdown,
//!     ReplCommandBuilder::new("python3").args(["-i", "-q"]),
//!     on_stdout,
//!     on_stderr,
//! )?;
//!
//! session.sync_text("# demo\n```python\nprint(2 + 2)\n```\n");
//! session.execute_block_at(10).ok();
//! # Ok(())
//! # }
//! ```

// Enforce strict error handling in production library code only. Tests are allowed
// to use .unwrap() freely.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach.
pub mod core;
pub mod md_doc;
pub mod repl;
pub mod session;

// Re-export.
pub use core::*;
pub use md_doc::*;
pub use repl::*;
pub use session::*;
