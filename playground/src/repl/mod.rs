// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! REPL plumbing: one child interpreter process, three piped standard streams, and
//! the line-framing discipline layered on top of the raw byte streams.
//!
//! The wire contract is whatever the interpreter natively accepts on stdin and
//! writes to stdout/stderr; nothing here defines a custom protocol.

// Attach.
pub mod line_buffer;
pub mod repl_channel;
pub mod repl_command;

// Re-export.
pub use line_buffer::*;
pub use repl_channel::*;
pub use repl_command::*;
