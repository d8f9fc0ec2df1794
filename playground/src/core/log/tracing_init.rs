// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Opt-in tracing initialization for consumers of this crate (and its tests).
//!
//! The library itself only *emits* [`tracing`] events; it never installs a global
//! subscriber on its own. Embedding applications that already have a subscriber
//! configured can ignore this module entirely.

use tracing::Level;

/// Install a global `fmt` subscriber writing to stderr at the given max level.
///
/// Writes to stderr rather than stdout so that log output never interleaves with
/// anything a display collaborator may be rendering.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn try_init_tracing(level: Level) -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| miette::miette!("Failed to initialize tracing: {}", e))
}
