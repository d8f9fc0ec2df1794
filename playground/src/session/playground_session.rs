// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The orchestrator: wires text-change events to the document model, and cursor
//! position plus block list to the REPL channel.
//!
//! Ownership is one-directional: the session owns the [`Document`] and the
//! [`ReplChannel`]; the channel holds only the sinks it was given at construction.
//! There is no ambient global and no back-reference from either collaborator to the
//! session. One session per open document; independent sessions coexist.

use miette::Result;

use crate::{CodeBlock, Document, DocumentKind, MdDoc, OutputSink, ReplChannel,
            ReplCommandBuilder, ReplError};

#[derive(Debug)]
pub struct PlaygroundSession {
    document: Document,
    code_blocks: Vec<CodeBlock>,
    repl: ReplChannel,
}

impl PlaygroundSession {
    /// Create a session for one document, spawning its interpreter. The sinks route
    /// the two delivery streams to whatever display surface the embedder owns.
    ///
    /// # Errors
    /// Fails when the interpreter cannot be spawned.
    pub fn start(
        document_kind: DocumentKind,
        interpreter: ReplCommandBuilder,
        on_stdout: OutputSink,
        on_stderr: OutputSink,
    ) -> Result<Self> {
        let repl = ReplChannel::start(interpreter, on_stdout, on_stderr)?;
        Ok(Self {
            document: Document::new(document_kind),
            code_blocks: Vec::new(),
            repl,
        })
    }

    /// Handle a text-change event: replace the snapshot and reparse synchronously.
    /// The previous block list is discarded wholesale, since block lists never survive an
    /// edit. Returns the fresh AST for display collaborators (eg: highlighting).
    pub fn sync_text(&mut self, text: impl Into<String>) -> MdDoc {
        self.document.set_text(text);
        let (ast, blocks) = self.document.parse();
        self.code_blocks = blocks;
        ast
    }

    /// Execute the code block under the cursor, if any.
    ///
    /// Resolution picks the first block (document order) whose range contains the
    /// cursor byte offset. A cursor outside every block is not an error: nothing is
    /// submitted and `Ok(None)` is returned. On a hit, the block's verbatim text is
    /// submitted to the interpreter and the block is returned.
    ///
    /// # Errors
    /// Returns [`ReplError::ChannelClosed`] when the channel is terminated.
    pub fn execute_block_at(&self, cursor: usize) -> Result<Option<&CodeBlock>, ReplError> {
        match resolve_block_at(&self.code_blocks, cursor) {
            Some(block) => {
                self.repl.execute(&block.text)?;
                Ok(Some(block))
            }
            None => Ok(None),
        }
    }

    #[must_use]
    pub fn document(&self) -> &Document { &self.document }

    /// The block list derived from the current snapshot, in document order.
    #[must_use]
    pub fn code_blocks(&self) -> &[CodeBlock] { &self.code_blocks }

    #[must_use]
    pub fn is_terminated(&self) -> bool { self.repl.is_terminated() }

    /// Tear down the channel. The session's document remains readable afterwards;
    /// only execution is gone.
    pub fn terminate(&mut self) { self.repl.terminate(); }
}

/// First block in document order whose half-open range contains `cursor`. The
/// containment convention is the extractor's own: both sides share [`crate::ByteRange`].
#[must_use]
pub fn resolve_block_at(blocks: &[CodeBlock], cursor: usize) -> Option<&CodeBlock> {
    blocks.iter().find(|block| block.range.contains(cursor))
}
