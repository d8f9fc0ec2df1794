// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The document: owns the current full text and derives `(AST, code block list)` on
//! demand.
//!
//! Reparsing is synchronous and total: there is no background thread, no debounce,
//! and no partial parse. The AST handed back always corresponds to the most recently
//! submitted text snapshot. This is an accepted latency trade-off for simplicity.

use std::str::FromStr;

use strum_macros::{Display, EnumString};

use crate::{CodeBlock, MdDoc, extract_code_blocks, parse_markdown_doc};

/// Signature of a document-kind parser: total over any valid Unicode input.
pub type DocParseFn = fn(&str) -> MdDoc;

/// Declared document-kind identifier. Resolution to a parser goes through a static
/// factory table fixed at compile time. There is no runtime registration and no
/// type-name-driven dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum DocumentKind {
    Markdown,
}

/// The static factory table. One entry per [`DocumentKind`] variant.
const DOCUMENT_KIND_FACTORY: &[(DocumentKind, DocParseFn)] =
    &[(DocumentKind::Markdown, parse_markdown_doc)];

impl DocumentKind {
    #[must_use]
    pub fn parse_fn(self) -> DocParseFn {
        match DOCUMENT_KIND_FACTORY.iter().find(|(kind, _)| *kind == self) {
            Some((_, parse_fn)) => *parse_fn,
            None => unreachable!("every DocumentKind has a factory table entry"),
        }
    }

    /// Resolve a declared kind identifier (eg: `"markdown"`).
    ///
    /// # Errors
    /// Returns [`DocumentError::UnknownKind`] if the identifier matches no declared
    /// kind.
    pub fn resolve(id: &str) -> Result<Self, DocumentError> {
        Self::from_str(id).map_err(|_| DocumentError::UnknownKind(id.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Raised at the load boundary only: the parse step itself never fails on any
    /// validly encoded Unicode input.
    #[error("document bytes are not valid UTF-8: {0}")]
    MalformedText(#[from] std::string::FromUtf8Error),

    #[error("unknown document kind identifier: {0:?}")]
    UnknownKind(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    kind: DocumentKind,
    text: String,
}

impl Document {
    #[must_use]
    pub fn new(kind: DocumentKind) -> Self {
        Self { kind, text: String::new() }
    }

    #[must_use]
    pub fn from_text(kind: DocumentKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }

    /// The load boundary: decode raw bytes into a document. This is the only place a
    /// malformed-text error can surface.
    ///
    /// # Errors
    /// Returns [`DocumentError::MalformedText`] when `bytes` is not valid UTF-8.
    pub fn from_bytes(kind: DocumentKind, bytes: Vec<u8>) -> Result<Self, DocumentError> {
        let text = String::from_utf8(bytes)?;
        Ok(Self { kind, text })
    }

    #[must_use]
    pub fn kind(&self) -> DocumentKind { self.kind }

    #[must_use]
    pub fn text(&self) -> &str { &self.text }

    /// Replace the full text snapshot. Any previously derived AST or block list is
    /// stale from this point on; the caller discards it and reparses.
    pub fn set_text(&mut self, text: impl Into<String>) { self.text = text.into(); }

    /// Derive `(AST, ordered code block list)` from the current text. Pure and
    /// deterministic: identical text yields an identical tree and identical blocks,
    /// same order, same ranges.
    #[must_use]
    pub fn parse(&self) -> (MdDoc, Vec<CodeBlock>) {
        let parse_fn = self.kind.parse_fn();
        let doc = parse_fn(&self.text);
        let blocks = extract_code_blocks(&doc, &self.text);
        (doc, blocks)
    }
}
