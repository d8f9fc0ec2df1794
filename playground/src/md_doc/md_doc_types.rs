// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Types produced by a successful parse operation [`crate::parse_markdown_doc()`].
//!
//! The AST is a tree: a single [`MdNodeKind::Document`] root whose ordered children
//! are block nodes (heading, code block, paragraph), which in turn own inline
//! fragment nodes (strong, emphasis, inline code, plain runs). Every node carries a
//! [`ByteRange`] into the text it was parsed from. The tree is owned in full by the
//! [`MdDoc`] that produced it and is discarded in full on reparse; nodes never
//! outlive their parse.

use crate::ByteRange;

/// A single Markdown document, produced after a successful parse operation. Wraps the
/// root node of the AST.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MdDoc {
    pub root: MdNode,
}

impl MdDoc {
    #[must_use]
    pub fn new(root: MdNode) -> Self { Self { root } }
}

/// One element of the AST: a type tag, a source range, and an ordered sequence of
/// children. No cycles, single root, exclusive ownership down the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MdNode {
    pub kind: MdNodeKind,
    pub range: ByteRange,
    pub children: Vec<MdNode>,
}

impl MdNode {
    #[must_use]
    pub fn new(kind: MdNodeKind, range: impl Into<ByteRange>) -> Self {
        Self { kind, range: range.into(), children: Vec::new() }
    }

    #[must_use]
    pub fn with_children(
        kind: MdNodeKind,
        range: impl Into<ByteRange>,
        children: Vec<MdNode>,
    ) -> Self {
        Self { kind, range: range.into(), children }
    }

    /// Visit this node and all descendants, depth-first, in document order.
    pub fn walk(&self, visit: &mut impl FnMut(&MdNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Re-base this subtree's ranges (including the ranges embedded in
    /// [`MdNodeKind::CodeBlock`]) forward by `delta` bytes. Block parsers emit ranges
    /// relative to their own input slice; the document parser shifts each block onto
    /// document coordinates.
    pub fn shift_by(&mut self, delta: usize) {
        self.range.shift_by(delta);
        if let MdNodeKind::CodeBlock { lang, body } = &mut self.kind {
            if let Some(lang_range) = lang {
                lang_range.shift_by(delta);
            }
            body.shift_by(delta);
        }
        for child in &mut self.children {
            child.shift_by(delta);
        }
    }
}

/// Type tag for an AST node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MdNodeKind {
    /// Root of the tree. Exactly one per parse.
    Document,
    Heading(HeadingLevel),
    Paragraph,
    /// Fenced code block. `lang` is the range of the info string (if any), `body` the
    /// range of the verbatim fence body. Both lie inside the node's own range.
    CodeBlock {
        lang: Option<ByteRange>,
        body: ByteRange,
    },
    /// `**bold**`.
    Strong,
    /// `*italic*` or `_italic_`.
    Emphasis,
    /// `` `code` ``.
    InlineCode,
    /// A run of text with no markup.
    Plain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeadingLevel {
    pub level: usize,
}

impl From<usize> for HeadingLevel {
    fn from(level: usize) -> Self { Self { level } }
}

impl From<HeadingLevel> for usize {
    fn from(other: HeadingLevel) -> Self { other.level }
}

/// Derived descriptor of one fenced code block: the executable unit of the document.
/// Not persisted across parses: a reparse invalidates every previously extracted
/// block, and discarding stale lists is the caller's responsibility.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
    /// Byte range of the whole fence (opening marker through closing marker), in the
    /// same unit cursor lookups use.
    pub range: ByteRange,
    /// Verbatim fence body, including its trailing newline when present.
    pub text: String,
    /// Language tag from the fence's info string.
    pub lang: Option<String>,
}

/// All the Markdown literals used to perform parsing.
pub mod constants {
    pub const CODE_FENCE: &str = "```";
    pub const HEADING_CHAR: char = '#';
    pub const SPACE: &str = " ";
    pub const NEW_LINE: &str = "\n";
    pub const NEW_LINE_CHAR: char = '\n';
    pub const CARRIAGE_RETURN_CHAR: char = '\r';
    pub const STAR: &str = "*";
    pub const STAR_STAR: &str = "**";
    pub const UNDERSCORE: &str = "_";
    pub const BACK_TICK: &str = "`";

    /// Characters that terminate a plain text run inside a single line.
    pub const INLINE_SPECIAL_CHARS: &str = "*_`\n";
}
