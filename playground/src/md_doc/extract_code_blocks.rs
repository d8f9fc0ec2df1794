// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CodeBlock, MdDoc, MdNodeKind};

/// Derive the ordered code block list from a parsed document. The list is totally
/// ordered by document position (depth-first document order) and owns its text, so it
/// can outlive the [`MdDoc`] it came from, though it is only meaningful against the
/// exact text snapshot that was parsed. The caller must discard it on the next edit.
///
/// `text` must be the same text `doc` was parsed from; the parser guarantees every
/// embedded range is in-bounds for it.
#[must_use]
pub fn extract_code_blocks(doc: &MdDoc, text: &str) -> Vec<CodeBlock> {
    let mut acc = vec![];
    doc.root.walk(&mut |node| {
        if let MdNodeKind::CodeBlock { lang, body } = node.kind {
            acc.push(CodeBlock {
                range: node.range,
                text: body.slice_of(text).to_string(),
                lang: lang.map(|it| it.slice_of(text).to_string()),
            });
        }
    });
    acc
}
