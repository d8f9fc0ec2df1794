// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use nom::{Offset, Parser, branch::alt};

use crate::{MdDoc, MdNode, MdNodeKind, parse_fenced_code_block, parse_heading,
            parse_text_line};

/// This is the main parser entry point, aka, the root parser. It takes a string slice
/// and returns the [`MdDoc`] that represents the parsed Markdown.
///
/// Total and deterministic: every input (including the empty string and text full of
/// multi-scalar grapheme clusters) produces a document; identical input produces an
/// identical tree with identical ranges. There is no partial or deferred parse.
///
/// Each child of the root corresponds to a block, one of:
/// 1. Fenced code block ([`parse_fenced_code_block`]). An unterminated fence at end
///    of input is recovered as a block whose body runs to end of input.
/// 2. Heading ([`parse_heading`]).
/// 3. Line of prose with inline fragments ([`parse_text_line`]), the catch-all.
///
/// NOTE: The ordering of the parsers matters.
pub fn parse_markdown_doc(text: &str) -> MdDoc {
    let mut children = vec![];
    let mut remainder = text;

    while !remainder.is_empty() {
        let base = text.offset(remainder);
        match alt((parse_fenced_code_block, parse_heading, parse_text_line))
            .parse(remainder)
        {
            Ok((new_remainder, mut node)) => {
                // Every block parser consumes at least one byte of non-empty input;
                // bail if not so the loop is guaranteed to terminate.
                if new_remainder.len() == remainder.len() {
                    break;
                }
                node.shift_by(base);
                children.push(node);
                remainder = new_remainder;
            }
            // Unreachable in practice: parse_text_line accepts any non-empty input.
            Err(_) => break,
        }
    }

    MdDoc::new(MdNode::with_children(
        MdNodeKind::Document,
        (0, text.len()),
        children,
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::ByteRange;
    use super::*;

    fn top_level_kinds(doc: &MdDoc) -> Vec<&MdNodeKind> {
        doc.root.children.iter().map(|n| &n.kind).collect()
    }

    #[test]
    fn test_empty_text() {
        let doc = parse_markdown_doc("");
        assert_eq!(doc.root.kind, MdNodeKind::Document);
        assert_eq!(doc.root.range, ByteRange::new(0, 0));
        assert!(doc.root.children.is_empty());
    }

    #[test]
    fn test_single_line_no_newline() {
        let doc = parse_markdown_doc("Something");
        assert_eq!(top_level_kinds(&doc), vec![&MdNodeKind::Paragraph]);
    }

    #[test]
    fn test_block_ranges_are_document_absolute() {
        let input = "# T\n```rs\nx\n```\n";
        let doc = parse_markdown_doc(input);

        assert_eq!(doc.root.children.len(), 2);

        let heading = &doc.root.children[0];
        assert_eq!(heading.kind, MdNodeKind::Heading(1.into()));
        assert_eq!(heading.range, ByteRange::new(0, 3));
        assert_eq!(heading.children[0].range.slice_of(input), "T");

        let fence = &doc.root.children[1];
        assert_eq!(fence.range, ByteRange::new(4, 15));
        let MdNodeKind::CodeBlock { lang, body } = fence.kind else {
            panic!("expected code block node");
        };
        assert_eq!(lang.unwrap().slice_of(input), "rs");
        assert_eq!(body.slice_of(input), "x\n");
    }

    #[test]
    fn test_document_mixing_all_block_kinds() {
        let input = [
            "# Foobar",
            "",
            "Foobar is a Python library for dealing with word pluralization.",
            "",
            "```bash",
            "pip install foobar",
            "```",
            "## Installation",
            "Use *pip* to install `foobar`.",
            "",
        ]
        .join("\n");
        let doc = parse_markdown_doc(&input);

        let kinds: Vec<_> = doc
            .root
            .children
            .iter()
            .map(|n| std::mem::discriminant(&n.kind))
            .collect();
        assert_eq!(doc.root.children.len(), 7);
        // Two headings, four paragraphs (two of them empty lines), one code block.
        assert_eq!(
            kinds.iter().filter(|d| {
                **d == std::mem::discriminant(&MdNodeKind::Heading(1.into()))
            }).count(),
            2
        );

        // Blocks tile the document in order: ranges are non-overlapping, ordered,
        // and in-bounds.
        let mut previous_end = 0;
        for child in &doc.root.children {
            assert!(child.range.start >= previous_end);
            assert!(child.range.end <= input.len());
            previous_end = child.range.end;
        }
    }

    #[test]
    fn test_parse_is_idempotent() {
        let input = "# a\n```py\nprint(1)\n```\ntail *x*\n";
        assert_eq!(parse_markdown_doc(input), parse_markdown_doc(input));
    }

    #[test]
    fn test_multi_scalar_grapheme_clusters_never_fail() {
        let input = "👨‍👩‍👧‍👦\n```\n🐛 body\n```\n# 🚀 *🎯*\n";
        let doc = parse_markdown_doc(input);
        let mut count = 0;
        doc.root.walk(&mut |node| {
            count += 1;
            assert!(node.range.start <= node.range.end);
            assert!(node.range.end <= input.len());
        });
        assert!(count > 4);
    }

    #[test]
    fn test_lone_trailing_marker_does_not_panic() {
        // Mirrors the out-of-bounds regression from the original editor: a document
        // ending in an unterminated inline marker.
        let doc = parse_markdown_doc("a`");
        assert_eq!(top_level_kinds(&doc), vec![&MdNodeKind::Paragraph]);
        assert_eq!(doc.root.children[0].range, ByteRange::new(0, 2));
    }
}
