// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A single line of Markdown may have many fragments, eg: `**bold**`, `*italic*`,
//! `` `code` ``, and plain runs in between.
//!
//! As opposed to blocks (like fenced code blocks or headings) which may span multiple
//! lines, fragments live inside exactly one line. The parsers here extract each
//! fragment into an [`MdNode`] whose range is relative to the line they were handed.
//!
//! The order of the parsers matters: the highest priority parser is at the top, and
//! the plain-text catch-all at the bottom. When a specialized parser rejects its
//! input (eg: a `*` with no closing `*` before end of line), the catch-all consumes
//! exactly one character so the loop always makes progress and an unterminated
//! marker degrades to plain text instead of failing the line.

use nom::{IResult, Offset, Parser,
          branch::alt,
          bytes::complete::{is_not, tag, take},
          sequence::delimited};

use crate::{ByteRange, MdNode, MdNodeKind,
            constants::{BACK_TICK, INLINE_SPECIAL_CHARS, STAR, STAR_STAR, UNDERSCORE}};

/// Parse one full line (no newline characters) into fragment nodes. Infallible:
/// any content, including lone markers and multi-scalar grapheme clusters, produces
/// a (possibly empty) fragment list with in-bounds ranges.
pub fn parse_inline_fragments(line: &str) -> Vec<MdNode> {
    let mut acc = vec![];
    let mut remainder = line;
    while !remainder.is_empty() {
        let base = line.offset(remainder);
        match parse_one_fragment(remainder) {
            Ok((new_remainder, mut node)) => {
                // Every fragment parser consumes at least one character; bail if not
                // so the loop is guaranteed to terminate.
                if new_remainder.len() == remainder.len() {
                    break;
                }
                node.shift_by(base);
                acc.push(node);
                remainder = new_remainder;
            }
            Err(_) => break,
        }
    }
    acc
}

#[rustfmt::skip]
fn parse_one_fragment(input: &str) -> IResult<&str, MdNode> {
    alt((
        parse_strong,
        parse_emphasis_star,
        parse_emphasis_underscore,
        parse_inline_code,
        parse_plain,
    ))
    .parse(input)
}

/// Wraps the content of a delimited fragment in a [`MdNodeKind::Plain`] child so the
/// markers belong to the parent node's range but not to the content's.
fn delimited_node(
    input: &str,
    remainder: &str,
    content: &str,
    kind: MdNodeKind,
) -> MdNode {
    let content_start = input.offset(content);
    let content_range = ByteRange::new(content_start, content_start + content.len());
    MdNode::with_children(
        kind,
        (0, input.offset(remainder)),
        vec![MdNode::new(MdNodeKind::Plain, content_range)],
    )
}

fn parse_strong(input: &str) -> IResult<&str, MdNode> {
    let (remainder, content) =
        delimited(tag(STAR_STAR), is_not(INLINE_SPECIAL_CHARS), tag(STAR_STAR))
            .parse(input)?;
    Ok((remainder, delimited_node(input, remainder, content, MdNodeKind::Strong)))
}

fn parse_emphasis_star(input: &str) -> IResult<&str, MdNode> {
    let (remainder, content) =
        delimited(tag(STAR), is_not(INLINE_SPECIAL_CHARS), tag(STAR)).parse(input)?;
    Ok((remainder, delimited_node(input, remainder, content, MdNodeKind::Emphasis)))
}

fn parse_emphasis_underscore(input: &str) -> IResult<&str, MdNode> {
    let (remainder, content) =
        delimited(tag(UNDERSCORE), is_not(INLINE_SPECIAL_CHARS), tag(UNDERSCORE))
            .parse(input)?;
    Ok((remainder, delimited_node(input, remainder, content, MdNodeKind::Emphasis)))
}

fn parse_inline_code(input: &str) -> IResult<&str, MdNode> {
    let (remainder, content) =
        delimited(tag(BACK_TICK), is_not(INLINE_SPECIAL_CHARS), tag(BACK_TICK))
            .parse(input)?;
    Ok((remainder, delimited_node(input, remainder, content, MdNodeKind::InlineCode)))
}

/// Lowest priority catch-all. Matches anything up to the next special character; if
/// the input *starts* with a special character (which the specialized parsers
/// already rejected), consumes that one character as plain text.
fn parse_plain(input: &str) -> IResult<&str, MdNode> {
    let (remainder, content) = match is_not::<&str, &str, nom::error::Error<&str>>(
        INLINE_SPECIAL_CHARS,
    )
    .parse(input)
    {
        Ok(it) => it,
        Err(_) => take(1usize).parse(input)?,
    };
    Ok((
        remainder,
        MdNode::new(MdNodeKind::Plain, (0, content.len())),
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(nodes: &[MdNode]) -> Vec<MdNodeKind> {
        nodes.iter().map(|n| n.kind).collect()
    }

    #[test]
    fn test_parse_plain_only() {
        let line = "just some text";
        let fragments = parse_inline_fragments(line);
        assert_eq!(kinds(&fragments), vec![MdNodeKind::Plain]);
        assert_eq!(fragments[0].range, ByteRange::new(0, line.len()));
    }

    #[test]
    fn test_parse_mixed_fragments() {
        let line = "foo *bar* _baz_ **qux** `quux`";
        let fragments = parse_inline_fragments(line);
        assert_eq!(
            kinds(&fragments),
            vec![
                MdNodeKind::Plain,
                MdNodeKind::Emphasis,
                MdNodeKind::Plain,
                MdNodeKind::Emphasis,
                MdNodeKind::Plain,
                MdNodeKind::Strong,
                MdNodeKind::Plain,
                MdNodeKind::InlineCode,
            ]
        );
        // "*bar*" spans bytes 4..9; its content child spans 5..8.
        assert_eq!(fragments[1].range, ByteRange::new(4, 9));
        assert_eq!(fragments[1].children[0].range, ByteRange::new(5, 8));
        assert_eq!(fragments[1].children[0].range.slice_of(line), "bar");
        // "`quux`" spans the last 6 bytes.
        assert_eq!(fragments[7].range, ByteRange::new(24, 30));
        assert_eq!(fragments[7].children[0].range.slice_of(line), "quux");
    }

    #[test]
    fn test_unterminated_marker_degrades_to_plain() {
        // Mirrors executing a document that ends in a lone backtick.
        let line = "a`";
        let fragments = parse_inline_fragments(line);
        assert_eq!(kinds(&fragments), vec![MdNodeKind::Plain, MdNodeKind::Plain]);
        assert_eq!(fragments[1].range, ByteRange::new(1, 2));
    }

    #[test]
    fn test_leading_unterminated_underscore() {
        let line = "_this should not be italic";
        let fragments = parse_inline_fragments(line);
        assert_eq!(kinds(&fragments), vec![MdNodeKind::Plain, MdNodeKind::Plain]);
        assert_eq!(fragments[0].range.slice_of(line), "_");
        assert_eq!(fragments[1].range.slice_of(line), "this should not be italic");
    }

    #[test]
    fn test_multi_scalar_grapheme_cluster_stays_in_bounds() {
        let line = "👨‍👩‍👧‍👦 *e\u{301}*";
        let fragments = parse_inline_fragments(line);
        for fragment in &fragments {
            assert!(fragment.range.end <= line.len());
            // Ranges always land on char boundaries.
            assert!(line.is_char_boundary(fragment.range.start));
            assert!(line.is_char_boundary(fragment.range.end));
        }
        assert!(matches!(fragments.last().unwrap().kind, MdNodeKind::Emphasis));
    }

    #[test]
    fn test_empty_line_yields_no_fragments() {
        assert!(parse_inline_fragments("").is_empty());
    }
}
