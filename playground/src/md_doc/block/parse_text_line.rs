// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use nom::{IResult, Offset, Parser,
          branch::alt,
          bytes::complete::{tag, take_until},
          combinator::rest,
          error::{Error, ErrorKind},
          sequence::terminated};

use crate::{MdNode, MdNodeKind, parse_inline_fragments,
            constants::{CARRIAGE_RETURN_CHAR, NEW_LINE}};

/// Catch-all block parser: one line of prose (possibly empty), parsed into a
/// [`MdNodeKind::Paragraph`] node with inline fragment children. Consumes the line's
/// terminating newline when present; the node's range excludes it. Errors only on
/// empty input, which is what stops the document parser's outer loop.
pub fn parse_text_line(input: &str) -> IResult<&str, MdNode> {
    if input.is_empty() {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Eof)));
    }

    let (remainder, line) = parse_line_to_eol_or_eoi(input)?;
    let line = line.strip_suffix(CARRIAGE_RETURN_CHAR).unwrap_or(line);

    let children = parse_inline_fragments(line);

    Ok((
        remainder,
        MdNode::with_children(
            MdNodeKind::Paragraph,
            (0, input.offset(line) + line.len()),
            children,
        ),
    ))
}

#[rustfmt::skip]
fn parse_line_to_eol_or_eoi(input: &str) -> IResult<&str, &str> {
    alt((
        terminated(take_until(NEW_LINE), tag(NEW_LINE)),
        rest,
    ))
    .parse(input)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::ByteRange;
    use super::*;

    #[test]
    fn test_parse_text_line_simple() {
        let (remainder, node) = parse_text_line("Something\n").unwrap();
        assert_eq!(remainder, "");
        assert_eq!(node.kind, MdNodeKind::Paragraph);
        assert_eq!(node.range, ByteRange::new(0, 9));
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].kind, MdNodeKind::Plain);
    }

    #[test]
    fn test_parse_text_line_without_newline() {
        let (remainder, node) = parse_text_line("Something").unwrap();
        assert_eq!(remainder, "");
        assert_eq!(node.range, ByteRange::new(0, 9));
    }

    #[test]
    fn test_parse_empty_line() {
        let (remainder, node) = parse_text_line("\nnext").unwrap();
        assert_eq!(remainder, "next");
        assert_eq!(node.range, ByteRange::new(0, 0));
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_parse_crlf_line_excludes_carriage_return() {
        let (remainder, node) = parse_text_line("abc\r\nnext").unwrap();
        assert_eq!(remainder, "next");
        assert_eq!(node.range, ByteRange::new(0, 3));
    }

    #[test]
    fn test_parse_text_line_rejects_empty_input() {
        assert!(parse_text_line("").is_err());
    }
}
