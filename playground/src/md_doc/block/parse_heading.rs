// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use nom::{IResult, Offset, Parser,
          branch::alt,
          bytes::complete::{tag, take_until, take_while1},
          combinator::{map, rest},
          sequence::terminated};

use crate::{HeadingLevel, MdNode, MdNodeKind, parse_inline_fragments,
            constants::{CARRIAGE_RETURN_CHAR, HEADING_CHAR, NEW_LINE, SPACE}};

/// Matches the heading tag and text until end of line (or end of input). The heading
/// text is parsed into inline fragment children. Ranges are relative to `input`.
pub fn parse_heading(input: &str) -> IResult<&str, MdNode> {
    let (after_tag, level) = parse_heading_tag(input)?;
    let (remainder, line) = parse_line_to_eol_or_eoi(after_tag)?;
    let line = line.strip_suffix(CARRIAGE_RETURN_CHAR).unwrap_or(line);

    let text_start = input.offset(line);
    let mut children = parse_inline_fragments(line);
    for child in &mut children {
        child.shift_by(text_start);
    }

    Ok((
        remainder,
        MdNode::with_children(
            MdNodeKind::Heading(level),
            (0, text_start + line.len()),
            children,
        ),
    ))
}

/// Matches one or more `#` chars followed by a space, consumes both, and outputs the
/// [`HeadingLevel`].
#[rustfmt::skip]
fn parse_heading_tag(input: &str) -> IResult<&str, HeadingLevel> {
    map(
        terminated(
            /* output `#`+ */ take_while1(|it| it == HEADING_CHAR),
            /* ends with (discarded) */ tag(SPACE),
        ),
        |it: &str| HeadingLevel::from(it.len()),
    )
    .parse(input)
}

/// The heading text: everything up to (and consuming, but not returning) the next
/// newline; or the rest of the input when the document ends without one.
#[rustfmt::skip]
fn parse_line_to_eol_or_eoi(input: &str) -> IResult<&str, &str> {
    alt((
        terminated(take_until(NEW_LINE), tag(NEW_LINE)),
        rest,
    ))
    .parse(input)
}
