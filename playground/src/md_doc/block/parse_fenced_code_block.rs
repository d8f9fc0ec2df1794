// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use nom::{IResult, Offset, Parser,
          branch::alt,
          bytes::complete::{is_not, tag, take_until},
          combinator::{eof, map, opt, rest},
          sequence::{preceded, terminated}};

use crate::{ByteRange, MdNode, MdNodeKind, constants::{CODE_FENCE, NEW_LINE}};

/// Sample inputs:
///
/// | Scenario                  | Sample input                           |
/// |---------------------------|----------------------------------------|
/// | One line                  | `"```bash\npip install foobar\n```\n"` |
/// | No line                   | `"```\n\n```\n"`                       |
/// | No language               | `"```\npip install foobar\n```\n"`     |
/// | No language, no line      | `"```\n```\n"`                         |
/// | Unterminated at EOI       | `"```bash\npip install foobar"`        |
///
/// An unterminated fence is recovered deliberately: the body runs to end of input and
/// the returned node's ranges stay in-bounds. Ranges in the returned node are relative
/// to `input`; the document parser re-bases them.
pub fn parse_fenced_code_block(input: &str) -> IResult<&str, MdNode> {
    let (after_info, maybe_lang) = parse_fence_info_line(input)?;
    let (after_body, (body, is_terminated)) = parse_fence_body(after_info)?;

    let node_end = input.offset(after_body);
    // Normal case: if there is a newline after the closing fence, consume it since
    // there may or may not be one.
    let (remainder, _) = if is_terminated {
        opt(tag(NEW_LINE)).parse(after_body)?
    } else {
        (after_body, None)
    };

    let lang = maybe_lang.map(|lang_text| {
        let start = input.offset(lang_text);
        ByteRange::new(start, start + lang_text.len())
    });
    let body = {
        let start = input.offset(body);
        ByteRange::new(start, start + body.len())
    };

    Ok((
        remainder,
        MdNode::new(MdNodeKind::CodeBlock { lang, body }, (0, node_end)),
    ))
}

/// Matches the opening fence plus optional info string, through its end of line.
#[rustfmt::skip]
fn parse_fence_info_line(input: &str) -> IResult<&str, Option<&str>> {
    alt((
        // Either - Successfully parse both fence marker & info string.
        map(
            preceded(
                /* prefix - discarded */ tag(CODE_FENCE),
                /* output */
                terminated(
                    /* match */ is_not(NEW_LINE),
                    /* ends with (discarded) */ tag(NEW_LINE),
                ),
            ),
            Some,
        ),
        // Or - No info string.
        map(
            (tag(CODE_FENCE), tag(NEW_LINE)),
            |_| None,
        ),
        // Or - Fence marker is the last line of the document (no newline at all).
        map(
            (tag(CODE_FENCE), opt(is_not(NEW_LINE)), eof),
            |(_, maybe_lang, _)| maybe_lang,
        ),
    ))
    .parse(input)
}

/// Matches the fence body. Returns the verbatim body and whether a closing fence was
/// found; with no closing fence the body is everything up to end of input.
#[rustfmt::skip]
fn parse_fence_body(input: &str) -> IResult<&str, (&str, bool)> {
    alt((
        map(
            terminated(
                take_until(CODE_FENCE),
                /* end (discard) */ tag(CODE_FENCE),
            ),
            |body| (body, true),
        ),
        map(rest, |body| (body, false)),
    ))
    .parse(input)
}
