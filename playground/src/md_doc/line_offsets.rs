// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use smallvec::smallvec;

use crate::{InlineVec, constants::{CARRIAGE_RETURN_CHAR, NEW_LINE_CHAR}};

/// Byte offsets of every line start in `text`, recognizing `\n`, `\r`, and `\r\n`
/// terminators (a `\r\n` pair counts as one terminator). The first line always starts
/// at offset 0; a trailing terminator contributes a final (empty) line start equal to
/// `text.len()`.
///
/// Display collaborators use this for offset ↔ line/column mapping; nothing in the
/// parsing path depends on it.
#[must_use]
pub fn line_offsets(text: &str) -> InlineVec<usize> {
    let mut acc: InlineVec<usize> = smallvec![0];
    let mut iter = text.char_indices().peekable();
    while let Some((index, ch)) = iter.next() {
        match ch {
            NEW_LINE_CHAR => acc.push(index + 1),
            CARRIAGE_RETURN_CHAR => {
                if !matches!(iter.peek(), Some((_, NEW_LINE_CHAR))) {
                    acc.push(index + 1);
                }
            }
            _ => {}
        }
    }
    acc
}
