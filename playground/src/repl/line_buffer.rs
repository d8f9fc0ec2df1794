// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Per-stream byte accumulator that decides when a chunk of interpreter output is
//! complete enough to deliver.
//!
//! Raw bytes arrive from a pipe in arbitrary slices: a read may end in the middle of
//! a multi-byte code point, or in the middle of a line the interpreter is still
//! writing. Delivering either would hand a display layer a torn code point or a
//! half-written line to style. So the buffer withholds everything until the whole
//! accumulator decodes cleanly as UTF-8 **and** ends in a line terminator, then
//! flushes it all at once:
//!
//! 1. Append every newly arrived byte slice to the accumulator.
//! 2. Decode the full accumulator. An incomplete multi-byte sequence at the tail
//!    means wait. No flush, no error.
//! 3. Decoded text ending in `\n`, `\r`, or `\r\n` → flush the *entire* decoded
//!    text as a single unit and clear the accumulator.
//! 4. Decoded text without a trailing terminator → keep buffering, deliver nothing.
//!
//! Consequence: a burst containing several complete lines plus an unterminated
//! partial line produces exactly one flush (all complete lines concatenated) and
//! withholds the partial remainder until a later append completes it.

/// One instance per output stream. Holds only bytes not yet delivered; cleared at
/// the same moment it flushes.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buffer: Vec<u8>,
}

impl LineBuffer {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Append newly arrived bytes. Returns the decoded text when this append
    /// completed one or more lines, and `None` while output is still incomplete.
    pub fn append(&mut self, bytes: &[u8]) -> Option<String> {
        self.buffer.extend_from_slice(bytes);

        match std::str::from_utf8(&self.buffer) {
            Ok(text) => {
                if ends_with_line_terminator(text) {
                    let flushed = text.to_string();
                    self.buffer.clear();
                    Some(flushed)
                } else {
                    None
                }
            }
            Err(utf8_error) => {
                // `error_len() == None` marks an incomplete sequence at the tail:
                // more bytes can still make it valid, so wait.
                if utf8_error.error_len().is_none() {
                    return None;
                }
                // Hard-invalid bytes can never become valid by waiting. Once a
                // terminator arrives, decode lossily so a mis-encoded interpreter
                // cannot wedge the stream forever.
                if self.buffer.last().is_some_and(|b| *b == b'\n' || *b == b'\r') {
                    let flushed = String::from_utf8_lossy(&self.buffer).into_owned();
                    self.buffer.clear();
                    Some(flushed)
                } else {
                    None
                }
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }

    /// Number of buffered (withheld) bytes.
    #[must_use]
    pub fn len(&self) -> usize { self.buffer.len() }
}

fn ends_with_line_terminator(text: &str) -> bool {
    matches!(text.chars().last(), Some('\n' | '\r'))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_partial_then_terminated_chunk_flushes_once() {
        let mut buffer = LineBuffer::new();
        assert_eq!(buffer.append(b"ab"), None);
        assert_eq!(buffer.append(b"cd\n"), Some("abcd\n".to_string()));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_multiple_lines_in_one_chunk_flush_as_one_unit() {
        let mut buffer = LineBuffer::new();
        assert_eq!(
            buffer.append(b"line1\nline2\n"),
            Some("line1\nline2\n".to_string())
        );
    }

    #[test]
    fn test_complete_lines_plus_partial_tail_withholds_the_tail() {
        let mut buffer = LineBuffer::new();
        assert_eq!(buffer.append(b"done\npartial"), None);
        assert_eq!(buffer.len(), "done\npartial".len());
        assert_eq!(
            buffer.append(b" line\n"),
            Some("done\npartial line\n".to_string())
        );
    }

    #[test]
    fn test_split_multi_byte_code_point_never_tears() {
        let mut buffer = LineBuffer::new();
        let bytes = "é\n".as_bytes();
        // First byte of the two-byte 'é' alone: incomplete tail, no flush, no error.
        assert_eq!(buffer.append(&bytes[..1]), None);
        // Remaining bytes complete the code point and terminate the line.
        assert_eq!(buffer.append(&bytes[1..]), Some("é\n".to_string()));
    }

    #[test]
    fn test_split_four_byte_emoji_across_three_appends() {
        let mut buffer = LineBuffer::new();
        let bytes = "👋\n".as_bytes();
        assert_eq!(buffer.append(&bytes[..2]), None);
        assert_eq!(buffer.append(&bytes[2..3]), None);
        assert_eq!(buffer.append(&bytes[3..]), Some("👋\n".to_string()));
    }

    #[test]
    fn test_carriage_return_terminators_flush() {
        let mut buffer = LineBuffer::new();
        assert_eq!(buffer.append(b"a\r"), Some("a\r".to_string()));
        assert_eq!(buffer.append(b"b\r\n"), Some("b\r\n".to_string()));
    }

    #[test]
    fn test_unterminated_text_is_withheld() {
        let mut buffer = LineBuffer::new();
        assert_eq!(buffer.append(b"no newline yet"), None);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_hard_invalid_bytes_flush_lossily_on_terminator() {
        let mut buffer = LineBuffer::new();
        // 0xff can never start a valid UTF-8 sequence.
        assert_eq!(buffer.append(&[0x61, 0xff, 0x62]), None);
        let flushed = buffer.append(b"\n").unwrap();
        assert_eq!(flushed, "a\u{fffd}b\n");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_empty_append_is_a_no_op() {
        let mut buffer = LineBuffer::new();
        assert_eq!(buffer.append(b""), None);
        assert!(buffer.is_empty());
    }
}
