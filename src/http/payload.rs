//! Message body representations.
//!
//! A body is exactly one of three variants: UTF-8 text, raw bytes, or a
//! multipart sequence whose parts are themselves full messages. Emptiness is
//! variant-specific: an empty string, a zero-length buffer, or zero parts.

use std::fmt;

use crate::error::ParseError;
use crate::http::message::Message;
use crate::http::parser::ByteCursor;

/// Fallback boundary for multipart payloads assembled without one.
pub const DEFAULT_MULTIPART_BOUNDARY: &str = "X_TRANSCEIVER_BOUNDARY_X";

/// The body of an HTTP message.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// UTF-8 text. An empty string is a valid state, distinct from a
    /// message with no payload at all.
    Text(String),
    /// Arbitrary bytes with an explicit length.
    Binary(Vec<u8>),
    /// An ordered sequence of sub-messages separated on the wire by the
    /// boundary token.
    Multipart {
        boundary: String,
        parts: Vec<Message>,
    },
}

impl Payload {
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Text(content) => content.is_empty(),
            Payload::Binary(content) => content.is_empty(),
            Payload::Multipart { parts, .. } => parts.is_empty(),
        }
    }

    /// The serialized body length in bytes. For multipart payloads this
    /// includes the boundary delimiter lines and terminator.
    pub fn byte_len(&self) -> usize {
        match self {
            Payload::Text(content) => content.len(),
            Payload::Binary(content) => content.len(),
            Payload::Multipart { .. } => {
                let mut scratch = Vec::new();
                self.write_to(&mut scratch);
                scratch.len()
            }
        }
    }

    /// Serializes the body into `buf`.
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        match self {
            Payload::Text(content) => buf.extend_from_slice(content.as_bytes()),
            Payload::Binary(content) => buf.extend_from_slice(content),
            Payload::Multipart { boundary, parts } => {
                for part in parts {
                    buf.extend_from_slice(b"--");
                    buf.extend_from_slice(boundary.as_bytes());
                    buf.extend_from_slice(b"\r\n");
                    part.write_to(buf);
                }
                buf.extend_from_slice(b"--");
                buf.extend_from_slice(boundary.as_bytes());
                buf.extend_from_slice(b"--\r\n");
            }
        }
    }

    /// Reads CRLF-terminated lines until the input ends or a line is exactly
    /// the boundary delimiter (`--boundary` or the `--boundary--`
    /// terminator). The delimiter line is peeked, not consumed.
    pub fn parse_text(cursor: &mut ByteCursor<'_>, boundary: Option<&str>) -> Payload {
        let mut lines = Vec::new();
        while let Some(line) = cursor.peek_line() {
            if let Some(boundary) = boundary {
                if is_delimiter_line(&line, boundary) {
                    break;
                }
            }
            cursor.consume_line();
            lines.push(line);
        }
        Payload::Text(lines.join("\r\n"))
    }

    /// Reads raw bytes until the input ends or, when a boundary is given, an
    /// incremental scan matches the boundary's byte sequence. The matched
    /// bytes are excluded from the content and consumed from the cursor.
    pub fn parse_binary(cursor: &mut ByteCursor<'_>, boundary: Option<&str>) -> Payload {
        let input = cursor.take(usize::MAX);
        let content = match boundary.and_then(|b| find_subslice(input, b.as_bytes())) {
            Some(at) => &input[..at],
            None => input,
        };
        Payload::Binary(content.to_vec())
    }

    /// Consumes the entire remaining input, splits it on line-anchored
    /// boundary delimiter lines, and parses each non-empty segment as an
    /// independent message. Bytes before the first delimiter (the preamble)
    /// are ignored, as is everything after the terminator.
    pub fn parse_multipart(
        cursor: &mut ByteCursor<'_>,
        boundary: &str,
    ) -> Result<Payload, ParseError> {
        let input = cursor.take(usize::MAX);
        let delimiter = format!("--{boundary}");
        let marks = delimiter_marks(input, delimiter.as_bytes());

        let mut parts = Vec::new();
        for (index, mark) in marks.iter().enumerate() {
            if mark.terminator {
                break;
            }
            let segment_end = match marks.get(index + 1) {
                Some(next) => strip_line_break_before(input, next.start),
                None => input.len(),
            };
            let segment = &input[mark.content_start..segment_end];
            if segment.iter().all(|b| b.is_ascii_whitespace()) {
                continue;
            }
            parts.push(Message::parse_bytes(segment)?);
        }

        Ok(Payload::Multipart {
            boundary: boundary.to_string(),
            parts,
        })
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Text(content) if content.is_empty() => write!(f, "text content (empty)"),
            Payload::Text(content) => write!(f, "text content:\r\n{content}"),
            Payload::Binary(content) => write!(f, "binary content: {} bytes", content.len()),
            Payload::Multipart { parts, .. } => {
                write!(f, "multipart content: {} part(s)", parts.len())
            }
        }
    }
}

/// True for a line that is exactly the delimiter or the closing terminator.
/// A substring occurrence inside a longer line never matches.
fn is_delimiter_line(line: &str, boundary: &str) -> bool {
    let stripped = match line.strip_prefix("--") {
        Some(rest) => rest,
        None => return false,
    };
    stripped == boundary || stripped.strip_suffix("--") == Some(boundary)
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

struct DelimiterMark {
    /// Offset of the `--boundary` token.
    start: usize,
    /// Offset just past the delimiter line's terminator.
    content_start: usize,
    terminator: bool,
}

/// Finds every line-anchored occurrence of the delimiter. The `--boundary`
/// token only counts when it sits at the start of a line and is followed by
/// a line break, `--`, or the end of input.
fn delimiter_marks(input: &[u8], delimiter: &[u8]) -> Vec<DelimiterMark> {
    let mut marks = Vec::new();
    let mut from = 0;
    while let Some(rel) = find_subslice(&input[from..], delimiter) {
        let start = from + rel;
        let at_line_start = start == 0 || input[..start].ends_with(b"\n");
        let tail = &input[start + delimiter.len()..];
        let terminator = tail.starts_with(b"--");
        let line_complete =
            terminator || tail.is_empty() || tail.starts_with(b"\r\n") || tail.starts_with(b"\n");

        if !(at_line_start && line_complete) {
            from = start + 1;
            continue;
        }

        let mut content_start = start + delimiter.len();
        if terminator {
            content_start += 2;
        }
        content_start += line_break_len(&input[content_start.min(input.len())..]);
        marks.push(DelimiterMark {
            start,
            content_start,
            terminator,
        });
        from = content_start.max(start + 1);
    }
    marks
}

fn line_break_len(tail: &[u8]) -> usize {
    if tail.starts_with(b"\r\n") {
        2
    } else if tail.starts_with(b"\n") {
        1
    } else {
        0
    }
}

/// Moves a segment end back over the line break that precedes a delimiter,
/// so that the framing CRLF is not mistaken for part content.
fn strip_line_break_before(input: &[u8], delimiter_start: usize) -> usize {
    let head = &input[..delimiter_start];
    if head.ends_with(b"\r\n") {
        delimiter_start - 2
    } else if head.ends_with(b"\n") {
        delimiter_start - 1
    } else {
        delimiter_start
    }
}
