//! Low-level parsing support: a byte cursor with line reading, and framing
//! helpers used by the client and server to decide when a buffered message
//! is complete enough to parse.

/// A forward-only cursor over a fully buffered message.
///
/// Lines are newline-terminated with an optional carriage return, which is
/// stripped; the final line of the input may lack a terminator. Parsers that
/// need to stop at a delimiter without consuming it use [`ByteCursor::peek_line`].
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// True once every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// The unconsumed tail of the input.
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Consumes `n` bytes (saturating at the end of input) and returns them.
    pub fn take(&mut self, n: usize) -> &'a [u8] {
        let end = self.pos.saturating_add(n).min(self.buf.len());
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        slice
    }

    fn line_at(&self, start: usize) -> Option<(&'a [u8], usize)> {
        if start >= self.buf.len() {
            return None;
        }
        match self.buf[start..].iter().position(|b| *b == b'\n') {
            Some(idx) => {
                let mut line = &self.buf[start..start + idx];
                if line.last() == Some(&b'\r') {
                    line = &line[..line.len() - 1];
                }
                Some((line, start + idx + 1))
            }
            None => Some((&self.buf[start..], self.buf.len())),
        }
    }

    /// Reads the next line, consuming it.
    pub fn read_line(&mut self) -> Option<String> {
        let (line, next) = self.line_at(self.pos)?;
        self.pos = next;
        Some(String::from_utf8_lossy(line).into_owned())
    }

    /// Looks at the next line without consuming it.
    pub fn peek_line(&self) -> Option<String> {
        self.line_at(self.pos)
            .map(|(line, _)| String::from_utf8_lossy(line).into_owned())
    }

    /// Consumes the line previously returned by [`ByteCursor::peek_line`].
    pub fn consume_line(&mut self) {
        if let Some((_, next)) = self.line_at(self.pos) {
            self.pos = next;
        }
    }
}

/// Locates the end of the header block (the `\r\n\r\n` separator), returning
/// the offset of the separator itself.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|window| window == b"\r\n\r\n")
}

/// Scans a raw header block for a `Content-Length` value.
///
/// Framing only needs the byte count, so this avoids a full header parse on
/// the accept path. Header names are matched case-sensitively, the same as
/// the message-level parser.
pub fn content_length_hint(header_block: &[u8]) -> Option<usize> {
    let text = String::from_utf8_lossy(header_block);
    for line in text.lines() {
        if let Some((name, value)) = line.split_once(':') {
            if name.trim() == "Content-Length" {
                return value.trim().parse().ok();
            }
        }
    }
    None
}
