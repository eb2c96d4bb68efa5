//! HTTP response representation: status code and message trailer.

use std::fmt;

use crate::error::ParseError;
use crate::http::PROTOCOL_VERSION;
use crate::http::headers::{DATE_HEADER, SERVER_HEADER, http_date};
use crate::http::message::Message;
use crate::http::mime::ContentType;
use crate::http::parser::ByteCursor;
use crate::http::payload::Payload;

/// Product identifier used when a response does not set its own `Server`
/// header.
pub const SERVER_PRODUCT: &str = "Transceiver HTTP Server";

/// Returns the standard reason phrase for a status code, or `"Unknown"`.
pub fn reason_phrase(code: u16) -> &'static str {
    match code {
        100 => "Continue",
        101 => "Switching Protocols",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        206 => "Partial Content",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        413 => "Payload Too Large",
        414 => "URI Too Long",
        415 => "Unsupported Media Type",
        418 => "I'm a teapot",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",
        _ => "Unknown",
    }
}

/// A response: numeric status code + headers/payload.
///
/// The status code is validated when it is set, not deferred to
/// serialization; a `Response` in hand always carries a legal code.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: u16,
    pub message: Message,
}

impl Response {
    /// Builds a response with the given status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use transceiver::http::response::Response;
    /// assert!(Response::new(200).is_ok());
    /// assert!(Response::new(600).is_err());
    /// ```
    pub fn new(status: u16) -> Result<Self, ParseError> {
        if !(100..=599).contains(&status) {
            return Err(ParseError::IllegalStatusCode(status));
        }
        Ok(Self {
            status,
            message: Message::new(),
        })
    }

    /// A 200 OK response with no payload.
    pub fn ok() -> Self {
        Self {
            status: 200,
            message: Message::new(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Replaces the status code, enforcing the 100..=599 range.
    pub fn set_status(&mut self, status: u16) -> Result<(), ParseError> {
        if !(100..=599).contains(&status) {
            return Err(ParseError::IllegalStatusCode(status));
        }
        self.status = status;
        Ok(())
    }

    /// Serializes the status line, recomputes `Date`, ensures a `Server`
    /// header is present, then delegates to the message trailer.
    pub fn write_to(&mut self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(
            format!(
                "{PROTOCOL_VERSION} {} {}\r\n",
                self.status,
                reason_phrase(self.status)
            )
            .as_bytes(),
        );
        self.message.headers.replace(DATE_HEADER, http_date());
        self.message.headers.ensure_present(SERVER_HEADER, SERVER_PRODUCT);
        self.message.write_to(buf);
    }

    /// Parses a complete buffered response.
    ///
    /// A body that opens with `<` is tolerated as a bare legacy HTML
    /// document with no status line or header block: status 200 and an
    /// implied `text/html` content type. Otherwise the status line must
    /// split into at least three tokens, the second being the numeric code.
    pub fn parse(buf: &[u8]) -> Result<Self, ParseError> {
        if buf.first() == Some(&b'<') {
            return Ok(Self::bare_html(buf));
        }

        let mut cursor = ByteCursor::new(buf);
        let status_line = loop {
            match cursor.read_line() {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
                None => return Err(ParseError::MalformedStatusLine(String::new())),
            }
        };

        let tokens: Vec<&str> = status_line.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(ParseError::MalformedStatusLine(status_line));
        }
        let status: u16 = tokens[1]
            .parse()
            .map_err(|_| ParseError::MalformedStatusLine(status_line.clone()))?;
        if !(100..=599).contains(&status) {
            return Err(ParseError::IllegalStatusCode(status));
        }

        let message = Message::parse(&mut cursor)?;
        Ok(Self { status, message })
    }

    fn bare_html(buf: &[u8]) -> Self {
        let mut message = Message::new();
        let text = Payload::parse_text(&mut ByteCursor::new(buf), None);
        message.content = Some(ContentType::new("text", "html"));
        message.payload = Some(text);
        Self {
            status: 200,
            message,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.status, reason_phrase(self.status))?;
        write!(f, "{}", self.message)
    }
}
