//! HTTP request representation: verb, target URL, and message trailer.

use std::fmt;

use url::Url;

use crate::error::ParseError;
use crate::http::PROTOCOL_VERSION;
use crate::http::headers::{CONTENT_LENGTH_HEADER, DATE_HEADER, HOST_HEADER, http_date};
use crate::http::message::Message;
use crate::http::parser::ByteCursor;

/// The HTTP method of a request.
///
/// Unknown verbs are stored as-is rather than rejected; deciding whether to
/// serve them is the handler's concern, not the parser's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
    Trace,
    Connect,
    Other(String),
}

impl Method {
    pub fn parse(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "HEAD" => Method::Head,
            "OPTIONS" => Method::Options,
            "PATCH" => Method::Patch,
            "TRACE" => Method::Trace,
            "CONNECT" => Method::Connect,
            other => Method::Other(other.to_string()),
        }
    }

    /// Whether requests with this verb carry an entity body, which in turn
    /// decides whether `Content-Length` is computed at send time.
    pub fn carries_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Patch => "PATCH",
            Method::Trace => "TRACE",
            Method::Connect => "CONNECT",
            Method::Other(token) => token,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request: verb + target URL + headers/payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub message: Message,
}

impl Request {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            message: Message::new(),
        }
    }

    /// Derived from the URL scheme, never stored independently.
    pub fn is_secure(&self) -> bool {
        self.url.scheme() == "https"
    }

    /// The request-line target: path plus query, never empty.
    fn request_target(&self) -> String {
        let mut target = self.url.path().to_string();
        if target.is_empty() {
            target.push('/');
        }
        if let Some(query) = self.url.query() {
            target.push('?');
            target.push_str(query);
        }
        target
    }

    fn authority(&self) -> String {
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    /// Serializes the request line, derives the computed headers (`Host`,
    /// `Date`, and `Content-Length` for body-carrying verbs), then delegates
    /// to the message trailer.
    pub fn write_to(&mut self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(
            format!("{} {} {PROTOCOL_VERSION}\r\n", self.method, self.request_target()).as_bytes(),
        );
        self.message.headers.replace(HOST_HEADER, self.authority());
        self.message.headers.replace(DATE_HEADER, http_date());
        if self.method.carries_body() && self.message.payload.is_some() {
            self.message
                .headers
                .replace(CONTENT_LENGTH_HEADER, self.message.body_len().to_string());
        }
        self.message.write_to(buf);
    }

    /// Parses a complete buffered request.
    ///
    /// Blank lines before the request line are skipped; the line must then
    /// split into at least verb, path and protocol tokens. The full URL is
    /// rebuilt from the `Host` header and the path (the server side only
    /// speaks plain HTTP, so the scheme is `http`).
    pub fn parse(buf: &[u8]) -> Result<Self, ParseError> {
        let mut cursor = ByteCursor::new(buf);
        let request_line = loop {
            match cursor.read_line() {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
                None => return Err(ParseError::MalformedRequestLine(String::new())),
            }
        };

        let tokens: Vec<&str> = request_line.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(ParseError::MalformedRequestLine(request_line));
        }
        let method = Method::parse(tokens[0]);
        let path = tokens[1];

        let message = Message::parse(&mut cursor)?;
        let host = message.headers.first(HOST_HEADER).unwrap_or("localhost");
        let url = Url::parse(&format!("http://{host}{path}"))
            .map_err(|_| ParseError::MalformedRequestLine(request_line.clone()))?;

        Ok(Self {
            method,
            url,
            message,
        })
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.method, self.url)?;
        write!(f, "{}", self.message)
    }
}
