//! Error types for the transceiver core.
//!
//! Two disjoint failure kinds surface from this crate:
//!
//! - [`ParseError`]: bytes already received could not be interpreted as a
//!   well-formed HTTP message. Parse failures are routine outcomes of
//!   untrusted input and are modeled as explicit results, never panics.
//! - [`TransportError`]: a failure at the socket/TLS layer before or while
//!   moving bytes, distinct from any protocol-level problem.

use thiserror::Error;

/// Failure to interpret received bytes as a well-formed HTTP message.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The request line did not split into at least verb, path and protocol.
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),

    /// The status line did not split into protocol, code and reason phrase.
    #[error("malformed status line: {0:?}")]
    MalformedStatusLine(String),

    /// A non-blank header line contained no colon.
    #[error("malformed header line: {0:?}")]
    MalformedHeaderLine(String),

    /// A message carries body bytes but no `Content-Type` header.
    #[error("message carries a body but no Content-Type header")]
    MissingContentType,

    /// A multipart content type did not designate a boundary parameter.
    #[error("content type does not designate a multipart boundary")]
    MissingMultipartBoundary,

    /// A status code outside the legal 100..=599 range.
    #[error("illegal HTTP status code {0}")]
    IllegalStatusCode(u16),
}

/// Failure at the socket, DNS or TLS layer.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("socket I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// The request URL has no host component to connect to.
    #[error("request URL has no host")]
    MissingHost,

    /// The URL host is not a valid TLS server name.
    #[error("invalid TLS server name {0:?}")]
    InvalidServerName(String),
}

/// Top-level error for client and server round trips.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Transport(TransportError::Io(err))
    }
}
