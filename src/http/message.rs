//! The shared core of requests and responses: a header multimap plus an
//! optional payload.
//!
//! The `Content-Type` header is not stored in the header map. It is pulled
//! into a [`ContentType`] descriptor at parse time and re-emitted at
//! serialize time, so the payload variant and the advertised type cannot
//! drift apart.

use std::fmt;

use crate::error::ParseError;
use crate::http::headers::{CONTENT_LENGTH_HEADER, HeaderMap};
use crate::http::mime::{CONTENT_TYPE_HEADER, ContentType};
use crate::http::parser::ByteCursor;
use crate::http::payload::Payload;

/// The payload representation selected for an incoming message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadVariant {
    Text,
    Binary,
    Multipart { boundary: String },
}

/// Headers plus an optional body, the common trailer of both message kinds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    pub headers: HeaderMap,
    pub content: Option<ContentType>,
    pub payload: Option<Payload>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a text payload and the matching content type.
    pub fn set_text(&mut self, content_type: ContentType, text: impl Into<String>) {
        self.content = Some(content_type);
        self.payload = Some(Payload::Text(text.into()));
    }

    /// Attaches a binary payload and the matching content type.
    pub fn set_binary(&mut self, content_type: ContentType, bytes: Vec<u8>) {
        self.content = Some(content_type);
        self.payload = Some(Payload::Binary(bytes));
    }

    /// Attaches a multipart payload; the content type is derived so that the
    /// advertised boundary always matches the one used on the wire.
    pub fn set_multipart(&mut self, subtype: &str, boundary: &str, parts: Vec<Message>) {
        self.content = Some(ContentType::multipart(subtype, boundary));
        self.payload = Some(Payload::Multipart {
            boundary: boundary.to_string(),
            parts,
        });
    }

    /// Selects the payload representation a content type calls for.
    ///
    /// Multipart types must carry a boundary parameter; everything else is
    /// classified through the content-type registry, defaulting to binary.
    pub fn payload_variant_for(content: &ContentType) -> Result<PayloadVariant, ParseError> {
        if content.is_multipart() {
            let boundary = content.multipart_boundary()?;
            return Ok(PayloadVariant::Multipart {
                boundary: boundary.to_string(),
            });
        }
        if content.is_text() {
            Ok(PayloadVariant::Text)
        } else {
            Ok(PayloadVariant::Binary)
        }
    }

    /// Serializes headers (with the content type re-emitted), the blank
    /// separator line, the payload when present and non-empty, and the
    /// trailing CRLF.
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        let mut headers = self.headers.clone();
        if let Some(content) = &self.content {
            headers.replace(CONTENT_TYPE_HEADER, content.header_value());
        }
        headers.write_to(buf);
        if let Some(payload) = &self.payload {
            if !payload.is_empty() {
                payload.write_to(buf);
            }
        }
        buf.extend_from_slice(b"\r\n");
    }

    /// Parses headers, selects the payload variant from the content type,
    /// and delegates to that variant's parser.
    ///
    /// A message with no `Content-Type` header and no body bytes has no
    /// payload; body bytes without a content type are an error. When a
    /// `Content-Length` header is present it bounds the body read; without
    /// one the body runs to the end of the input (connection-close framing).
    pub fn parse(cursor: &mut ByteCursor<'_>) -> Result<Self, ParseError> {
        Self::parse_framed(cursor, true)
    }

    /// Parses a complete in-memory message whose bounds are already exact,
    /// as multipart segment parsing requires. Unlike [`Message::parse`], no
    /// stream-framing CRLF is assumed to trail the body.
    pub fn parse_bytes(buf: &[u8]) -> Result<Self, ParseError> {
        Self::parse_framed(&mut ByteCursor::new(buf), false)
    }

    fn parse_framed(cursor: &mut ByteCursor<'_>, stream_framed: bool) -> Result<Self, ParseError> {
        let mut headers = HeaderMap::parse(cursor)?;
        let content = headers
            .remove(CONTENT_TYPE_HEADER)
            .and_then(|values| values.into_iter().next())
            .map(|value| ContentType::parse(&value));

        let declared_len = headers
            .first(CONTENT_LENGTH_HEADER)
            .and_then(|value| value.parse::<usize>().ok());
        let mut body = match declared_len {
            Some(len) => cursor.take(len),
            None => cursor.take(usize::MAX),
        };

        let Some(content) = content else {
            if body.iter().all(|b| matches!(b, b'\r' | b'\n')) {
                return Ok(Self {
                    headers,
                    content: None,
                    payload: None,
                });
            }
            return Err(ParseError::MissingContentType);
        };

        let variant = Self::payload_variant_for(&content)?;
        if stream_framed
            && declared_len.is_none()
            && variant == PayloadVariant::Binary
            && body.ends_with(b"\r\n")
        {
            // Connection-close framing: the serializer's trailing CRLF is
            // not part of a binary body.
            body = &body[..body.len() - 2];
        }

        let mut body_cursor = ByteCursor::new(body);
        let payload = match &variant {
            PayloadVariant::Text => Payload::parse_text(&mut body_cursor, None),
            PayloadVariant::Binary => Payload::parse_binary(&mut body_cursor, None),
            PayloadVariant::Multipart { boundary } => {
                Payload::parse_multipart(&mut body_cursor, boundary)?
            }
        };

        Ok(Self {
            headers,
            content: Some(content),
            payload: Some(payload),
        })
    }

    /// The serialized body length, zero when there is no payload.
    pub fn body_len(&self) -> usize {
        self.payload.as_ref().map(Payload::byte_len).unwrap_or(0)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, values) in self.headers.iter() {
            for value in values {
                writeln!(f, "{name}: {value}")?;
            }
        }
        if let Some(content) = &self.content {
            writeln!(f, "{CONTENT_TYPE_HEADER}: {content}")?;
        }
        match &self.payload {
            Some(payload) => write!(f, "{payload}"),
            None => write!(f, "(no payload)"),
        }
    }
}
