//! HTTP/1.1 message model.
//!
//! This module implements a from-scratch HTTP/1.1 wire format: an ordered
//! header multimap, three payload representations, and the request/response
//! framing shared by the client and server.
//!
//! # Architecture
//!
//! - **`mime`**: the immutable content-type registry and the `Content-Type`
//!   descriptor
//! - **`headers`**: ordered-insertion multimap plus HTTP date synthesis
//! - **`payload`**: the `Text | Binary | Multipart` tagged union
//! - **`message`**: headers + optional payload, the common trailer of both
//!   message kinds
//! - **`request`** / **`response`**: the leading line each kind owns, and
//!   the headers each derives at serialize time
//! - **`parser`**: the byte cursor and framing helpers everything above
//!   parses through
//!
//! # Wire format
//!
//! ```text
//! Request line:  <VERB> <path> HTTP/1.1\r\n
//! Status line:   HTTP/1.1 <code> <reason phrase>\r\n
//! Header line:   <Name>: <value>\r\n        (repeatable per name)
//! Header block terminator: \r\n
//! Body: raw bytes per Content-Type; for multipart,
//!       --<boundary>\r\n<part message> repeated, then --<boundary>--\r\n
//! ```

pub mod headers;
pub mod message;
pub mod mime;
pub mod parser;
pub mod payload;
pub mod request;
pub mod response;

/// The only protocol version this stack speaks.
pub const PROTOCOL_VERSION: &str = "HTTP/1.1";

pub use headers::HeaderMap;
pub use message::Message;
pub use mime::ContentType;
pub use payload::Payload;
pub use request::{Method, Request};
pub use response::Response;
