//! Transceiver - a from-scratch HTTP/1.1 transport layer.
//!
//! The crate provides a complete HTTP/1.1 message model (ordered header
//! multimap, text/binary/multipart payloads, request/response framing), a
//! one-shot client with TLS support, and a one-connection-per-task server.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod server;

pub use client::Client;
pub use config::ServerConfig;
pub use error::{Error, ParseError, TransportError};
pub use server::{Server, ServerHandle};
