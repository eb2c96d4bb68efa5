//! Blocking-style HTTP client: one synchronous round trip per call.
//!
//! Each `send` resolves the target from the request URL, opens a fresh plain
//! or TLS connection, writes the serialized request, reads and parses the
//! response, and drops the socket. There is no retry, no redirect following,
//! and no connection reuse; concurrent callers are fully independent.

use std::sync::Arc;

use bytes::BytesMut;
use rustls::pki_types::ServerName;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tracing::{debug, trace};

use crate::error::{Error, TransportError};
use crate::http::parser::{content_length_hint, find_headers_end};
use crate::http::request::Request;
use crate::http::response::Response;

const BUFFER_SIZE: usize = 8192;

/// An HTTP/1.1 client over plain TCP or rustls-backed TLS.
pub struct Client {
    tls: TlsConnector,
}

impl Client {
    /// Builds a client whose TLS configuration trusts the webpki root set.
    pub fn new() -> Self {
        let mut roots = rustls::RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        let config = rustls::ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth();
        Self {
            tls: TlsConnector::from(Arc::new(config)),
        }
    }

    /// Performs one request/response round trip.
    ///
    /// The port defaults to 443 for `https` URLs and 80 otherwise when the
    /// URL carries no explicit port. Transport failures and parse failures
    /// stay distinct in the returned error.
    pub async fn send(&self, request: &mut Request) -> Result<Response, Error> {
        let secure = request.is_secure();
        let host = request
            .url
            .host_str()
            .ok_or(TransportError::MissingHost)?
            .to_string();
        let port = request
            .url
            .port()
            .unwrap_or(if secure { 443 } else { 80 });

        debug!(host = %host, port, secure, method = %request.method, "connecting");
        let stream = TcpStream::connect((host.as_str(), port))
            .await
            .map_err(TransportError::Io)?;

        if secure {
            let name = ServerName::try_from(host.clone())
                .map_err(|_| TransportError::InvalidServerName(host.clone()))?;
            let mut stream = self
                .tls
                .connect(name, stream)
                .await
                .map_err(TransportError::Io)?;
            round_trip(&mut stream, request).await
        } else {
            let mut stream = stream;
            round_trip(&mut stream, request).await
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

async fn round_trip<S>(stream: &mut S, request: &mut Request) -> Result<Response, Error>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut wire = Vec::new();
    request.write_to(&mut wire);
    stream.write_all(&wire).await.map_err(TransportError::Io)?;
    stream.flush().await.map_err(TransportError::Io)?;
    trace!(bytes = wire.len(), "request flushed");

    let raw = read_response_bytes(stream).await?;
    let response = Response::parse(&raw)?;
    debug!(status = response.status(), "response received");
    Ok(response)
}

/// Accumulates the response. A `Content-Length` header bounds the read;
/// without one the body runs until the server closes the connection.
async fn read_response_bytes<S>(stream: &mut S) -> Result<Vec<u8>, TransportError>
where
    S: AsyncRead + Unpin,
{
    let mut buf = BytesMut::with_capacity(BUFFER_SIZE);
    loop {
        let n = stream.read_buf(&mut buf).await?;
        if n == 0 {
            break;
        }
        if let Some(end) = find_headers_end(&buf) {
            if let Some(declared) = content_length_hint(&buf[..end]) {
                let complete = (end + 4).checked_add(declared).ok_or_else(|| {
                    TransportError::Io(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "declared content length overflows",
                    ))
                })?;
                if buf.len() >= complete {
                    buf.truncate(complete);
                    break;
                }
            }
        }
    }
    Ok(buf.to_vec())
}
