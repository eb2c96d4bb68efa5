//! HTTP server: a single accept loop dispatching each connection to its own
//! supervised task.
//!
//! There is no keep-alive and no connection pool: each task performs exactly
//! one read-parse-handle-write-close cycle and terminates. Stopping the
//! server ends the accept loop and then waits for in-flight connections to
//! drain; the read side of each connection stays blocking with no timeout.

use std::net::SocketAddr;
use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::sync::Notify;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::{Error, TransportError};
use crate::http::headers::SERVER_HEADER;
use crate::http::parser::{content_length_hint, find_headers_end};
use crate::http::request::Request;
use crate::http::response::Response;

/// Upper bound on a request's header block before the connection is dropped.
const MAX_HEADER_BYTES: usize = 64 * 1024;

/// The user-supplied per-request handler.
pub type Handler = Arc<dyn Fn(Request) -> Response + Send + Sync>;

/// Remote control for a running server; cloneable into other tasks.
#[derive(Clone)]
pub struct ServerHandle {
    shutdown: Arc<Notify>,
}

impl ServerHandle {
    /// Signals the accept loop to exit. In-flight connections are drained
    /// by `serve` before it returns.
    pub fn stop(&self) {
        self.shutdown.notify_one();
    }
}

/// A listening socket plus the accept loop that feeds connections to a
/// handler function.
pub struct Server {
    listener: TcpListener,
    config: ServerConfig,
    shutdown: Arc<Notify>,
}

impl Server {
    /// Binds the configured address with the configured backlog.
    pub fn bind(config: ServerConfig) -> Result<Self, TransportError> {
        let addr: SocketAddr = config.bind_addr.parse().map_err(|_| {
            TransportError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address {:?}", config.bind_addr),
            ))
        })?;
        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()?
        } else {
            TcpSocket::new_v6()?
        };
        socket.bind(addr)?;
        let listener = socket.listen(config.backlog)?;
        Ok(Self {
            listener,
            config,
            shutdown: Arc::new(Notify::new()),
        })
    }

    /// The bound address, useful when listening on an ephemeral port.
    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        Ok(self.listener.local_addr()?)
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Runs the accept loop until [`ServerHandle::stop`] is called.
    ///
    /// Each accepted connection is parsed, handed to `handler`, answered,
    /// and closed within its own task. A parse or transport failure on one
    /// connection is logged and drops that connection without a response;
    /// it never stops the loop.
    pub async fn serve<F>(self, handler: F) -> Result<(), TransportError>
    where
        F: Fn(Request) -> Response + Send + Sync + 'static,
    {
        let handler: Handler = Arc::new(handler);
        let server_name = self.config.server_name.clone();
        let mut connections = JoinSet::new();
        info!("listening on {}", self.listener.local_addr()?);

        loop {
            tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("discontinuing service");
                    break;
                }
                accepted = self.listener.accept() => {
                    let (stream, peer) = accepted?;
                    let handler = handler.clone();
                    let server_name = server_name.clone();
                    connections.spawn(async move {
                        if let Err(e) = handle_connection(stream, peer, handler, &server_name).await {
                            warn!(peer = %peer, error = %e, "connection dropped");
                        }
                    });
                }
            }
        }

        while connections.join_next().await.is_some() {}
        Ok(())
    }
}

/// One full request/response cycle on an accepted connection.
async fn handle_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    handler: Handler,
    server_name: &str,
) -> Result<(), Error> {
    let raw = match read_request_bytes(&mut stream).await? {
        Some(raw) => raw,
        // Peer connected and closed without sending anything.
        None => return Ok(()),
    };

    let request = Request::parse(&raw)?;
    info!(peer = %peer, method = %request.method, path = %request.url.path(), "request received");

    let mut response = handler(request);
    response
        .message
        .headers
        .ensure_present(SERVER_HEADER, server_name);

    let mut wire = Vec::new();
    response.write_to(&mut wire);
    stream.write_all(&wire).await.map_err(TransportError::Io)?;
    stream.flush().await.map_err(TransportError::Io)?;
    stream.shutdown().await.map_err(TransportError::Io)?;
    Ok(())
}

/// Accumulates one complete request: the full header block plus as many body
/// bytes as its `Content-Length` declares. A request without the header is
/// complete at the end of its header block; peer EOF frames whatever has
/// arrived.
async fn read_request_bytes(stream: &mut TcpStream) -> Result<Option<Vec<u8>>, TransportError> {
    let mut buf = BytesMut::with_capacity(4096);
    loop {
        if let Some(end) = find_headers_end(&buf) {
            let declared = content_length_hint(&buf[..end]).unwrap_or(0);
            let complete = (end + 4).checked_add(declared).ok_or_else(|| {
                TransportError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "declared content length overflows",
                ))
            })?;
            if buf.len() >= complete {
                return Ok(Some(buf[..complete].to_vec()));
            }
        } else if buf.len() > MAX_HEADER_BYTES {
            return Err(TransportError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "request header block too large",
            )));
        }

        let n = stream.read_buf(&mut buf).await?;
        if n == 0 {
            if buf.is_empty() {
                return Ok(None);
            }
            return Ok(Some(buf.to_vec()));
        }
    }
}
