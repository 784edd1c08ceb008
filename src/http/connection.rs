use std::time::Duration;

use bytes::{Buf, BytesMut};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::time::{Instant, timeout_at};

use crate::http::encoding::encode_response;
use crate::http::parser::{ParseError, parse_http_request};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::router::Router;

const READ_CHUNK: usize = 4096;

/// Why reading the next request off a connection stopped.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The peer closed the stream between requests. This is how a
    /// persistent connection normally ends.
    #[error("connection closed by peer")]
    ConnectionClosed,
    #[error("connection closed in the middle of a request head")]
    UnexpectedEof,
    #[error("connection closed after {received} of {expected} body bytes")]
    TruncatedBody { expected: usize, received: usize },
    #[error("no complete request within {0:?}")]
    IdleTimeout(Duration),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub enum ConnectionState {
    AwaitingRequest,
    Dispatching(Request),
    /// bool = client asked for `Connection: close`
    WritingResponse(ResponseWriter, bool),
    Closed,
}

/// One accepted connection and its request/response loop.
///
/// Requests are answered strictly one at a time, in arrival order.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    router: Router,
    idle_timeout: Duration,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Router, idle_timeout: Duration) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            state: ConnectionState::AwaitingRequest,
            router,
            idle_timeout,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, ConnectionState::Closed)
    }

    /// Drives the connection until it closes.
    ///
    /// Returns `Ok` when the peer ends the stream between requests or asked
    /// for `Connection: close`; any read, parse or write failure is returned
    /// as an error. Either way the connection is finished.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        while !self.is_closed() {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::AwaitingRequest => match self.read_request().await {
                    Ok(req) => ConnectionState::Dispatching(req),
                    Err(ReadError::ConnectionClosed) => {
                        tracing::debug!("client closed connection");
                        ConnectionState::Closed
                    }
                    Err(e) => return Err(e.into()),
                },

                ConnectionState::Dispatching(req) => {
                    let closing = req.wants_close();

                    let mut response = self.router.dispatch(&req).await;
                    response
                        .headers
                        .insert("Connection", req.header("Connection").unwrap_or(""));
                    encode_response(&mut response, req.accept_encoding());

                    tracing::info!(
                        method = %req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        "request handled"
                    );

                    ConnectionState::WritingResponse(ResponseWriter::new(&response), closing)
                }

                ConnectionState::WritingResponse(mut writer, closing) => {
                    if let Err(e) = writer.write_to_stream(&mut self.stream).await {
                        return Err(anyhow::Error::new(e).context("writing response"));
                    }

                    if closing {
                        tracing::debug!("closing connection on client request");
                        ConnectionState::Closed
                    } else {
                        ConnectionState::AwaitingRequest
                    }
                }

                ConnectionState::Closed => ConnectionState::Closed,
            };
        }

        Ok(())
    }

    /// Reads exactly one request, buffering partial input across reads.
    ///
    /// The idle deadline starts when this is called and covers the whole
    /// request, body included.
    pub async fn read_request(&mut self) -> Result<Request, ReadError> {
        // `None` only when the timeout is too large to represent
        let deadline = Instant::now().checked_add(self.idle_timeout);

        loop {
            let pending = match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(request);
                }
                Err(e) if e.is_incomplete() => e,
                Err(e) => return Err(e.into()),
            };

            self.buffer.reserve(READ_CHUNK);
            let read = self.stream.read_buf(&mut self.buffer);
            let n = match deadline {
                Some(deadline) => match timeout_at(deadline, read).await {
                    Ok(read) => read?,
                    Err(_) => return Err(ReadError::IdleTimeout(self.idle_timeout)),
                },
                None => read.await?,
            };

            if n == 0 {
                return Err(match pending {
                    ParseError::IncompleteBody {
                        expected,
                        available,
                    } => ReadError::TruncatedBody {
                        expected,
                        received: available,
                    },
                    _ if self.buffer.is_empty() => ReadError::ConnectionClosed,
                    _ => ReadError::UnexpectedEof,
                });
            }
        }
    }
}
