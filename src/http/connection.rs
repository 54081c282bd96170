use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::error::HttpError;
use crate::http::parser::{parse_with_limits, Limits, ParseError};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::routing::Router;

const READ_CHUNK: usize = 4096;

/// One accepted connection, served for exactly one request/response exchange.
///
/// The stream is owned by the connection and dropped when `run` returns, on
/// every path.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    router: Arc<Router>,
    limits: Limits,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>) -> Self {
        Self::with_limits(stream, router, Limits::default())
    }

    pub fn with_limits(stream: S, router: Arc<Router>, limits: Limits) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            router,
            limits,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        Some(Ok(req)) => ConnectionState::Processing(req),
                        // The router never sees a request that failed to parse.
                        Some(Err(e)) => {
                            tracing::warn!(error = %e, "Rejecting malformed request");
                            let response = HttpError::from(e).into_response();
                            ConnectionState::Writing(ResponseWriter::new(&response))
                        }
                        None => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(req) => {
                    let response = self.router.dispatch(&req);
                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    // No keep-alive: one exchange, then close.
                    if let Err(e) = self.stream.shutdown().await {
                        tracing::debug!(error = %e, "Shutdown after response failed");
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until a full request is buffered.
    ///
    /// `Ok(None)` means the peer closed without sending anything. A close in
    /// the middle of a request is a transport error.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Result<Request, ParseError>>> {
        loop {
            match parse_with_limits(&self.buffer, &self.limits) {
                Ok((request, consumed)) => {
                    let _ = self.buffer.split_to(consumed);
                    return Ok(Some(Ok(request)));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => return Ok(Some(Err(e))),
            }

            self.buffer.reserve(READ_CHUNK);
            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                anyhow::bail!(
                    "connection closed after {} bytes of an incomplete request",
                    self.buffer.len()
                );
            }
        }
    }
}
