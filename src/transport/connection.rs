//! DevTools WebSocket client.
//!
//! A [`Connection`] owns one socket to a page target. Callers hand it a
//! [`Command`]; a background task writes the serialized [`Request`] and
//! matches the reply back by its numeric `id`.
//!
//! # Background Task
//!
//! The task spawned by [`Connection::connect`] multiplexes two inputs:
//!
//! - frames read from the socket: replies are routed to their waiting caller,
//!   events are traced and dropped
//! - outbound requests from any clone of the connection
//!
//! When the socket ends, every caller still waiting gets
//! [`Error::ConnectionClosed`].

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::{Value, from_str, to_string};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, error, trace, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::identifiers::RequestId;
use crate::protocol::{Command, Event, Request, Response};

// ============================================================================
// Constants
// ============================================================================

/// How long a command may wait for its reply.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on commands awaiting a reply.
const MAX_IN_FLIGHT: usize = 100;

/// How long the WebSocket handshake may take.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Types
// ============================================================================

type DevToolsSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

type SocketWriter = SplitSink<DevToolsSocket, Message>;

/// Reply slots keyed by request id.
type InFlight = FxHashMap<RequestId, oneshot::Sender<Result<Response>>>;

/// Messages from connection handles to the background task.
enum Outbound {
    /// Write `request`; its reply goes to `reply`.
    Request {
        request: Request,
        reply: oneshot::Sender<Result<Response>>,
    },
    /// Stop waiting for a reply that timed out.
    Forget(RequestId),
    /// Close the socket.
    Close,
}

// ============================================================================
// Connection
// ============================================================================

/// Client side of a DevTools page socket.
///
/// Cheap to clone; clones share the socket and its background task.
#[derive(Clone)]
pub struct Connection {
    outbox: mpsc::UnboundedSender<Outbound>,
    in_flight: Arc<Mutex<InFlight>>,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("in_flight", &self.in_flight_count())
            .finish()
    }
}

impl Connection {
    /// Opens a page socket such as `ws://127.0.0.1:9222/devtools/page/<id>`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] for a malformed or non-`ws`/`wss` URL
    /// - [`Error::ConnectionTimeout`] if the handshake takes over 30s
    /// - [`Error::WebSocket`] if the handshake is refused
    pub async fn connect(ws_url: &str) -> Result<Self> {
        let url = parse_socket_url(ws_url)?;

        let (socket, _) = timeout(HANDSHAKE_TIMEOUT, connect_async(url.as_str()))
            .await
            .map_err(|_| Error::connection_timeout(HANDSHAKE_TIMEOUT.as_millis() as u64))??;

        debug!(url = %url, "Connected to DevTools endpoint");
        Ok(Self::spawn(socket))
    }

    /// Starts the background task for `socket`.
    fn spawn(socket: DevToolsSocket) -> Self {
        let (outbox, inbox) = mpsc::unbounded_channel();
        let in_flight = Arc::new(Mutex::new(InFlight::default()));

        tokio::spawn(Self::pump(socket, inbox, Arc::clone(&in_flight)));

        Self { outbox, in_flight }
    }

    /// Sends `command` and returns the `result` payload of its reply.
    ///
    /// # Errors
    ///
    /// See [`call_with_timeout`](Self::call_with_timeout).
    pub async fn call(&self, command: Command) -> Result<Value> {
        self.call_with_timeout(command, COMMAND_TIMEOUT).await
    }

    /// Like [`call`](Self::call), with an explicit reply deadline.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionClosed`] once the socket is gone
    /// - [`Error::RequestTimeout`] if no reply arrives within `limit`
    /// - [`Error::Protocol`] if 100 commands are already waiting, or the
    ///   browser answers with an error
    pub async fn call_with_timeout(&self, command: Command, limit: Duration) -> Result<Value> {
        let in_flight = self.in_flight_count();
        if in_flight >= MAX_IN_FLIGHT {
            warn!(in_flight, max = MAX_IN_FLIGHT, "Command rejected, too many in flight");
            return Err(Error::protocol(format!(
                "{in_flight} commands awaiting replies (limit {MAX_IN_FLIGHT})"
            )));
        }

        let request = Request::new(command);
        let request_id = request.id;
        trace!(%request_id, method = request.command.method(), "Calling");

        let (reply, reply_rx) = oneshot::channel();
        self.outbox
            .send(Outbound::Request { request, reply })
            .map_err(|_| Error::ConnectionClosed)?;

        match timeout(limit, reply_rx).await {
            Ok(Ok(response)) => response?.into_result(),
            Ok(Err(_)) => Err(Error::ConnectionClosed),
            Err(_) => {
                let _ = self.outbox.send(Outbound::Forget(request_id));
                Err(Error::request_timeout(request_id, limit.as_millis() as u64))
            }
        }
    }

    /// Number of commands still waiting for a reply.
    #[inline]
    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.lock().len()
    }

    /// Closes the socket for every clone.
    pub fn shutdown(&self) {
        let _ = self.outbox.send(Outbound::Close);
    }

    // ------------------------------------------------------------------------
    // Background Task
    // ------------------------------------------------------------------------

    async fn pump(
        socket: DevToolsSocket,
        mut inbox: mpsc::UnboundedReceiver<Outbound>,
        in_flight: Arc<Mutex<InFlight>>,
    ) {
        let (mut writer, mut reader) = socket.split();

        loop {
            tokio::select! {
                frame = reader.next() => match frame {
                    Some(Ok(Message::Text(text))) => Self::route(&text, &in_flight),
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("DevTools socket closed");
                        break;
                    }
                    Some(Err(e)) => {
                        error!(error = %e, "DevTools socket failed");
                        break;
                    }
                    Some(Ok(_)) => {}
                },

                outbound = inbox.recv() => match outbound {
                    Some(Outbound::Request { request, reply }) => {
                        Self::write(request, reply, &mut writer, &in_flight).await;
                    }
                    Some(Outbound::Forget(request_id)) => {
                        in_flight.lock().remove(&request_id);
                        debug!(%request_id, "Dropped reply slot after timeout");
                    }
                    Some(Outbound::Close) | None => {
                        let _ = writer.close().await;
                        break;
                    }
                },
            }
        }

        Self::abandon(&in_flight);
        debug!("DevTools task finished");
    }

    /// Delivers a reply to its caller; anything else is an event.
    fn route(text: &str, in_flight: &Mutex<InFlight>) {
        if let Ok(response) = from_str::<Response>(text) {
            match in_flight.lock().remove(&response.id) {
                Some(reply) => {
                    let _ = reply.send(Ok(response));
                }
                None => warn!(id = %response.id, "Reply nobody is waiting for"),
            }
        } else if let Ok(event) = from_str::<Event>(text) {
            trace!(method = %event.method, parsed = ?event.parse(), "Event");
        } else {
            warn!(text, "Unrecognized DevTools message");
        }
    }

    /// Registers the reply slot, then writes the request.
    async fn write(
        request: Request,
        reply: oneshot::Sender<Result<Response>>,
        writer: &mut SocketWriter,
        in_flight: &Mutex<InFlight>,
    ) {
        let request_id = request.id;
        let json = match to_string(&request) {
            Ok(json) => json,
            Err(e) => {
                let _ = reply.send(Err(Error::Json(e)));
                return;
            }
        };

        in_flight.lock().insert(request_id, reply);

        if let Err(e) = writer.send(Message::Text(json.into())).await
            && let Some(reply) = in_flight.lock().remove(&request_id)
        {
            let _ = reply.send(Err(Error::connection(e.to_string())));
        }
    }

    /// Fails every caller still waiting.
    fn abandon(in_flight: &Mutex<InFlight>) {
        let waiting: Vec<_> = in_flight.lock().drain().map(|(_, reply)| reply).collect();
        if !waiting.is_empty() {
            debug!(count = waiting.len(), "Failing commands left without a reply");
        }
        for reply in waiting {
            let _ = reply.send(Err(Error::ConnectionClosed));
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Parses `ws_url`, accepting only `ws` and `wss` schemes.
fn parse_socket_url(ws_url: &str) -> Result<Url> {
    let url = Url::parse(ws_url)
        .map_err(|e| Error::invalid_argument(format!("invalid WebSocket URL {ws_url}: {e}")))?;

    match url.scheme() {
        "ws" | "wss" => Ok(url),
        other => Err(Error::invalid_argument(format!(
            "unsupported scheme {other}, expected ws or wss"
        ))),
    }
}

// ============================================================================
// Tests
// ============================================================================
