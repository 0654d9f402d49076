use crate::core::protocol::{Command, StatusUpdate};
use crate::core::session::state::ConnectionState;
use crate::core::session::transport::{Connector, FrameSink, FrameStream};
use crate::domain::error::{ShadeComError, ShadeComResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// WebSocket endpoint, e.g. `ws://shade.local/ws`
    pub endpoint: String,
    /// Fixed delay between a closure and the next connection attempt
    pub reconnect_delay: Duration,
}

impl SessionConfig {
    pub fn new(endpoint: impl Into<String>, reconnect_delay: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            reconnect_delay,
        }
    }
}

/// Event surfaced to the session consumer, in transport order.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The connection reached `Open`
    Connected,
    /// The connection closed or a connection attempt failed
    Disconnected,
    /// A status push was received and decoded
    Status(StatusUpdate),
}

/// Client session holding the single logical connection to the device.
///
/// The connection is owned by a background task which reconnects forever
/// after a fixed delay - no backoff, no jitter, no attempt limit, matching
/// the device's own control panel. Commands are fire-and-forget and are
/// silently dropped while the connection is not open; nothing is queued.
pub struct SessionClient {
    state: Arc<RwLock<ConnectionState>>,
    outbound: mpsc::UnboundedSender<String>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    task: tokio::task::JoinHandle<()>,
}

impl SessionClient {
    /// Start the session against `config.endpoint`.
    ///
    /// Returns immediately; connection progress is reported through
    /// [`SessionClient::next_event`]. At most one live connection exists at
    /// any time.
    pub fn connect(config: SessionConfig, connector: Arc<dyn Connector>) -> Self {
        let state = Arc::new(RwLock::new(ConnectionState::Connecting));
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let session_id = Uuid::new_v4();
        let span = tracing::info_span!("session", id = %session_id);
        let task = tokio::spawn(
            run_session(config, connector, Arc::clone(&state), outbound_rx, event_tx)
                .instrument(span),
        );

        Self {
            state,
            outbound: outbound_tx,
            events: event_rx,
            task,
        }
    }

    /// Current connection state.
    pub async fn state(&self) -> ConnectionState {
        *self.state.read().await
    }

    /// Send a command to the device.
    ///
    /// Returns `Ok(true)` when the frame was handed to the transport and
    /// `Ok(false)` when it was dropped because the connection is not open.
    /// A drop is normal best-effort behavior, not an error; the command is
    /// not queued and will not be retried.
    pub async fn send(&self, command: &Command) -> ShadeComResult<bool> {
        if !self.state.read().await.can_send() {
            debug!("Dropping '{}' command: connection not open", command.name());
            return Ok(false);
        }
        let frame = command.encode()?;
        debug!("Sending command: {frame}");
        self.outbound.send(frame).map_err(|_| ShadeComError::Session {
            message: "session task terminated".to_string(),
        })?;
        Ok(true)
    }

    /// Next session event, in transport delivery order. `None` once the
    /// session task has terminated.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }
}

impl Drop for SessionClient {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_session(
    config: SessionConfig,
    connector: Arc<dyn Connector>,
    state: Arc<RwLock<ConnectionState>>,
    mut outbound: mpsc::UnboundedReceiver<String>,
    events: mpsc::UnboundedSender<SessionEvent>,
) {
    loop {
        set_state(&state, ConnectionState::Connecting).await;
        info!("Trying to open a connection to {}", config.endpoint);

        match connector.connect(&config.endpoint).await {
            Ok((mut sink, mut stream)) => {
                // Frames accepted just before the previous closure are
                // stale; discard them rather than replay on the new
                // connection. Commands are never queued across closures.
                while outbound.try_recv().is_ok() {}

                set_state(&state, ConnectionState::Open).await;
                info!("Connection opened");
                if events.send(SessionEvent::Connected).is_err() {
                    return;
                }

                if !pump(&mut sink, &mut stream, &mut outbound, &events).await {
                    return;
                }
                info!("Connection closed");
            }
            Err(e) => {
                warn!("Connection attempt failed: {e}");
            }
        }

        set_state(&state, ConnectionState::Closed).await;
        if events.send(SessionEvent::Disconnected).is_err() {
            return;
        }

        // Exactly one reconnect attempt per closure, after a fixed delay.
        tokio::time::sleep(config.reconnect_delay).await;
    }
}

/// Pump frames in both directions until the connection goes away.
///
/// Returns `false` when the consumer side is gone and the session task
/// should exit instead of reconnecting.
async fn pump(
    sink: &mut Box<dyn FrameSink>,
    stream: &mut Box<dyn FrameStream>,
    outbound: &mut mpsc::UnboundedReceiver<String>,
    events: &mpsc::UnboundedSender<SessionEvent>,
) -> bool {
    loop {
        tokio::select! {
            frame = outbound.recv() => match frame {
                Some(frame) => {
                    if let Err(e) = sink.send(frame).await {
                        warn!("Send failed: {e}");
                        return true;
                    }
                }
                // Client handle dropped; nothing left to do.
                None => return false,
            },
            inbound = stream.next() => match inbound {
                Some(text) => {
                    debug!("Device message: {text}");
                    match StatusUpdate::decode(&text) {
                        Ok(update) => {
                            if events.send(SessionEvent::Status(update)).is_err() {
                                return false;
                            }
                        }
                        // Fatal to this message only, never to the connection.
                        Err(e) => warn!("Dropping undecodable frame: {e}"),
                    }
                }
                None => return true,
            },
        }
    }
}

async fn set_state(state: &Arc<RwLock<ConnectionState>>, next: ConnectionState) {
    let mut guard = state.write().await;
    if *guard != next {
        debug!("Connection state: {} -> {}", *guard, next);
        *guard = next;
    }
}
