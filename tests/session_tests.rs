// Session client tests driven by a scripted transport and a paused clock.
use async_trait::async_trait;
use shadecom::core::session::{Connector, FrameSink, FrameStream};
use shadecom::domain::error::ShadeComResult;
use shadecom::{Command, ConnectionState, SessionClient, SessionConfig, SessionEvent};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const RECONNECT_DELAY: Duration = Duration::from_millis(2000);

fn test_config() -> SessionConfig {
    SessionConfig::new("ws://device.test/ws", RECONNECT_DELAY)
}

/// Sink that records every frame handed to the transport.
struct RecordingSink {
    frames: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl FrameSink for RecordingSink {
    async fn send(&mut self, frame: String) -> ShadeComResult<()> {
        self.frames.lock().unwrap().push(frame);
        Ok(())
    }
}

/// Stream that yields scripted frames, then either closes or stays open.
struct ScriptedStream {
    frames: VecDeque<String>,
    stay_open: bool,
}

#[async_trait]
impl FrameStream for ScriptedStream {
    async fn next(&mut self) -> Option<String> {
        if let Some(frame) = self.frames.pop_front() {
            return Some(frame);
        }
        if self.stay_open {
            std::future::pending().await
        } else {
            None
        }
    }
}

/// Connector whose every connection plays the same script.
struct ScriptedConnector {
    attempts: Arc<AtomicUsize>,
    sent: Arc<Mutex<Vec<String>>>,
    inbound: Vec<String>,
    stay_open: bool,
}

impl ScriptedConnector {
    fn new(inbound: Vec<String>, stay_open: bool) -> Self {
        Self {
            attempts: Arc::new(AtomicUsize::new(0)),
            sent: Arc::new(Mutex::new(Vec::new())),
            inbound,
            stay_open,
        }
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    async fn connect(
        &self,
        _endpoint: &str,
    ) -> ShadeComResult<(Box<dyn FrameSink>, Box<dyn FrameStream>)> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let sink = RecordingSink {
            frames: Arc::clone(&self.sent),
        };
        let stream = ScriptedStream {
            frames: self.inbound.iter().cloned().collect(),
            stay_open: self.stay_open,
        };
        Ok((Box::new(sink), Box::new(stream)))
    }
}

/// Connector whose connection attempts never complete.
struct PendingConnector;

#[async_trait]
impl Connector for PendingConnector {
    async fn connect(
        &self,
        _endpoint: &str,
    ) -> ShadeComResult<(Box<dyn FrameSink>, Box<dyn FrameStream>)> {
        std::future::pending().await
    }
}

#[tokio::test(start_paused = true)]
async fn reconnect_fires_after_fixed_delay_once_per_closure() {
    let connector = Arc::new(ScriptedConnector::new(Vec::new(), false));
    let attempts = Arc::clone(&connector.attempts);
    let mut session = SessionClient::connect(test_config(), connector);

    // Connection opens and closes immediately (empty script)
    assert_eq!(session.next_event().await, Some(SessionEvent::Connected));
    assert_eq!(session.next_event().await, Some(SessionEvent::Disconnected));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);

    // No reconnect attempt before the fixed delay has elapsed
    tokio::time::sleep(RECONNECT_DELAY - Duration::from_millis(1)).await;
    assert_eq!(attempts.load(Ordering::SeqCst), 1);

    // And exactly one once it has
    assert_eq!(session.next_event().await, Some(SessionEvent::Connected));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn send_while_connecting_is_dropped_without_error() {
    let session = SessionClient::connect(test_config(), Arc::new(PendingConnector));

    assert_eq!(session.state().await, ConnectionState::Connecting);
    let delivered = session.send(&Command::Open).await.unwrap();
    assert!(!delivered);
    assert_eq!(session.state().await, ConnectionState::Connecting);
}

#[tokio::test(start_paused = true)]
async fn send_while_closed_is_dropped_without_transmission() {
    let connector = Arc::new(ScriptedConnector::new(Vec::new(), false));
    let sent = Arc::clone(&connector.sent);
    let mut session = SessionClient::connect(test_config(), connector);

    assert_eq!(session.next_event().await, Some(SessionEvent::Connected));
    assert_eq!(session.next_event().await, Some(SessionEvent::Disconnected));
    assert_eq!(session.state().await, ConnectionState::Closed);

    let delivered = session.send(&Command::Stop).await.unwrap();
    assert!(!delivered);
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn send_while_open_transmits_exact_frame() {
    let connector = Arc::new(ScriptedConnector::new(Vec::new(), true));
    let sent = Arc::clone(&connector.sent);
    let mut session = SessionClient::connect(test_config(), connector);

    assert_eq!(session.next_event().await, Some(SessionEvent::Connected));
    assert_eq!(session.state().await, ConnectionState::Open);

    let delivered = session.send(&Command::SetShade { shade: 50 }).await.unwrap();
    assert!(delivered);

    // Let the session task pump the frame through
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(
        *sent.lock().unwrap(),
        vec![r#"{"cmd":"setShade","shade":50}"#.to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn status_pushes_arrive_in_order_and_bad_frames_are_dropped() {
    let inbound = vec![
        r#"{"shade":10}"#.to_string(),
        "not json at all".to_string(),
        r#"{"timers":[]}"#.to_string(),
    ];
    let connector = Arc::new(ScriptedConnector::new(inbound, false));
    let mut session = SessionClient::connect(test_config(), connector);

    assert_eq!(session.next_event().await, Some(SessionEvent::Connected));

    let first = session.next_event().await.unwrap();
    match first {
        SessionEvent::Status(update) => assert_eq!(update.shade, Some(10)),
        other => panic!("expected status push, got {other:?}"),
    }

    // The malformed frame was dropped without killing the connection;
    // the next event is the following status push, not a disconnect.
    let second = session.next_event().await.unwrap();
    match second {
        SessionEvent::Status(update) => assert_eq!(update.timers, Some(Vec::new())),
        other => panic!("expected status push, got {other:?}"),
    }

    assert_eq!(session.next_event().await, Some(SessionEvent::Disconnected));
}

#[tokio::test(start_paused = true)]
async fn session_retries_forever() {
    let connector = Arc::new(ScriptedConnector::new(Vec::new(), false));
    let attempts = Arc::clone(&connector.attempts);
    let mut session = SessionClient::connect(test_config(), connector);

    for _ in 0..5 {
        assert_eq!(session.next_event().await, Some(SessionEvent::Connected));
        assert_eq!(session.next_event().await, Some(SessionEvent::Disconnected));
    }
    assert_eq!(attempts.load(Ordering::SeqCst), 5);
}
