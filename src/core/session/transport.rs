use crate::domain::error::ShadeComResult;
use async_trait::async_trait;

/// Factory for transport connections to the device.
///
/// The production implementation is the WebSocket connector in
/// `infrastructure::ws`; tests drive the session loop with a scripted fake.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Establish one connection to `endpoint`, returning its write and read
    /// halves. The halves are owned by the session loop for the lifetime of
    /// the connection.
    async fn connect(
        &self,
        endpoint: &str,
    ) -> ShadeComResult<(Box<dyn FrameSink>, Box<dyn FrameStream>)>;
}

/// Write half of a connection. One text frame per call.
#[async_trait]
pub trait FrameSink: Send {
    async fn send(&mut self, frame: String) -> ShadeComResult<()>;
}

/// Read half of a connection.
#[async_trait]
pub trait FrameStream: Send {
    /// Next inbound text frame, in delivery order. `None` means the
    /// connection is gone - closed normally or by error, the session loop
    /// treats both the same.
    async fn next(&mut self) -> Option<String>;
}
