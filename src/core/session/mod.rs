// Session module - Connection lifecycle and command delivery
pub mod client;
pub mod state;
pub mod transport;

pub use client::{SessionClient, SessionConfig, SessionEvent};
pub use state::ConnectionState;
pub use transport::{Connector, FrameSink, FrameStream};
