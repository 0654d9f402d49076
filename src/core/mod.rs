// Core module - Protocol contract and session client
pub mod protocol;
pub mod session;

pub use protocol::{CalibrateStatus, Command, StatusHandler, StatusUpdate, Timer};
pub use session::{ConnectionState, SessionClient, SessionConfig, SessionEvent};
