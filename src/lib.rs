//! ShadeCom Library
//!
//! Control client for a WebSocket-connected motorized window shade,
//! providing the device's JSON command/status protocol and a reconnecting
//! session client.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use crate::core::protocol::{CalibrateStatus, Command, StatusHandler, StatusUpdate, Timer};
pub use crate::core::session::{ConnectionState, SessionClient, SessionConfig, SessionEvent};
pub use crate::domain::config::ShadeComConfig;
pub use crate::domain::error::{ShadeComError, ShadeComResult};
