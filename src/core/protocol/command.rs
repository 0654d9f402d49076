use super::timer::Timer;
use crate::domain::error::{ShadeComError, ShadeComResult};
use serde::{Deserialize, Serialize};

/// Outbound command to the shade controller.
///
/// Every variant serializes to a single JSON object tagged by `cmd`, e.g.
/// `{"cmd":"setShade","shade":50}`. Commands are fire-and-forget: there is
/// no acknowledgement, correlation id, or retry in the protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd")]
pub enum Command {
    /// Drive the shade fully open (level 0)
    #[serde(rename = "open")]
    Open,
    /// Drive the shade fully closed (level 100)
    #[serde(rename = "close")]
    Close,
    /// Stop the motor where it is
    #[serde(rename = "stop")]
    Stop,
    /// Start the travel-length calibration procedure
    #[serde(rename = "calibrate")]
    Calibrate,
    /// Move the shade to a specific level, 0-100
    #[serde(rename = "setShade")]
    SetShade { shade: u8 },
    /// Request the current timer list snapshot
    #[serde(rename = "getTimers")]
    GetTimers,
    /// Register a new timer on the device
    #[serde(rename = "addTimer")]
    AddTimer { timer: Timer },
    /// Remove a timer by id
    #[serde(rename = "deleteTimer")]
    DeleteTimer { id: String },
}

impl Command {
    /// Serialize to the exact wire frame.
    pub fn encode(&self) -> ShadeComResult<String> {
        serde_json::to_string(self).map_err(|e| ShadeComError::Protocol(e.to_string()))
    }

    /// Command name as it appears in the `cmd` field, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Open => "open",
            Command::Close => "close",
            Command::Stop => "stop",
            Command::Calibrate => "calibrate",
            Command::SetShade { .. } => "setShade",
            Command::GetTimers => "getTimers",
            Command::AddTimer { .. } => "addTimer",
            Command::DeleteTimer { .. } => "deleteTimer",
        }
    }
}
