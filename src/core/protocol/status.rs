use super::timer::Timer;
use crate::domain::error::{ShadeComError, ShadeComResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Calibration state reported by the device.
///
/// The wire values are the literal strings `"true"`, `"false"` and
/// `"progress"`, kept as-is for firmware compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CalibrateStatus {
    /// Travel length is known; positional commands are honored
    #[serde(rename = "true")]
    Calibrated,
    /// Travel length has never been learned
    #[serde(rename = "false")]
    NotCalibrated,
    /// Calibration procedure is currently running
    #[serde(rename = "progress")]
    InProgress,
}

impl CalibrateStatus {
    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "true" => Some(Self::Calibrated),
            "false" => Some(Self::NotCalibrated),
            "progress" => Some(Self::InProgress),
            _ => None,
        }
    }
}

impl std::fmt::Display for CalibrateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalibrateStatus::Calibrated => write!(f, "calibrated"),
            CalibrateStatus::NotCalibrated => write!(f, "not calibrated"),
            CalibrateStatus::InProgress => write!(f, "calibration in progress"),
        }
    }
}

/// Inbound status push from the device.
///
/// All fields are optional and interpreted independently; absent or null
/// fields carry no meaning. A present `timers` field is a full snapshot
/// that replaces any previously displayed list (an empty array clears it).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calibrate_status: Option<CalibrateStatus>,
    /// Current shade position, 0-100 (device is the source of truth)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shade: Option<u8>,
    /// Physical travel length; reported but not acted upon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shade_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timers: Option<Vec<Timer>>,
}

/// Raw wire shape, before lenient field interpretation.
#[derive(Deserialize)]
struct RawStatus {
    #[serde(rename = "calibrateStatus")]
    calibrate_status: Option<String>,
    shade: Option<f64>,
    // the firmware spells this field "shadeLenght"
    #[serde(rename = "shadeLength", alias = "shadeLenght")]
    shade_length: Option<f64>,
    timers: Option<Vec<serde_json::Value>>,
}

impl StatusUpdate {
    /// Decode one inbound text frame.
    ///
    /// A non-JSON frame is an error (fatal to that message only, never to
    /// the connection). Within a well-formed frame decoding is lenient:
    /// unknown `calibrateStatus` values are treated as absent and timer
    /// entries missing any of their four fields are skipped silently.
    pub fn decode(frame: &str) -> ShadeComResult<Self> {
        let raw: RawStatus =
            serde_json::from_str(frame).map_err(|e| ShadeComError::Protocol(e.to_string()))?;

        let calibrate_status = raw.calibrate_status.as_deref().and_then(|value| {
            let status = CalibrateStatus::from_wire(value);
            if status.is_none() {
                debug!("Ignoring unknown calibrateStatus value: {value:?}");
            }
            status
        });

        let timers = raw.timers.map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    let timer = Timer::from_value(entry);
                    if timer.is_none() {
                        debug!("Skipping malformed timer entry: {entry}");
                    }
                    timer
                })
                .collect()
        });

        Ok(Self {
            calibrate_status,
            shade: raw.shade.map(|s| s.clamp(0.0, 100.0) as u8),
            shade_length: raw.shade_length.map(|l| l.max(0.0) as u32),
            timers,
        })
    }

    /// True when no recognized field is present.
    pub fn is_empty(&self) -> bool {
        self.calibrate_status.is_none()
            && self.shade.is_none()
            && self.shade_length.is_none()
            && self.timers.is_none()
    }

    /// Route each present field to its handler, in wire-field order.
    pub fn dispatch(&self, handler: &mut dyn StatusHandler) {
        if let Some(status) = self.calibrate_status {
            handler.on_calibrate_status(status);
        }
        if let Some(shade) = self.shade {
            handler.on_shade(shade);
        }
        if let Some(length) = self.shade_length {
            handler.on_shade_length(length);
        }
        if let Some(timers) = &self.timers {
            handler.on_timers(timers);
        }
    }
}

/// Per-field consumer of status pushes.
///
/// Every method has a no-op default so implementors only handle the fields
/// they present. [`StatusUpdate::dispatch`] invokes one method per field
/// actually carried by the frame.
pub trait StatusHandler {
    fn on_calibrate_status(&mut self, _status: CalibrateStatus) {}
    fn on_shade(&mut self, _level: u8) {}
    fn on_shade_length(&mut self, _length: u32) {}
    /// Full snapshot; replaces any previously held list. Empty means clear.
    fn on_timers(&mut self, _timers: &[Timer]) {}
}
