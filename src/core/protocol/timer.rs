use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A scheduled shade action.
///
/// On the wire a timer is the 4-element array `[id, hour, min, shade]` with
/// a numeric id and string time/level fields, both in `addTimer` commands
/// and in the `timers` snapshot pushed by the device. The device owns the
/// authoritative timer list; this type only mirrors it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    /// Client-generated identifier (Unix timestamp in milliseconds)
    pub id: u64,
    /// Hour of day, as entered ("08")
    pub hour: String,
    /// Minute, as entered ("30")
    pub minute: String,
    /// Target shade level, 0-100, as entered ("50")
    pub shade: String,
}

impl Timer {
    pub fn new(id: u64, hour: impl Into<String>, minute: impl Into<String>, shade: impl Into<String>) -> Self {
        Self {
            id,
            hour: hour.into(),
            minute: minute.into(),
            shade: shade.into(),
        }
    }

    /// Allocate a new timer id from the current wall clock, the same way the
    /// original panel did (`new Date().getTime()`).
    pub fn allocate_id() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Formatted time of day, "HH:MM".
    pub fn time(&self) -> String {
        format!("{}:{}", self.hour, self.minute)
    }

    /// Lenient per-entry decoding for `timers` snapshots.
    ///
    /// Returns `None` when any of the four fields is missing, null, or of an
    /// unusable type; callers skip such entries without failing the rest of
    /// the snapshot. Numeric time/level fields are accepted and stringified.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let entry = value.as_array()?;
        let id = entry.first()?.as_u64()?;
        let hour = field_as_string(entry.get(1)?)?;
        let minute = field_as_string(entry.get(2)?)?;
        let shade = field_as_string(entry.get(3)?)?;
        Some(Self { id, hour, minute, shade })
    }
}

fn field_as_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl Serialize for Timer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.id, &self.hour, &self.minute, &self.shade).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Timer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (id, hour, minute, shade) = <(u64, String, String, String)>::deserialize(deserializer)?;
        Ok(Self { id, hour, minute, shade })
    }
}
