use serde::{Deserialize, Serialize};

/// Connection lifecycle state.
///
/// The machine is `Connecting -> Open -> Closed`, and `Closed` transitions
/// back to `Connecting` after the fixed reconnect delay. There is no
/// terminal state; the client retries forever. Transport errors and normal
/// closure are not distinguished - both land in `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    /// A connection attempt is in flight
    Connecting,
    /// The connection is established; commands may be sent
    Open,
    /// The connection is down; a reconnect is scheduled
    Closed,
}

impl ConnectionState {
    /// Commands are only transmitted in the `Open` state; anywhere else
    /// they are dropped without queueing.
    pub fn can_send(&self) -> bool {
        matches!(self, ConnectionState::Open)
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Open => write!(f, "open"),
            ConnectionState::Closed => write!(f, "closed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_open_can_send() {
        assert!(!ConnectionState::Connecting.can_send());
        assert!(ConnectionState::Open.can_send());
        assert!(!ConnectionState::Closed.can_send());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ConnectionState::Connecting.to_string(), "connecting");
        assert_eq!(ConnectionState::Open.to_string(), "open");
        assert_eq!(ConnectionState::Closed.to_string(), "closed");
    }
}
