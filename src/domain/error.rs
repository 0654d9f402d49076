use thiserror::Error;

/// ShadeCom unified error type
#[derive(Error, Debug)]
pub enum ShadeComError {
    #[error("Network error: {0}")]
    Network(#[from] std::io::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    #[error("Connection timeout to {endpoint}")]
    ConnectTimeout { endpoint: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Session error: {message}")]
    Session { message: String },

    #[error("No status update received from device")]
    ResponseTimeout,

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output error: {0}")]
    Output(String),
}

pub type ShadeComResult<T> = Result<T, ShadeComError>;
