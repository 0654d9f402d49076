// Domain module - Configuration and error types
pub mod config;
pub mod error;

pub use config::{DeviceConfig, GlobalConfig, ShadeComConfig};
pub use error::{ShadeComError, ShadeComResult};
