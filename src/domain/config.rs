use serde::{Deserialize, Serialize};

/// ShadeCom configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShadeComConfig {
    /// Global configuration
    #[serde(default)]
    pub global: GlobalConfig,
    /// Shade device configuration
    #[serde(default)]
    pub device: DeviceConfig,
}

/// Global configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Delay before a closed connection is reopened, in milliseconds
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_ms: u64,
    /// Timeout for establishing a connection, in milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
    /// How long one-shot commands wait for the device's status push
    #[serde(default = "default_response_timeout")]
    pub response_timeout_ms: u64,
}

/// Shade device endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Device hostname or IP address
    #[serde(default)]
    pub host: String,
    /// Device HTTP port
    #[serde(default = "default_port")]
    pub port: u16,
    /// WebSocket endpoint path
    #[serde(default = "default_ws_path")]
    pub path: String,
    /// Use wss:// instead of ws://
    #[serde(default)]
    pub secure: bool,
}

impl DeviceConfig {
    /// Build the WebSocket endpoint URL for this device.
    ///
    /// The default port 80 is left implicit so the URL matches what the
    /// firmware's embedded panel connects to.
    pub fn endpoint(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        if self.port == 80 && !self.secure {
            format!("{}://{}{}", scheme, self.host, self.path)
        } else {
            format!("{}://{}:{}{}", scheme, self.host, self.port, self.path)
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_reconnect_delay() -> u64 {
    2000
}

fn default_connect_timeout() -> u64 {
    5000
}

fn default_response_timeout() -> u64 {
    5000
}

fn default_port() -> u16 {
    80
}

fn default_ws_path() -> String {
    "/ws".to_string()
}

impl Default for ShadeComConfig {
    fn default() -> Self {
        Self {
            global: GlobalConfig::default(),
            device: DeviceConfig::default(),
        }
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            reconnect_delay_ms: default_reconnect_delay(),
            connect_timeout_ms: default_connect_timeout(),
            response_timeout_ms: default_response_timeout(),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_port(),
            path: default_ws_path(),
            secure: false,
        }
    }
}
