// WebSocket transport
pub mod client;

pub use client::WsConnector;
