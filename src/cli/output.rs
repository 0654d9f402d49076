use crate::cli::args::OutputFormat;
use crate::core::protocol::{CalibrateStatus, StatusHandler, StatusUpdate, Timer};
use crate::domain::config::ShadeComConfig;
use serde::Serialize;
use std::io;
use tabled::{Table, Tabled};

/// Output writer trait for different formats
pub trait OutputWriter {
    fn write_status(&self, update: &StatusUpdate) -> Result<(), OutputError>;
    fn write_timers(&self, timers: &[Timer]) -> Result<(), OutputError>;
    fn write_config(&self, config: &ShadeComConfig) -> Result<(), OutputError>;
    fn write_message(&self, message: &str) -> Result<(), OutputError>;
    fn write_error(&self, error: &str) -> Result<(), OutputError>;
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl From<OutputError> for crate::domain::error::ShadeComError {
    fn from(err: OutputError) -> Self {
        Self::Output(err.to_string())
    }
}

/// Console output writer
pub struct ConsoleWriter {
    format: OutputFormat,
}

impl ConsoleWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

/// One row of the timer display, mirroring the device panel's timer table
#[derive(Tabled, Serialize)]
struct TimerRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Level")]
    level: String,
}

impl From<&Timer> for TimerRow {
    fn from(timer: &Timer) -> Self {
        Self {
            id: timer.id,
            time: timer.time(),
            level: timer.shade.clone(),
        }
    }
}

/// Prints each status field as it is routed, the way the device panel
/// updates one control per field.
struct FieldRenderer<'a> {
    writer: &'a ConsoleWriter,
    result: Result<(), OutputError>,
}

impl StatusHandler for FieldRenderer<'_> {
    fn on_calibrate_status(&mut self, status: CalibrateStatus) {
        println!("Calibration: {}", status);
    }

    fn on_shade(&mut self, level: u8) {
        println!("Shade level: {}", level);
    }

    fn on_shade_length(&mut self, length: u32) {
        println!("Travel length: {}", length);
    }

    fn on_timers(&mut self, timers: &[Timer]) {
        if self.result.is_ok() {
            self.result = self.writer.write_timers(timers);
        }
    }
}

impl OutputWriter for ConsoleWriter {
    fn write_status(&self, update: &StatusUpdate) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::to_string_pretty(update)?;
                println!("{}", output);
                Ok(())
            }
            _ => {
                let mut renderer = FieldRenderer {
                    writer: self,
                    result: Ok(()),
                };
                update.dispatch(&mut renderer);
                renderer.result
            }
        }
    }

    fn write_timers(&self, timers: &[Timer]) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                if timers.is_empty() {
                    println!("No timers");
                } else {
                    for timer in timers {
                        println!("Timer {}: {} -> level {}", timer.id, timer.time(), timer.shade);
                    }
                }
            }
            OutputFormat::Json => {
                let rows: Vec<TimerRow> = timers.iter().map(TimerRow::from).collect();
                let output = serde_json::to_string_pretty(&rows)?;
                println!("{}", output);
            }
            OutputFormat::Table => {
                if timers.is_empty() {
                    println!("No timers");
                } else {
                    let rows: Vec<TimerRow> = timers.iter().map(TimerRow::from).collect();
                    let table = Table::new(rows);
                    println!("{}", table);
                }
            }
            OutputFormat::Csv => {
                println!("id,time,level");
                for timer in timers {
                    println!("{},{},{}", timer.id, timer.time(), timer.shade);
                }
            }
        }
        Ok(())
    }

    fn write_config(&self, config: &ShadeComConfig) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::to_string_pretty(config)?;
                println!("{}", output);
            }
            _ => {
                println!("ShadeCom Configuration:");
                println!("  Log level: {}", config.global.log_level);
                println!("  Reconnect delay: {}ms", config.global.reconnect_delay_ms);
                println!("  Connect timeout: {}ms", config.global.connect_timeout_ms);
                println!("  Response timeout: {}ms", config.global.response_timeout_ms);
                if config.device.host.is_empty() {
                    println!("  Device: (not configured)");
                } else {
                    println!("  Device: {}", config.device.endpoint());
                }
            }
        }
        Ok(())
    }

    fn write_message(&self, message: &str) -> Result<(), OutputError> {
        println!("{}", message);
        Ok(())
    }

    fn write_error(&self, error: &str) -> Result<(), OutputError> {
        eprintln!("Error: {}", error);
        Ok(())
    }
}
