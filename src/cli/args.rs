use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Command line arguments for ShadeCom
#[derive(Parser, Debug)]
#[command(
    name = "shadecom",
    version = env!("CARGO_PKG_VERSION"),
    about = "Control panel for a motorized window shade",
    long_about = "A control client for a WebSocket-connected motorized window shade controller supporting movement commands, travel-length calibration and scheduled timers."
)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Device hostname or IP address (overrides configuration)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the shade fully
    Open,
    /// Close the shade fully
    Close,
    /// Stop the shade where it is
    Stop,
    /// Run the travel-length calibration procedure
    Calibrate,
    /// Move the shade to a target level
    Set {
        /// Target shade level, 0-100
        level: u8,
    },
    /// Scheduled timer management commands
    Timers(TimersArgs),
    /// Stay connected and print every status push
    Watch,
    /// Configuration management commands
    Config(ConfigArgs),
    /// Display version information
    Version,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// Table output
    Table,
    /// CSV output
    Csv,
}

/// Timer management arguments
#[derive(ClapArgs, Debug)]
pub struct TimersArgs {
    /// Timer subcommand
    #[command(subcommand)]
    pub command: TimersCommand,
}

/// Timer management subcommands
#[derive(Subcommand, Debug)]
pub enum TimersCommand {
    /// List the timers currently stored on the device
    List,
    /// Add a timer
    Add {
        /// Time of day, HH:MM
        #[arg(short, long)]
        time: String,
        /// Target shade level, 0-100
        #[arg(short, long)]
        level: String,
    },
    /// Delete a timer by id
    Delete {
        /// Timer ID
        id: String,
    },
}

/// Configuration management arguments
#[derive(ClapArgs, Debug)]
pub struct ConfigArgs {
    /// Configuration subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Create a project configuration in the current directory
    Init {
        /// Device hostname to record in the new configuration
        #[arg(long)]
        host: Option<String>,
    },
    /// Show configuration file paths
    Path,
}
