use crate::cli::args::{Args, Command, ConfigCommand, TimersCommand};
use crate::cli::output::{ConsoleWriter, OutputWriter};
use crate::core::protocol::{Command as DeviceCommand, StatusUpdate, Timer};
use crate::core::session::{SessionClient, SessionConfig, SessionEvent};
use crate::domain::config::ShadeComConfig;
use crate::domain::error::{ShadeComError, ShadeComResult};
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::ws::WsConnector;
use std::sync::Arc;
use std::time::Duration;

/// Execute CLI command
pub async fn execute_command(args: Args) -> Result<(), ShadeComError> {
    let writer = ConsoleWriter::new(args.output.clone());

    // Load configuration using ConfigManager
    let config_manager = ConfigManager::new()?;
    let mut config = if let Some(config_path) = &args.config {
        config_manager.load_config_from_path(config_path.as_ref())?
    } else {
        config_manager.load_config()?
    };

    // CLI flags override the configuration file
    if let Some(host) = &args.host {
        config.device.host = host.clone();
    }

    // Initialize logging
    if !args.quiet {
        let level = if args.verbose { "debug" } else { &config.global.log_level };
        // A second init (e.g. from tests) is not an error worth surfacing
        let _ = init_logging(level);
    }

    match args.command {
        Command::Open => run_device_command(DeviceCommand::Open, &writer, &config).await,
        Command::Close => run_device_command(DeviceCommand::Close, &writer, &config).await,
        Command::Stop => run_device_command(DeviceCommand::Stop, &writer, &config).await,
        Command::Calibrate => run_device_command(DeviceCommand::Calibrate, &writer, &config).await,
        Command::Set { level } => {
            let shade = validate_level(&level.to_string())?;
            run_device_command(DeviceCommand::SetShade { shade }, &writer, &config).await
        }
        Command::Timers(timers_args) => match timers_args.command {
            TimersCommand::List => {
                run_timers_command(DeviceCommand::GetTimers, &writer, &config).await
            }
            TimersCommand::Add { time, level } => {
                let timer = build_timer(&time, &level)?;
                run_timers_command(DeviceCommand::AddTimer { timer }, &writer, &config).await
            }
            TimersCommand::Delete { id } => {
                run_timers_command(DeviceCommand::DeleteTimer { id }, &writer, &config).await
            }
        },
        Command::Watch => run_watch(&writer, &config).await,
        Command::Config(config_args) => match config_args.command {
            ConfigCommand::Show => {
                writer.write_config(&config)?;
                Ok(())
            }
            ConfigCommand::Init { host } => {
                let cwd = std::env::current_dir().map_err(|e| ShadeComError::Config {
                    message: format!("Failed to determine current directory: {}", e),
                })?;
                config_manager.init_project_config(&cwd, host.as_deref())?;
                writer.write_message(&format!(
                    "Created {}",
                    cwd.join(".shadecom").join("config.toml").display()
                ))?;
                Ok(())
            }
            ConfigCommand::Path => {
                writer.write_message(&format!(
                    "Global: {}",
                    config_manager.get_global_config_path_ref().display()
                ))?;
                match config_manager.get_project_config_path() {
                    Some(path) => writer.write_message(&format!("Project: {}", path.display()))?,
                    None => writer.write_message("Project: (none)")?,
                }
                Ok(())
            }
        },
        Command::Version => {
            writer.write_message(&format!("shadecom {}", env!("CARGO_PKG_VERSION")))?;
            Ok(())
        }
    }
}

/// Validate a shade level given as form input, 0-100.
fn validate_level(level: &str) -> ShadeComResult<u8> {
    level
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|l| *l <= 100)
        .ok_or_else(|| ShadeComError::InvalidInput(format!("Invalid shade level: {:?}", level)))
}

/// Validate a "HH:MM" time-of-day string into its hour and minute parts.
///
/// This is the original panel's add-timer form check: malformed input is a
/// user-visible error and no command is sent.
fn parse_timer_time(time: &str) -> ShadeComResult<(String, String)> {
    let mut parts = time.trim().splitn(2, ':');
    let hour = parts.next().unwrap_or("");
    let minute = parts.next().unwrap_or("");

    let hour_ok = matches!(hour.parse::<u8>(), Ok(h) if h <= 23 && !hour.is_empty());
    let minute_ok = matches!(minute.parse::<u8>(), Ok(m) if m <= 59 && !minute.is_empty());
    if !hour_ok || !minute_ok {
        return Err(ShadeComError::InvalidInput(format!(
            "Invalid time value: {:?} (expected HH:MM)",
            time
        )));
    }

    Ok((hour.to_string(), minute.to_string()))
}

/// Build an `addTimer` payload from validated form input.
fn build_timer(time: &str, level: &str) -> ShadeComResult<Timer> {
    let (hour, minute) = parse_timer_time(time)?;
    let shade = validate_level(level)?;
    Ok(Timer::new(Timer::allocate_id(), hour, minute, shade.to_string()))
}

/// Open a session against the configured device.
fn open_session(config: &ShadeComConfig) -> ShadeComResult<SessionClient> {
    if config.device.host.is_empty() {
        return Err(ShadeComError::Config {
            message: "No device host configured; set [device].host or pass --host".to_string(),
        });
    }

    let connector = Arc::new(WsConnector::new(Duration::from_millis(
        config.global.connect_timeout_ms,
    )));
    let session_config = SessionConfig::new(
        config.device.endpoint(),
        Duration::from_millis(config.global.reconnect_delay_ms),
    );
    Ok(SessionClient::connect(session_config, connector))
}

/// Wait for the session to reach `Open`.
async fn wait_until_open(session: &mut SessionClient, config: &ShadeComConfig) -> ShadeComResult<()> {
    let deadline = Duration::from_millis(config.global.connect_timeout_ms);
    tokio::time::timeout(deadline, async {
        while let Some(event) = session.next_event().await {
            if event == SessionEvent::Connected {
                return Ok(());
            }
        }
        Err(ShadeComError::Session {
            message: "session terminated before connecting".to_string(),
        })
    })
    .await
    .map_err(|_| ShadeComError::ConnectTimeout {
        endpoint: config.device.endpoint(),
    })?
}

/// Wait for the next status push, if any arrives in time.
async fn wait_for_status(
    session: &mut SessionClient,
    config: &ShadeComConfig,
) -> Option<StatusUpdate> {
    let deadline = Duration::from_millis(config.global.response_timeout_ms);
    tokio::time::timeout(deadline, async {
        while let Some(event) = session.next_event().await {
            if let SessionEvent::Status(update) = event {
                return Some(update);
            }
        }
        None
    })
    .await
    .ok()
    .flatten()
}

/// Wait for a status push carrying a timer snapshot.
async fn wait_for_timers(
    session: &mut SessionClient,
    config: &ShadeComConfig,
) -> ShadeComResult<Vec<Timer>> {
    let deadline = Duration::from_millis(config.global.response_timeout_ms);
    tokio::time::timeout(deadline, async {
        while let Some(event) = session.next_event().await {
            if let SessionEvent::Status(update) = event {
                if let Some(timers) = update.timers {
                    return Ok(timers);
                }
            }
        }
        Err(ShadeComError::Session {
            message: "session terminated before the device answered".to_string(),
        })
    })
    .await
    .map_err(|_| ShadeComError::ResponseTimeout)?
}

/// Send one movement/calibration command and report the echoed status.
///
/// The device answers most commands with a status push; when none arrives
/// (e.g. `open` before calibration has ever run) the command still counts
/// as delivered - the protocol is fire-and-forget.
async fn run_device_command(
    command: DeviceCommand,
    writer: &ConsoleWriter,
    config: &ShadeComConfig,
) -> Result<(), ShadeComError> {
    let mut session = open_session(config)?;
    wait_until_open(&mut session, config).await?;

    session.send(&command).await?;
    writer.write_message(&format!("Sent '{}' command", command.name()))?;

    match wait_for_status(&mut session, config).await {
        Some(update) => writer.write_status(&update)?,
        None => writer.write_message("No status update received")?,
    }
    Ok(())
}

/// Send a timer command and render the returned timer snapshot.
async fn run_timers_command(
    command: DeviceCommand,
    writer: &ConsoleWriter,
    config: &ShadeComConfig,
) -> Result<(), ShadeComError> {
    let mut session = open_session(config)?;
    wait_until_open(&mut session, config).await?;

    session.send(&command).await?;
    let timers = wait_for_timers(&mut session, config).await?;
    writer.write_timers(&timers)?;
    Ok(())
}

/// Stay connected, mirroring the device panel: render every status push and
/// reconnect forever after the fixed delay.
async fn run_watch(writer: &ConsoleWriter, config: &ShadeComConfig) -> Result<(), ShadeComError> {
    let mut session = open_session(config)?;
    writer.write_message(&format!(
        "Watching {} (press Ctrl-C to exit)",
        config.device.endpoint()
    ))?;

    loop {
        let event = tokio::select! {
            event = session.next_event() => event,
            _ = tokio::signal::ctrl_c() => None,
        };

        match event {
            Some(SessionEvent::Connected) => {
                writer.write_message("Connected")?;
                // Prime the timer display, like the panel does when the
                // settings page is shown.
                session.send(&DeviceCommand::GetTimers).await?;
            }
            Some(SessionEvent::Disconnected) => {
                writer.write_message("Disconnected; retrying")?;
            }
            Some(SessionEvent::Status(update)) => {
                writer.write_status(&update)?;
            }
            None => break,
        }
    }
    Ok(())
}
