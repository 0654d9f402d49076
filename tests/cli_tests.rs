use clap::Parser;
use shadecom::cli::args::{Args, Command, ConfigCommand, TimersCommand};

/// CLI interface tests
#[cfg(test)]
mod cli_tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(argv)
    }

    #[test]
    fn test_parse_movement_commands() {
        assert!(matches!(parse(&["shadecom", "open"]).unwrap().command, Command::Open));
        assert!(matches!(parse(&["shadecom", "close"]).unwrap().command, Command::Close));
        assert!(matches!(parse(&["shadecom", "stop"]).unwrap().command, Command::Stop));
        assert!(matches!(
            parse(&["shadecom", "calibrate"]).unwrap().command,
            Command::Calibrate
        ));
    }

    #[test]
    fn test_parse_set_level() {
        let args = parse(&["shadecom", "set", "75"]).unwrap();
        match args.command {
            Command::Set { level } => assert_eq!(level, 75),
            other => panic!("expected set command, got {other:?}"),
        }
    }

    #[test]
    fn test_set_rejects_non_numeric_level() {
        assert!(parse(&["shadecom", "set", "half"]).is_err());
        assert!(parse(&["shadecom", "set"]).is_err());
    }

    #[test]
    fn test_parse_timers_subcommands() {
        let args = parse(&["shadecom", "timers", "list"]).unwrap();
        match args.command {
            Command::Timers(timers) => assert!(matches!(timers.command, TimersCommand::List)),
            other => panic!("expected timers command, got {other:?}"),
        }

        let args = parse(&["shadecom", "timers", "add", "--time", "08:30", "--level", "50"]).unwrap();
        match args.command {
            Command::Timers(timers) => match timers.command {
                TimersCommand::Add { time, level } => {
                    assert_eq!(time, "08:30");
                    assert_eq!(level, "50");
                }
                other => panic!("expected timers add, got {other:?}"),
            },
            other => panic!("expected timers command, got {other:?}"),
        }

        let args = parse(&["shadecom", "timers", "delete", "1700000000000"]).unwrap();
        match args.command {
            Command::Timers(timers) => match timers.command {
                TimersCommand::Delete { id } => assert_eq!(id, "1700000000000"),
                other => panic!("expected timers delete, got {other:?}"),
            },
            other => panic!("expected timers command, got {other:?}"),
        }
    }

    #[test]
    fn test_timers_add_requires_both_flags() {
        assert!(parse(&["shadecom", "timers", "add", "--time", "08:30"]).is_err());
        assert!(parse(&["shadecom", "timers", "add", "--level", "50"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let args = parse(&["shadecom", "--host", "shade.local", "-v", "watch"]).unwrap();
        assert_eq!(args.host.as_deref(), Some("shade.local"));
        assert!(args.verbose);
        assert!(matches!(args.command, Command::Watch));
    }

    #[test]
    fn test_parse_config_subcommands() {
        let args = parse(&["shadecom", "config", "show"]).unwrap();
        match args.command {
            Command::Config(config) => assert!(matches!(config.command, ConfigCommand::Show)),
            other => panic!("expected config command, got {other:?}"),
        }

        let args = parse(&["shadecom", "config", "init", "--host", "10.0.0.5"]).unwrap();
        match args.command {
            Command::Config(config) => match config.command {
                ConfigCommand::Init { host } => assert_eq!(host.as_deref(), Some("10.0.0.5")),
                other => panic!("expected config init, got {other:?}"),
            },
            other => panic!("expected config command, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(parse(&["shadecom"]).is_err());
    }
}
