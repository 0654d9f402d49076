// Protocol module - JSON wire contract with the shade controller
pub mod command;
pub mod status;
pub mod timer;

pub use command::Command;
pub use status::{CalibrateStatus, StatusHandler, StatusUpdate};
pub use timer::Timer;
