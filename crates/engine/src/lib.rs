//! Command layer between drivers and the round controller.
//!
//! Drivers parse [`RoundCommand`](blockfit_types::RoundCommand) values and hand
//! them to [`apply_command`]; failures come back with a stable error code.

pub mod command;

pub use command::{apply_command, CommandError, CommandOutcome};
