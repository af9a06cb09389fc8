//! Adapter module - drive a round with line-delimited JSON
//!
//! External drivers (bots, scripted tests, a UI process) talk to one round
//! over stdin/stdout. Each request is one JSON object on one line; each reply
//! is one JSON object on one line.
//!
//! # Message Types
//!
//! ## Driver → Engine
//!
//! - **command**: `start_level`, `start_daily`, `place`, `undo`, `skip`, `revive`
//! - **observe**: Ask for a full snapshot of the round
//!
//! ## Engine → Driver
//!
//! - **ack**: Command accepted, with the events it produced
//! - **error**: Rejected request with a stable code and a message
//! - **observation**: Grid cells, shapes, score, combo, phase and progress
//!
//! # Environment Variables
//!
//! - `BLOCKFIT_SEED`: RNG seed (default: wall clock)
//! - `BLOCKFIT_MAX_PENDING`: Actor inbox size (default: 16)
//! - `BLOCKFIT_LOG`: Log level (default: info)
//! - `BLOCKFIT_MAX_LEVEL` / `BLOCKFIT_HIGH_SCORE`: Restored progress
//!
//! # Example Protocol Flow
//!
//! ```text
//! Driver -> Engine: {"type":"command","seq":1,"command":{"op":"start_level","level":3}}
//! Engine -> Driver: {"type":"ack","seq":1,"ts":1760000000000,"ignored":false,"events":[...]}
//! Driver -> Engine: {"type":"command","seq":2,"command":{"op":"place","shape_id":0,"x":0,"y":0}}
//! Driver -> Engine: {"type":"observe","seq":3}
//! Engine -> Driver: {"type":"observation","seq":3,"phase":"awaiting_placement",...}
//! ```
//!
//! # Implementation
//!
//! - One tokio task owns the round ([`runtime`]); the session talks to it over
//!   an `mpsc` inbox with `oneshot` replies
//! - See [`protocol`] for message structure definitions
//! - See [`session`] for the line loop

pub mod config;
pub mod protocol;
pub mod runtime;
pub mod session;

pub use blockfit_core as core;
pub use blockfit_engine as engine;
pub use blockfit_types as types;

pub use config::AdapterConfig;
pub use protocol::*;
pub use runtime::{RoundHandle, RoundRequest, SubmitError};
pub use session::{run_session, run_stdio, Session};
