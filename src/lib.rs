//! blockfit (workspace facade crate).
//!
//! Re-exports `blockfit::{core,engine,adapter,types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use blockfit_adapter as adapter;
pub use blockfit_core as core;
pub use blockfit_engine as engine;
pub use blockfit_types as types;
