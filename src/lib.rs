//! Layered tile solitaire (workspace facade crate).
//!
//! The engine lives in dedicated crates under `crates/`; this package
//! re-exports them as `tile_solitaire::{core,types}` and hosts the
//! line-oriented console used by the `tile-solitaire` binary.

pub mod console;

pub use tile_solitaire_core as core;
pub use tile_solitaire_types as types;
