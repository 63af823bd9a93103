//! Core module - run configuration and calibration persistence
//!
//! Holds the configuration a bot run is started with and the persisted
//! screen calibration it depends on. Everything here is plain data: the
//! control loop in [`crate::bot`] consumes these values but never mutates
//! them mid-run.
//!
//! ## Contents
//!
//! - [`RunConfig`] - immutable per-run settings (side, polling delay,
//!   auto-play, engine budget)
//! - [`Calibration`] - linear board-to-pixel model with JSON persistence
//! - [`CoreError`] - error type for calibration I/O and serialization

pub mod calibration;
pub mod config;
pub mod error;

pub use calibration::Calibration;
pub use config::RunConfig;
pub use error::{CoreError, CoreResult};
