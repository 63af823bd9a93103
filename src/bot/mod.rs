//! Bot module - the observation/decision/action control loop
//!
//! Implements the core of the system: reconcile an externally mutating,
//! text-scraped game state with an authoritative board model, decide exactly
//! once per real state change, and map decided moves onto physical screen
//! coordinates.
//!
//! # Module Organization
//!
//! - `capabilities` - traits for the page reader, pointer injector, and
//!   engine session the loop drives
//! - `board` - reconstruction of the position from scraped SAN tokens
//! - `detector` - cross-tick change detection and action deduplication
//! - `engine` - UCI engine session implementing the engine capability
//! - `screen` - board-square to screen-pixel mapping
//! - `dispatch` - decided move to pointer gestures
//! - `runner` - the control loop itself, the only stateful component
//! - `events` - one-way event channel to the presentation layer
//! - `error` - per-capability error types
//!
//! # Data Flow
//!
//! polling tick -> page reader -> `board::reconstruct` ->
//! `detector::CycleMemory::evaluate` -> on a decision point:
//! engine `best_move` -> advisory event -> optional `dispatch` -> memory
//! snapshot update. All components except the runner are stateless given
//! their inputs.

pub mod board;
pub mod capabilities;
pub mod detector;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod events;
pub mod runner;
pub mod screen;

pub use events::BotEvent;
pub use runner::{BotRunner, StopHandle};
