//! Error types for the bot module
//!
//! Each external capability gets its own error type so the control loop can
//! apply the right policy per failure class: capture failures skip the tick,
//! compute failures are retried next tick, and only a failed engine session
//! establishment is fatal to a run.

use thiserror::Error;

/// Page-reader failures. Always transient: the loop treats a failed scrape
/// as "no change this tick" and polls again.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The move list could not be read this tick
    #[error("move list unavailable: {0}")]
    Transient(String),
}

/// Pointer-injection failures.
#[derive(Debug, Error)]
pub enum InjectError {
    /// The pointer device rejected or failed an input
    #[error("pointer injection failed: {0}")]
    Device(String),
}

/// Engine capability failures.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine session could not be established. Fatal for the run.
    #[error("engine unavailable: {0}")]
    Unavailable(String),

    /// A single computation failed. Reported as a status event; the loop
    /// continues and retries the same position on the next tick.
    #[error("engine computation failed: {0}")]
    Compute(String),
}
