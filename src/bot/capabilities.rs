//! External capabilities driven by the control loop
//!
//! The loop is written against these traits rather than concrete devices, so
//! the page reader, pointer injector, and engine can each be swapped for
//! test doubles or alternative transports. Production implementations live
//! in [`crate::browser`], [`crate::input`], and [`crate::bot::engine`].

use std::time::Duration;

use async_trait::async_trait;
use shakmaty::{Chess, Move};

use crate::bot::error::{CaptureError, EngineError, InjectError};

/// Reads the ordered move-notation sequence from the page.
///
/// A failed read is a transient condition: the caller skips the tick and
/// polls again, it never aborts the run.
#[async_trait]
pub trait MoveListSource: Send {
    async fn read_moves(&mut self) -> Result<Vec<String>, CaptureError>;
}

/// Performs physical pointer input. Both operations are synchronous and
/// assumed reliable; no return value beyond the error is inspected.
pub trait PointerInjector {
    fn move_to(&mut self, x: f64, y: f64) -> Result<(), InjectError>;
    fn click(&mut self) -> Result<(), InjectError>;
}

/// A long-lived decision-engine session.
///
/// One session is established per run and owned exclusively by the control
/// loop; re-spawning per move is disallowed for latency reasons.
#[async_trait]
pub trait DecisionEngine: Send {
    /// Obtain one candidate move for the position within the time budget.
    async fn best_move(
        &mut self,
        position: &Chess,
        budget: Duration,
    ) -> Result<Move, EngineError>;

    /// Release the session. Called exactly once, when the loop stops.
    async fn shutdown(&mut self);
}
