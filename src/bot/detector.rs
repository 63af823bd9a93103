//! Change detection across polling ticks
//!
//! Decides, once per tick, whether a new decision point has been reached.
//! [`CycleMemory`] is the loop's only persistent state: the ply count of the
//! last scrape and a canonical snapshot of the last position observed on the
//! opponent's turn or acted upon. Deduplication compares the canonical
//! position form rather than the scraped move count, since a scrape can drop
//! and re-add entries while keeping the same count.
//!
//! The rules run in a fixed order; see [`CycleMemory::evaluate`]. That
//! ordering prevents re-acting on an unchanged position after a no-op scrape
//! tick, and acting on the opponent's turn after a transient miscount.

use shakmaty::{Chess, Position};

use crate::bot::board::canonical_key;

/// Outcome of evaluating one polling tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction {
    /// Opponent's turn; nothing to decide
    Wait,
    /// Same position as the last action; typically a duplicate scrape
    AlreadyHandled,
    /// The local side is to move in a fresh position
    ActNow,
    /// The local side has no legal reply; the game is over
    GameOver,
}

/// Cross-tick memory enforcing at-most-once action per distinct position.
#[derive(Debug, Default)]
pub struct CycleMemory {
    last_seen_plies: Option<usize>,
    last_position: Option<String>,
}

impl CycleMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify the current tick. Rules, in order:
    ///
    /// 1. Opponent to move: `Wait`. Memory is updated regardless, so a later
    ///    reversion to a previously seen count still reads as a new state.
    /// 2. Canonical form equals the stored snapshot: `AlreadyHandled`.
    /// 3. No legal moves: `GameOver`.
    /// 4. Otherwise: `ActNow`.
    pub fn evaluate(
        &mut self,
        position: &Chess,
        observed_plies: usize,
        local_side_is_white: bool,
    ) -> TickAction {
        if position.turn().is_white() != local_side_is_white {
            self.last_seen_plies = Some(observed_plies);
            self.last_position = Some(canonical_key(position));
            return TickAction::Wait;
        }

        if self.last_position.as_deref() == Some(canonical_key(position).as_str()) {
            return TickAction::AlreadyHandled;
        }

        if position.legal_moves().is_empty() {
            return TickAction::GameOver;
        }

        TickAction::ActNow
    }

    /// Record the position an action was just taken on. Not called after an
    /// engine failure, so the same position is re-evaluated next tick.
    pub fn record_acted(&mut self, position: &Chess, observed_plies: usize) {
        self.last_seen_plies = Some(observed_plies);
        self.last_position = Some(canonical_key(position));
    }

    /// Ply count of the most recent scrape that updated memory.
    pub fn last_seen_plies(&self) -> Option<usize> {
        self.last_seen_plies
    }
}
