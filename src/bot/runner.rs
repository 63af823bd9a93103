//! The control loop
//!
//! Orchestrates one bot run: poll the page reader, reconstruct the position,
//! classify the tick, and on a decision point query the engine and
//! optionally dispatch the move. This is the only component with mutable
//! cross-tick state ([`CycleMemory`]), and the exclusive owner of the engine
//! session, which it releases when the run ends.
//!
//! # Lifecycle
//!
//! `Idle -> Running -> (per tick: poll -> detect -> decide -> act?) -> ... -> Stopped`
//!
//! The engine session is established *before* the runner is constructed and
//! passed in; a session that cannot be established means the loop never
//! enters Running. Stopping is cooperative: [`StopHandle::stop`] raises a
//! flag that is observed at tick boundaries. In-flight engine computation or
//! pointer gestures run to completion first, so worst-case stop latency is
//! bounded by the poll delay plus the engine budget and settle pauses.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use shakmaty::Chess;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::bot::board::{reconstruct, san_text};
use crate::bot::capabilities::{DecisionEngine, MoveListSource, PointerInjector};
use crate::bot::detector::{CycleMemory, TickAction};
use crate::bot::dispatch::play_move_on_screen;
use crate::bot::events::{BotEvent, EventSender};
use crate::core::calibration::Calibration;
use crate::core::config::RunConfig;

/// Cooperative cancellation handle for a running bot.
#[derive(Debug, Clone)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Request the loop to stop at the next tick boundary.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}

/// One bot run: configuration, calibration, the three capabilities, and the
/// loop's cross-tick memory.
pub struct BotRunner<S, E, P> {
    config: RunConfig,
    calibration: Calibration,
    source: S,
    engine: E,
    pointer: P,
    events: EventSender,
    stop: Arc<AtomicBool>,
    memory: CycleMemory,
}

impl<S, E, P> BotRunner<S, E, P>
where
    S: MoveListSource,
    E: DecisionEngine,
    P: PointerInjector,
{
    pub fn new(
        config: RunConfig,
        calibration: Calibration,
        source: S,
        engine: E,
        pointer: P,
        events: EventSender,
    ) -> Self {
        Self {
            config,
            calibration,
            source,
            engine,
            pointer,
            events,
            stop: Arc::new(AtomicBool::new(false)),
            memory: CycleMemory::new(),
        }
    }

    /// Handle for requesting a cooperative stop from another task.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            flag: Arc::clone(&self.stop),
        }
    }

    /// Run until stopped or the game ends. Consumes the runner; the engine
    /// session is shut down before this returns.
    pub async fn run(mut self) {
        info!(
            "[LOOP] Bot started (side: {}, delay: {:?}, auto-play: {})",
            if self.config.play_white { "white" } else { "black" },
            self.config.poll_delay,
            self.config.auto_play
        );
        self.emit_status("Bot active - waiting for your turn...");

        while !self.stop.load(Ordering::Relaxed) {
            sleep(self.config.poll_delay).await;
            if self.stop.load(Ordering::Relaxed) {
                break;
            }

            let notations = match self.source.read_moves().await {
                Ok(list) => list,
                Err(e) => {
                    debug!("[LOOP] Move list read failed, skipping tick: {}", e);
                    continue;
                }
            };

            let position = reconstruct(&notations);
            match self
                .memory
                .evaluate(&position, notations.len(), self.config.play_white)
            {
                TickAction::Wait => {
                    self.emit_status("Waiting for the opponent's move...");
                }
                TickAction::AlreadyHandled => {
                    debug!("[LOOP] Position unchanged since last action");
                    self.emit_status("Waiting for the board to update...");
                }
                TickAction::GameOver => {
                    info!("[LOOP] Terminal position reached");
                    self.emit_status("Game over.");
                    break;
                }
                TickAction::ActNow => {
                    self.decide_and_act(&position, notations.len()).await;
                }
            }
        }

        self.engine.shutdown().await;
        self.emit_status("Bot stopped.");
        info!("[LOOP] Bot stopped");
    }

    /// Query the engine for the position and surface (and optionally play)
    /// the reply. Memory advances only after a successful decision, so an
    /// engine failure leaves the same position to be retried next tick.
    async fn decide_and_act(&mut self, position: &Chess, observed_plies: usize) {
        self.emit_status("Computing best move...");

        let mv = match self
            .engine
            .best_move(position, self.config.move_time)
            .await
        {
            Ok(mv) => mv,
            Err(e) => {
                error!("[LOOP] Engine computation failed: {}", e);
                self.emit_status("Engine error while computing the move");
                return;
            }
        };

        let san = san_text(position, &mv);
        info!("[LOOP] Suggested move: {}", san);
        self.emit(BotEvent::AdvisoryMove(san.clone()));
        self.emit(BotEvent::MovePlayed {
            san,
            by_white: self.config.play_white,
        });

        if self.config.auto_play {
            self.emit_status("Executing move on screen...");
            if let Err(e) = play_move_on_screen(
                &mut self.pointer,
                &mv,
                &self.calibration,
                self.config.play_white,
                true,
            )
            .await
            {
                error!("[LOOP] {}", e);
                self.emit_status("Pointer injection failed");
            }
        }

        self.memory.record_acted(position, observed_plies);
    }

    fn emit(&self, event: BotEvent) {
        // A detached presentation layer is not an error for the loop.
        let _ = self.events.send(event);
    }

    fn emit_status(&self, text: &str) {
        self.emit(BotEvent::StatusChanged(text.to_string()));
    }
}
