use tokio::sync::mpsc;

/// Events emitted by the control loop, consumed by the presentation layer.
/// The flow is strictly one-directional: the loop never reads anything back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotEvent {
    /// Human-readable status line
    StatusChanged(String),
    /// Suggested move in standard algebraic notation
    AdvisoryMove(String),
    /// A move was decided (and, with auto-play, executed) for the local side
    MovePlayed { san: String, by_white: bool },
}

pub type EventSender = mpsc::UnboundedSender<BotEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<BotEvent>;

/// Create the loop-to-presentation event channel.
pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
