//! Action dispatch: turning a decided move into pointer input
//!
//! A move becomes two click gestures: one on the origin square, a short
//! settle pause, one on the destination square. No verification that the
//! page accepted the move happens here; the next poll cycle's state
//! comparison is the system's only feedback signal.

use std::time::Duration;

use shakmaty::uci::UciMove;
use shakmaty::Move;
use tokio::time::sleep;
use tracing::debug;

use crate::bot::capabilities::PointerInjector;
use crate::bot::error::InjectError;
use crate::bot::screen::square_to_screen;
use crate::core::calibration::Calibration;

/// Pause between the origin click and the destination click.
const CLICK_SETTLE: Duration = Duration::from_millis(100);

/// Pause after the destination click, giving the page time to register the
/// move before the next poll.
const ACTION_SETTLE: Duration = Duration::from_millis(500);

/// Execute a decided move on screen. A no-op when auto-play is disabled:
/// the decision has already been surfaced as an advisory event.
///
/// Castling uses the king's origin and destination squares, which is what
/// the standard UCI form of the move carries.
pub async fn play_move_on_screen<P: PointerInjector>(
    pointer: &mut P,
    mv: &Move,
    calibration: &Calibration,
    local_side_is_white: bool,
    auto_play: bool,
) -> Result<(), InjectError> {
    if !auto_play {
        return Ok(());
    }

    let (from, to) = match UciMove::from_standard(mv) {
        UciMove::Normal { from, to, .. } => (from, to),
        other => {
            return Err(InjectError::Device(format!(
                "move {} has no origin/destination squares",
                other
            )))
        }
    };

    let (x1, y1) = square_to_screen(from, calibration, local_side_is_white);
    let (x2, y2) = square_to_screen(to, calibration, local_side_is_white);
    debug!(
        "[DISPATCH] {}{} -> ({:.0}, {:.0}) then ({:.0}, {:.0})",
        from, to, x1, y1, x2, y2
    );

    pointer.move_to(x1, y1)?;
    pointer.click()?;
    sleep(CLICK_SETTLE).await;
    pointer.move_to(x2, y2)?;
    pointer.click()?;
    sleep(ACTION_SETTLE).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::board::reconstruct;
    use shakmaty::san::SanPlus;

    #[derive(Default)]
    struct RecordingPointer {
        actions: Vec<String>,
    }

    impl PointerInjector for RecordingPointer {
        fn move_to(&mut self, x: f64, y: f64) -> Result<(), InjectError> {
            self.actions.push(format!("move {:.0},{:.0}", x, y));
            Ok(())
        }

        fn click(&mut self) -> Result<(), InjectError> {
            self.actions.push("click".to_string());
            Ok(())
        }
    }

    fn calibration() -> Calibration {
        Calibration {
            x0: 100.0,
            y0: 100.0,
            square_width: 50.0,
            square_height: 50.0,
        }
    }

    fn opening_pawn_push() -> (shakmaty::Chess, Move) {
        let position = reconstruct::<&str>(&[]);
        let mv = SanPlus::from_ascii(b"e4")
            .unwrap()
            .san
            .to_move(&position)
            .unwrap();
        (position, mv)
    }

    #[tokio::test]
    async fn test_click_sequence_for_pawn_push() {
        let (_, mv) = opening_pawn_push();
        let mut pointer = RecordingPointer::default();

        play_move_on_screen(&mut pointer, &mv, &calibration(), true, true)
            .await
            .unwrap();

        // e2 then e4, each as a move followed by a click
        assert_eq!(
            pointer.actions,
            vec!["move 325,425", "click", "move 325,325", "click"]
        );
    }

    #[tokio::test]
    async fn test_disabled_auto_play_is_noop() {
        let (_, mv) = opening_pawn_push();
        let mut pointer = RecordingPointer::default();

        play_move_on_screen(&mut pointer, &mv, &calibration(), true, false)
            .await
            .unwrap();

        assert!(pointer.actions.is_empty());
    }

    #[tokio::test]
    async fn test_black_orientation_clicks_mirrored_squares() {
        //! For a black-side bot the same squares land on mirrored pixels
        let position = reconstruct(&["e4"]);
        let mv = SanPlus::from_ascii(b"e5")
            .unwrap()
            .san
            .to_move(&position)
            .unwrap();
        let mut pointer = RecordingPointer::default();

        play_move_on_screen(&mut pointer, &mv, &calibration(), false, true)
            .await
            .unwrap();

        // e7 then e5, mirrored for the flipped board
        assert_eq!(
            pointer.actions,
            vec!["move 275,425", "click", "move 275,325", "click"]
        );
    }
}
