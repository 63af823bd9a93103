//! Board reconstruction from scraped move notations
//!
//! The page's move list is the only record of the game, and it is scraped
//! from a live-updating DOM, so individual entries can be garbled or
//! transiently inconsistent mid-render. Reconstruction therefore folds the
//! notation sequence over the standard starting position and *skips* any
//! entry that fails to parse or is illegal in the current position, instead
//! of aborting. Side-to-move is always derived from the resulting position,
//! never tracked separately.

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{Chess, EnPassantMode, Move, Position};
use tracing::warn;

/// Rebuild the authoritative position from an ordered sequence of SAN
/// tokens. Unparseable or illegal tokens are logged and dropped; the result
/// equals the reconstruction of the sequence with those tokens removed.
pub fn reconstruct<S: AsRef<str>>(notations: &[S]) -> Chess {
    let mut position = Chess::default();
    for raw in notations {
        let token = raw.as_ref().trim();
        if token.is_empty() {
            continue;
        }
        let san = match SanPlus::from_ascii(token.as_bytes()) {
            Ok(parsed) => parsed.san,
            Err(e) => {
                warn!("[BOARD] Skipping unparseable move token {:?}: {}", token, e);
                continue;
            }
        };
        let mv = match san.to_move(&position) {
            Ok(mv) => mv,
            Err(e) => {
                warn!("[BOARD] Skipping illegal move token {:?}: {}", token, e);
                continue;
            }
        };
        // to_move only returns moves legal in the current position.
        position.play_unchecked(&mv);
    }
    position
}

/// Canonical position form used for equality comparison: FEN piece
/// placement, side to move, castling rights, and en-passant square. The
/// move counters are deliberately excluded.
pub fn canonical_key(position: &Chess) -> String {
    let fen = Fen::from_position(position.clone(), EnPassantMode::Legal).to_string();
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}

/// Render a move as SAN text for the position it is played in.
pub fn san_text(position: &Chess, mv: &Move) -> String {
    SanPlus::from_move(position.clone(), mv).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Color;

    #[test]
    fn test_empty_sequence_is_starting_position() {
        let position = reconstruct::<&str>(&[]);
        assert_eq!(canonical_key(&position), canonical_key(&Chess::default()));
        assert_eq!(
            canonical_key(&position),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"
        );
    }

    #[test]
    fn test_single_move_flips_side_to_move() {
        let position = reconstruct(&["e4"]);
        assert_eq!(position.turn(), Color::Black);
    }

    #[test]
    fn test_garbled_entry_is_skipped() {
        //! A token that is not SAN at all must not derail reconstruction
        let with_noise = reconstruct(&["e4", "xyz99", "e5"]);
        let clean = reconstruct(&["e4", "e5"]);
        assert_eq!(canonical_key(&with_noise), canonical_key(&clean));
    }

    #[test]
    fn test_parseable_but_illegal_entry_is_skipped() {
        //! "e4" parses as SAN but is not a legal black reply to 1.e4
        let with_noise = reconstruct(&["e4", "e4"]);
        let clean = reconstruct(&["e4"]);
        assert_eq!(canonical_key(&with_noise), canonical_key(&clean));
        assert_eq!(with_noise.turn(), Color::Black);
    }

    #[test]
    fn test_whitespace_and_empty_tokens_ignored() {
        let position = reconstruct(&[" e4 ", "", "e5"]);
        assert_eq!(
            canonical_key(&position),
            canonical_key(&reconstruct(&["e4", "e5"]))
        );
    }

    #[test]
    fn test_castling_updates_rights() {
        let position = reconstruct(&["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5", "O-O"]);
        assert_eq!(position.turn(), Color::Black);
        // White has castled, so only black retains castling rights.
        let key = canonical_key(&position);
        assert!(key.ends_with(" b kq -"), "unexpected key: {key}");
    }

    #[test]
    fn test_check_and_mate_suffixes_parse() {
        //! Scholar's mate, including the trailing '#'
        let position = reconstruct(&["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6", "Qxf7#"]);
        assert!(position.is_checkmate());
        assert!(position.legal_moves().is_empty());
    }

    #[test]
    fn test_stalemate_is_terminal_without_checkmate() {
        //! The classic ten-move stalemate line
        let position = reconstruct(&[
            "e3", "a5", "Qh5", "Ra6", "Qxa5", "h5", "Qxc7", "Rah6", "h4", "f6", "Qxd7+",
            "Kf7", "Qxb7", "Qd3", "Qxb8", "Qh7", "Qxc8", "Kg6", "Qe6",
        ]);
        assert!(position.legal_moves().is_empty());
        assert!(!position.is_checkmate());
    }

    #[test]
    fn test_san_text_round_trip() {
        let position = reconstruct(&["e4"]);
        let reply = SanPlus::from_ascii(b"e5")
            .unwrap()
            .san
            .to_move(&position)
            .unwrap();
        assert_eq!(san_text(&position, &reply), "e5");
    }
}
