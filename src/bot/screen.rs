//! Board-square to screen-pixel mapping
//!
//! Pure coordinate arithmetic: given the calibrated board origin and
//! per-square extents, compute the pixel center of any square. When the
//! local side plays black the rendered board is flipped, so both axes are
//! mirrored to keep screen geometry consistent with what is actually drawn.

use shakmaty::Square;

use crate::core::calibration::Calibration;

/// Map a board square to the screen pixel at its center.
///
/// Total over all 64 squares; an invalid square cannot be represented in the
/// input type, so there are no error conditions.
pub fn square_to_screen(
    square: Square,
    calibration: &Calibration,
    local_side_is_white: bool,
) -> (f64, f64) {
    let mut file = square.file() as u32;
    // Row 0 is the top of the rendered board, so rank 8 maps to row 0.
    let mut row = 7 - square.rank() as u32;

    if !local_side_is_white {
        file = 7 - file;
        row = 7 - row;
    }

    let x = calibration.x0 + f64::from(file) * calibration.square_width
        + calibration.square_width / 2.0;
    let y = calibration.y0 + f64::from(row) * calibration.square_height
        + calibration.square_height / 2.0;
    (x, y)
}
