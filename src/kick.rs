//! Wall kick offsets
//!
//! When a rotation collides, these column offsets are tried in order and the
//! first placeable one wins. Only a one-column nudge either way is attempted,
//! no vertical kicks and no per-shape tables.

use crate::board::Board;
use crate::piece::Piece;
use crate::tetromino::RotationDirection;

/// Column offsets tried for a rotation: in place, then left, then right
pub const KICK_OFFSETS: [i32; 3] = [0, -1, 1];

/// Rotate `piece` on `board`, trying each kick offset
///
/// Returns the first placeable candidate, or None if the rotation is blocked.
pub fn try_rotate(board: &Board, piece: &Piece, direction: RotationDirection) -> Option<Piece> {
    let rotated = piece.rotated(direction);
    KICK_OFFSETS
        .iter()
        .map(|&d_col| rotated.moved(0, d_col))
        .find(|candidate| board.can_place(candidate))
}
