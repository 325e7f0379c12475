//! Falling piece descriptor and its pure transforms
//!
//! A piece never checks the board itself; callers test the transformed copy
//! with [`Board::can_place`](crate::board::Board::can_place) and adopt it or not.

use crate::tetromino::{Rotation, RotationDirection, TetrominoType};
use serde::{Deserialize, Serialize};

/// Row a fresh piece's bounding box starts on (one row above the board)
pub const SPAWN_ROW: i32 = -1;
/// Column a fresh piece's bounding box starts on (roughly centered)
pub const SPAWN_COL: i32 = 3;

/// A piece on (or above) the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// The type of tetromino
    pub piece_type: TetrominoType,
    /// Current rotation state
    pub rotation: Rotation,
    /// Position (row, col) of the 4x4 bounding box's top-left corner
    /// Row 0 is the top of the board, increases downward
    pub row: i32,
    pub col: i32,
}

impl Piece {
    /// Create a new piece at spawn position
    pub fn new(piece_type: TetrominoType) -> Self {
        Self {
            piece_type,
            rotation: Rotation::North,
            row: SPAWN_ROW,
            col: SPAWN_COL,
        }
    }

    /// The same shape, back at spawn position and rotation
    pub fn respawned(&self) -> Self {
        Self::new(self.piece_type)
    }

    /// Absolute (row, col) of every block, scanning the 4x4 box row by row
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let matrix = self.piece_type.matrix(self.rotation);
        matrix.iter().enumerate().flat_map(move |(r, line)| {
            line.iter()
                .enumerate()
                .filter(|&(_, &filled)| filled != 0)
                .map(move |(c, _)| (self.row + r as i32, self.col + c as i32))
        })
    }

    /// Copy rotated one step; position unchanged
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        let rotation = match direction {
            RotationDirection::Clockwise => self.rotation.cw(),
            RotationDirection::CounterClockwise => self.rotation.ccw(),
        };
        Self { rotation, ..*self }
    }

    /// Copy shifted by (d_row, d_col)
    pub fn moved(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_position() {
        let piece = Piece::new(TetrominoType::T);
        assert_eq!(piece.row, -1);
        assert_eq!(piece.col, 3);
        assert_eq!(piece.rotation, Rotation::North);
    }

    #[test]
    fn test_block_positions() {
        let piece = Piece::new(TetrominoType::O);
        let positions: Vec<_> = piece.cells().collect();
        assert_eq!(positions, vec![(-1, 4), (-1, 5), (0, 4), (0, 5)]);
    }

    #[test]
    fn test_four_rotations_return_home() {
        for kind in TetrominoType::all() {
            let piece = Piece::new(kind).moved(5, 2);
            let mut cw = piece;
            let mut ccw = piece;
            for _ in 0..4 {
                cw = cw.rotated(RotationDirection::Clockwise);
                ccw = ccw.rotated(RotationDirection::CounterClockwise);
            }
            assert_eq!(cw, piece);
            assert_eq!(ccw, piece);
        }
    }

    #[test]
    fn test_rotate_only_changes_rotation() {
        let piece = Piece::new(TetrominoType::L).moved(3, -1);
        let turned = piece.rotated(RotationDirection::CounterClockwise);
        assert_eq!(turned.rotation, Rotation::West);
        assert_eq!((turned.row, turned.col), (piece.row, piece.col));
        assert_eq!(turned.piece_type, piece.piece_type);
    }

    #[test]
    fn test_move_shifts_anchor() {
        let piece = Piece::new(TetrominoType::S);
        let moved = piece.moved(2, -3);
        assert_eq!((moved.row, moved.col), (1, 0));
        assert_eq!(moved.rotation, piece.rotation);
    }

    #[test]
    fn test_respawned_resets_pose() {
        let piece = Piece::new(TetrominoType::J)
            .rotated(RotationDirection::Clockwise)
            .moved(7, 4);
        assert_eq!(piece.respawned(), Piece::new(TetrominoType::J));
    }
}
