//! Game board representation and collision detection

use crate::piece::Piece;
use crate::tetromino::TetrominoType;
use serde::{Deserialize, Serialize};

/// Standard Tetris board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A cell on the board - either empty or filled by a tetromino type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Filled(TetrominoType),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    /// Numeric cell value: 0 for empty, 1..=7 for the shape that filled it
    pub fn value(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Filled(kind) => kind.id(),
        }
    }
}

/// The game board
///
/// Boards are values: [`Board::merge`] and [`Board::clear_full_lines`] return
/// a new board and leave the receiver untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top, row increases downward
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    /// Get the cell at a position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        let (row, col) = Self::index(row, col)?;
        Some(self.cells[row][col])
    }

    /// Set a cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some((row, col)) => {
                self.cells[row][col] = cell;
                true
            }
            None => false,
        }
    }

    fn index(row: i32, col: i32) -> Option<(usize, usize)> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= BOARD_HEIGHT || col >= BOARD_WIDTH {
            return None;
        }
        Some((row, col))
    }

    /// Check if a single block may occupy (row, col)
    ///
    /// Rows above the board (negative) are open so pieces can spawn partly
    /// hidden; the sides and the floor are walls.
    pub fn is_valid_position(&self, row: i32, col: i32) -> bool {
        if col < 0 || col >= BOARD_WIDTH as i32 {
            return false;
        }
        if row >= BOARD_HEIGHT as i32 {
            return false;
        }
        if row < 0 {
            return true;
        }
        self.cells[row as usize][col as usize].is_empty()
    }

    /// Check whether every block of `piece` fits on the board
    pub fn can_place(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .all(|(row, col)| self.is_valid_position(row, col))
    }

    /// Return a new board with `piece` written in
    ///
    /// Blocks outside the grid (still above the top) are dropped.
    pub fn merge(&self, piece: &Piece) -> Board {
        let mut next = self.clone();
        for (row, col) in piece.cells() {
            next.set(row, col, Cell::Filled(piece.piece_type));
        }
        next
    }

    /// Remove full rows, shifting the rest down
    ///
    /// Returns the compacted board and the number of rows removed. The
    /// board keeps its height: empty rows are fed in from the top.
    pub fn clear_full_lines(&self) -> (Board, usize) {
        let mut next = Board::new();
        let mut write_row = BOARD_HEIGHT;

        for read_row in (0..BOARD_HEIGHT).rev() {
            if !self.is_line_full(read_row) {
                write_row -= 1;
                next.cells[write_row] = self.cells[read_row];
            }
        }

        (next, write_row)
    }

    /// Lowest position `piece` reaches by falling straight down
    ///
    /// Returns the piece unchanged when it can't move at all.
    pub fn drop_position(&self, piece: &Piece) -> Piece {
        let mut resting = *piece;
        loop {
            let below = resting.moved(1, 0);
            if !self.can_place(&below) {
                return resting;
            }
            resting = below;
        }
    }

    /// Check if a line is completely filled
    fn is_line_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_filled())
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_WIDTH]> {
        self.cells.iter()
    }

    /// Numeric view of the grid (0 empty, 1..=7 shape id) for renderers
    pub fn values(&self) -> [[u8; BOARD_WIDTH]; BOARD_HEIGHT] {
        self.cells.map(|row| row.map(|cell| cell.value()))
    }
}
