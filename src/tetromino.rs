//! Tetromino definitions and shapes
//!
//! All 7 standard tetrominoes, each stored as four 4x4 rotation matrices.
//! Rows grow downward, columns grow rightward, matching the board.

use serde::{Deserialize, Serialize};

/// A 4x4 occupancy matrix (1 = block, 0 = empty)
pub type Matrix = [[u8; 4]; 4];

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TetrominoType {
    I, // Cyan - long bar
    O, // Yellow - square
    T, // Purple - T-shape
    S, // Green - S-shape
    Z, // Red - Z-shape
    J, // Blue - J-shape
    L, // Orange - L-shape
}

impl TetrominoType {
    /// Get all tetromino types, in cell-id order
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::O,
            TetrominoType::T,
            TetrominoType::S,
            TetrominoType::Z,
            TetrominoType::J,
            TetrominoType::L,
        ]
    }

    /// Board cell value for this shape (1..=7)
    pub fn id(&self) -> u8 {
        match self {
            TetrominoType::I => 1,
            TetrominoType::O => 2,
            TetrominoType::T => 3,
            TetrominoType::S => 4,
            TetrominoType::Z => 5,
            TetrominoType::J => 6,
            TetrominoType::L => 7,
        }
    }

    /// Inverse of [`TetrominoType::id`]
    pub fn from_id(id: u8) -> Option<TetrominoType> {
        match id {
            1..=7 => Some(Self::all()[id as usize - 1]),
            _ => None,
        }
    }

    /// Get the 4x4 matrix for this tetromino at a given rotation
    pub fn matrix(&self, rotation: Rotation) -> &'static Matrix {
        let table = match self {
            TetrominoType::I => &I_SHAPES,
            TetrominoType::O => &O_SHAPES,
            TetrominoType::T => &T_SHAPES,
            TetrominoType::S => &S_SHAPES,
            TetrominoType::Z => &Z_SHAPES,
            TetrominoType::J => &J_SHAPES,
            TetrominoType::L => &L_SHAPES,
        };
        &table[rotation.index()]
    }
}

// I:  ....   ..#.   ....   .#..
//     ####   ..#.   ....   .#..
//     ....   ..#.   ####   .#..
//     ....   ..#.   ....   .#..
static I_SHAPES: [Matrix; 4] = [
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]],
    [[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
];

// O doesn't change under rotation
static O_SHAPES: [Matrix; 4] = [
    [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
];

// T:  .#..   .#..   ....   .#..
//     ###.   .##.   ###.   ##..
//     ....   .#..   .#..   .#..
static T_SHAPES: [Matrix; 4] = [
    [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

// S:  .##.   .#..   ....   #...
//     ##..   .##.   .##.   ##..
//     ....   ..#.   ##..   .#..
static S_SHAPES: [Matrix; 4] = [
    [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
    [[1, 0, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

// Z:  ##..   ..#.   ....   .#..
//     .##.   .##.   ##..   ##..
//     ....   .#..   .##.   #...
static Z_SHAPES: [Matrix; 4] = [
    [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [1, 1, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
];

// J:  #...   .##.   ....   .#..
//     ###.   .#..   ###.   .#..
//     ....   .#..   ..#.   ##..
static J_SHAPES: [Matrix; 4] = [
    [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
];

// L:  ..#.   .#..   ....   ##..
//     ###.   .#..   ###.   .#..
//     ....   .##.   #...   .#..
static L_SHAPES: [Matrix; 4] = [
    [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
    [[1, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

/// Rotation states (using SRS naming convention)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North, // Spawn state
    East,  // Clockwise from North
    South, // 180 from North
    West,  // Counter-clockwise from North
}

impl Rotation {
    /// Build a rotation from any index, taken modulo 4
    pub fn from_index(index: usize) -> Rotation {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Rotation index in 0..4
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotate clockwise: North → East → South → West → North
    pub fn cw(&self) -> Rotation {
        Rotation::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise: North → West → South → East → North
    pub fn ccw(&self) -> Rotation {
        Rotation::from_index(self.index() + 3)
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}
