//! Core game state and logic
//!
//! [`Game`] is an immutable snapshot: [`Game::apply`] reads one snapshot and
//! one [`Action`] and returns the next snapshot. Every action is total; a move
//! that can't happen is a no-op, never an error.

use crate::board::Board;
use crate::generator::{PieceGenerator, Randomizer};
use crate::kick::try_rotate;
use crate::piece::Piece;
use crate::score::Score;
use crate::tetromino::RotationDirection;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    /// Only PauseToggle and Restart have an effect
    Paused,
    /// Terminal; only Restart has an effect
    GameOver,
}

/// Horizontal/downward shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

impl MoveDirection {
    /// (row, col) offset of one step
    pub fn offset(&self) -> (i32, i32) {
        match self {
            MoveDirection::Left => (0, -1),
            MoveDirection::Right => (0, 1),
            MoveDirection::Down => (1, 0),
        }
    }
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Gravity step
    Tick,
    Move(MoveDirection),
    Rotate(RotationDirection),
    HardDrop,
    PauseToggle,
    Restart,
}

/// What the most recent lock did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockReport {
    pub lines: u32,
    pub points: u64,
    pub topped_out: bool,
}

/// The main game struct
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    /// The game board
    pub board: Board,
    /// Current falling piece
    pub current_piece: Option<Piece>,
    /// Piece that spawns after the current one locks
    pub next_piece: Piece,
    /// Score tracking
    pub score: Score,
    /// Current game state
    pub state: GameState,
    /// Set by the lock that produced this snapshot, cleared when the piece moves
    pub last_lock: Option<LockReport>,
    /// Piece source, carried along so `apply` stays a pure function
    generator: PieceGenerator,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Create a new game with an unpredictable piece sequence
    pub fn new() -> Self {
        Self::with_generator(PieceGenerator::default())
    }

    /// Create a new game whose pieces are fixed by `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::with_generator(PieceGenerator::with_seed(Randomizer::Uniform, seed))
    }

    /// Create a new game drawing from `generator`
    pub fn with_generator(mut generator: PieceGenerator) -> Self {
        let next_piece = generator.create_random();
        let current_piece = generator.create_random();

        Self {
            board: Board::new(),
            current_piece: Some(current_piece),
            next_piece,
            score: Score::new(),
            state: GameState::Playing,
            last_lock: None,
            generator,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.state == GameState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn points(&self) -> u64 {
        self.score.points
    }

    pub fn lines(&self) -> u32 {
        self.score.lines
    }

    pub fn level(&self) -> u32 {
        self.score.level
    }

    /// Where the current piece would land on a hard drop
    pub fn ghost(&self) -> Option<Piece> {
        self.current_piece
            .as_ref()
            .map(|piece| self.board.drop_position(piece))
    }

    /// Produce the state that follows `action`
    pub fn apply(&self, action: Action) -> Game {
        match (self.state, action) {
            (_, Action::Restart) => self.restarted(),
            (GameState::GameOver, _) => self.clone(),
            (_, Action::PauseToggle) => self.pause_toggled(),
            (GameState::Paused, _) => self.clone(),
            (GameState::Playing, Action::Rotate(direction)) => self.rotate(direction),
            (GameState::Playing, Action::Move(direction)) => self.shift(direction),
            (GameState::Playing, Action::HardDrop) => self.hard_drop(),
            (GameState::Playing, Action::Tick) => self.shift(MoveDirection::Down),
        }
    }

    /// Fresh game that keeps drawing from the same piece source
    fn restarted(&self) -> Game {
        info!(
            score = self.score.points,
            lines = self.score.lines,
            "game restarted"
        );
        Game::with_generator(self.generator.clone())
    }

    fn pause_toggled(&self) -> Game {
        let state = match self.state {
            GameState::Paused => GameState::Playing,
            _ => GameState::Paused,
        };
        Game {
            state,
            ..self.clone()
        }
    }

    /// Adopt `piece` as the current piece
    fn with_piece(&self, piece: Piece) -> Game {
        Game {
            current_piece: Some(piece),
            last_lock: None,
            ..self.clone()
        }
    }

    fn rotate(&self, direction: RotationDirection) -> Game {
        let Some(piece) = &self.current_piece else {
            return self.clone();
        };
        match try_rotate(&self.board, piece, direction) {
            Some(rotated) => self.with_piece(rotated),
            None => self.clone(),
        }
    }

    fn shift(&self, direction: MoveDirection) -> Game {
        let Some(piece) = self.current_piece else {
            return self.clone();
        };
        let (d_row, d_col) = direction.offset();
        let moved = piece.moved(d_row, d_col);

        if self.board.can_place(&moved) {
            self.with_piece(moved)
        } else if direction == MoveDirection::Down {
            self.lock_and_spawn(piece)
        } else {
            self.clone()
        }
    }

    fn hard_drop(&self) -> Game {
        match &self.current_piece {
            Some(piece) => self.lock_and_spawn(self.board.drop_position(piece)),
            None => self.clone(),
        }
    }

    /// Lock `piece` where it is and bring in the next one
    fn lock_and_spawn(&self, piece: Piece) -> Game {
        let (board, cleared) = self.board.merge(&piece).clear_full_lines();

        let mut score = self.score;
        let points = score.add_clear(cleared as u32);

        let mut generator = self.generator.clone();
        let current_piece = self.next_piece.respawned();
        let next_piece = generator.create_random();

        // Top out: the new piece collides the moment it appears
        let topped_out = !board.can_place(&current_piece);

        debug!(
            piece = ?piece.piece_type,
            lines = cleared,
            points,
            level = score.level,
            "piece locked"
        );
        if topped_out {
            info!(
                score = score.points,
                lines = score.lines,
                level = score.level,
                "game over"
            );
        }

        Game {
            board,
            current_piece: Some(current_piece),
            next_piece,
            score,
            state: if topped_out {
                GameState::GameOver
            } else {
                GameState::Playing
            },
            last_lock: Some(LockReport {
                lines: cleared as u32,
                points,
                topped_out,
            }),
            generator,
        }
    }
}
