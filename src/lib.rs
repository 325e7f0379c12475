//! TETRS engine - a deterministic falling-block puzzle core
//!
//! The engine is a pure reducer: a [`Game`] snapshot plus an [`Action`] gives
//! the next snapshot. Everything with a clock or a file (the [`Ticker`], the
//! [`Session`] that owns the live game, [`Settings`] and the record store)
//! sits around it and never inside it.
//!
//! ```
//! use tetrs_engine::{Action, Game, MoveDirection};
//!
//! let game = Game::with_seed(12345);
//! let game = game
//!     .apply(Action::Move(MoveDirection::Left))
//!     .apply(Action::HardDrop);
//! assert!(!game.board.is_empty());
//! ```

pub mod board;
pub mod game;
pub mod generator;
pub mod kick;
pub mod piece;
pub mod records;
pub mod score;
pub mod session;
pub mod settings;
pub mod tetromino;
pub mod ticker;

pub use board::{Board, Cell, BOARD_HEIGHT, BOARD_WIDTH};
pub use game::{Action, Game, GameState, LockReport, MoveDirection};
pub use generator::{PieceGenerator, Randomizer};
pub use piece::{Piece, SPAWN_COL, SPAWN_ROW};
pub use records::{GameRecord, HighScores, RecordStore};
pub use score::{line_clear_reward, Score};
pub use session::Session;
pub use settings::Settings;
pub use tetromino::{Rotation, RotationDirection, TetrominoType};
pub use ticker::{compute_tick_interval, Difficulty, TickConfig, Ticker};
