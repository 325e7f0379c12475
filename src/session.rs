//! Driving a game: input queue, ticker and record hand-off
//!
//! A [`Session`] is the one place that holds the live [`Game`]. Input from any
//! source goes through [`Session::push`] and is applied in arrival order,
//! followed by whatever TICKs the ticker says are due.

use crate::game::{Action, Game};
use crate::generator::PieceGenerator;
use crate::records::{GameRecord, RecordStore};
use crate::settings::Settings;
use crate::ticker::{Difficulty, TickConfig, Ticker};
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{info, warn};

pub struct Session<S: RecordStore> {
    game: Game,
    ticker: Ticker,
    queue: VecDeque<Action>,
    store: S,
    /// Whether the current game's record has been handed over
    reported: bool,
}

impl<S: RecordStore> Session<S> {
    pub fn new(game: Game, ticker: Ticker, store: S) -> Self {
        Self {
            game,
            ticker,
            queue: VecDeque::new(),
            store,
            reported: false,
        }
    }

    /// Build a session from gameplay and speed settings
    pub fn from_settings(settings: &Settings, store: S) -> Self {
        let gameplay = &settings.gameplay;
        let generator = match gameplay.seed {
            Some(seed) => PieceGenerator::with_seed(gameplay.randomizer, seed),
            None => PieceGenerator::new(gameplay.randomizer),
        };
        Self::new(
            Game::with_generator(generator),
            Ticker::new(settings.speed, gameplay.difficulty),
            store,
        )
    }

    /// Session with default speed and difficulty
    pub fn with_store(game: Game, store: S) -> Self {
        Self::new(game, Ticker::new(TickConfig::default(), Difficulty::default()), store)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Queue an input action
    pub fn push(&mut self, action: Action) {
        self.queue.push_back(action);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Apply queued input, then every TICK due at `now`
    ///
    /// Returns the number of actions applied.
    pub fn advance(&mut self, now: Instant) -> usize {
        self.ticker.sync(&self.game, now);

        let mut applied = 0;
        while let Some(action) = self.queue.pop_front() {
            self.dispatch(action, now);
            applied += 1;
        }

        let due = self.ticker.poll(now);
        for _ in 0..due {
            // a tick may have ended the game
            if !self.ticker.is_running() {
                break;
            }
            self.dispatch(Action::Tick, now);
            applied += 1;
        }
        applied
    }

    fn dispatch(&mut self, action: Action, now: Instant) {
        self.game = self.game.apply(action);
        self.ticker.sync(&self.game, now);

        if !self.game.is_game_over() {
            self.reported = false;
        } else if !self.reported {
            self.reported = true;
            self.report();
        }
    }

    fn report(&mut self) {
        let record = GameRecord::from_game(&self.game, self.ticker.difficulty());
        info!(
            score = record.score,
            lines = record.lines,
            level = record.level,
            "recording finished game"
        );
        if let Err(e) = self.store.save_record(record) {
            warn!("Failed to save game record: {:#}", e);
        }
    }
}
