//! End-to-end play scenarios through the public API

use tetrs_engine::{
    compute_tick_interval, line_clear_reward, Action, Board, Cell, Game, GameState,
    MoveDirection, Piece, Rotation, RotationDirection, TetrominoType, BOARD_HEIGHT, BOARD_WIDTH,
};

fn filled_cells(board: &Board) -> usize {
    board.values().iter().flatten().filter(|&&v| v != 0).count()
}

/// Fill `row` everywhere except the listed columns
fn fill_row_except(board: &mut Board, row: i32, holes: &[i32]) {
    for col in 0..BOARD_WIDTH as i32 {
        if !holes.contains(&col) {
            board.set(row, col, Cell::Filled(TetrominoType::J));
        }
    }
}

#[test]
fn test_o_piece_falls_and_locks_after_twenty_ticks() {
    let mut game = Game::with_seed(2024);
    game.current_piece = Some(Piece::new(TetrominoType::O));

    for tick in 0..19 {
        game = game.apply(Action::Tick);
        assert!(game.board.is_empty(), "locked early at tick {}", tick);
    }
    assert_eq!(game.current_piece.map(|p| p.row), Some(18));

    game = game.apply(Action::Tick);
    for (row, col) in [(18, 4), (18, 5), (19, 4), (19, 5)] {
        assert_eq!(game.board.get(row, col), Some(Cell::Filled(TetrominoType::O)));
    }
    assert_eq!(filled_cells(&game.board), 4);
    assert_eq!(game.board.values()[19][4], 2);
    assert!(!game.is_game_over());
    assert_eq!(game.lines(), 0);
    assert_eq!(game.points(), 0);
}

#[test]
fn test_completing_a_row_clears_one_line() {
    let mut game = Game::with_seed(7);
    fill_row_except(&mut game.board, 19, &[9]);
    game.board.set(18, 0, Cell::Filled(TetrominoType::T));

    // vertical I (matrix column 2) dropped down column 9
    game.current_piece = Some(Piece {
        piece_type: TetrominoType::I,
        rotation: Rotation::East,
        row: -1,
        col: 7,
    });
    let next = game.apply(Action::HardDrop);

    assert_eq!(next.lines(), 1);
    assert_eq!(next.level(), 0);
    assert_eq!(next.points(), 100);
    assert_eq!(next.last_lock.map(|lock| lock.lines), Some(1));
    // the stray block and the rest of the I shifted down one row
    assert_eq!(next.board.get(19, 0), Some(Cell::Filled(TetrominoType::T)));
    for row in 17..=19 {
        assert_eq!(next.board.get(row, 9), Some(Cell::Filled(TetrominoType::I)));
    }
    assert_eq!(filled_cells(&next.board), 4);
    assert!(next.board.rows().next().unwrap().iter().all(|cell| cell.is_empty()));
    assert_eq!(next.board.height(), BOARD_HEIGHT);
}

#[test]
fn test_tetris_at_level_boundary_uses_new_level() {
    let mut game = Game::with_seed(7);
    game.score.lines = 8;
    for row in 16..20 {
        fill_row_except(&mut game.board, row, &[0]);
    }
    // vertical I in column 0 (matrix column 1 of West)
    game.current_piece = Some(Piece {
        piece_type: TetrominoType::I,
        rotation: Rotation::West,
        row: 0,
        col: -1,
    });
    let next = game.apply(Action::HardDrop);

    assert_eq!(next.lines(), 12);
    assert_eq!(next.level(), 1);
    assert_eq!(next.points(), line_clear_reward(4) * 2);
    assert!(next.board.is_empty());
}

#[test]
fn test_blocked_spawn_ends_the_game() {
    let mut game = Game::with_seed(99);
    // a tower in the spawn columns reaching the top row, leaving no full line
    for row in 0..BOARD_HEIGHT as i32 {
        for col in 3..=6 {
            game.board.set(row, col, Cell::Filled(TetrominoType::Z));
        }
    }
    game.current_piece = Some(Piece::new(TetrominoType::O).moved(10, -4));

    let over = game.apply(Action::HardDrop);
    assert!(over.is_game_over());
    assert_eq!(over.state, GameState::GameOver);
    assert_eq!(over.last_lock.map(|lock| lock.topped_out), Some(true));

    let frozen = over.board.clone();
    let mut after = over.clone();
    for action in [
        Action::Tick,
        Action::Move(MoveDirection::Down),
        Action::Move(MoveDirection::Left),
        Action::HardDrop,
        Action::Rotate(RotationDirection::Clockwise),
        Action::PauseToggle,
    ] {
        after = after.apply(action);
    }
    assert_eq!(after, over);
    assert_eq!(after.board, frozen);

    let restarted = after.apply(Action::Restart);
    assert!(!restarted.is_game_over());
    assert!(restarted.board.is_empty());
}

#[test]
fn test_pause_freezes_gravity_until_resumed() {
    let game = Game::with_seed(31);
    let paused = game.apply(Action::PauseToggle);
    let ticked = paused.apply(Action::Tick);
    assert_eq!(ticked, paused);

    let resumed = ticked.apply(Action::PauseToggle);
    let ticked = resumed.apply(Action::Tick);
    let before = game.current_piece.unwrap();
    let after = ticked.current_piece.unwrap();
    assert_eq!(after.row, before.row + 1);
}

#[test]
fn test_random_play_keeps_board_invariants() {
    let actions = [
        Action::Tick,
        Action::Move(MoveDirection::Left),
        Action::Move(MoveDirection::Right),
        Action::Move(MoveDirection::Down),
        Action::Rotate(RotationDirection::Clockwise),
        Action::Rotate(RotationDirection::CounterClockwise),
        Action::HardDrop,
    ];
    let mut game = Game::with_seed(5);
    let mut lines = 0;

    for step in 0..5_000usize {
        let action = actions[(step * 7 + step / 3) % actions.len()];
        game = game.apply(action);

        assert_eq!(game.board.rows().count(), BOARD_HEIGHT);
        assert!(game.board.values().iter().flatten().all(|&v| v <= 7));
        assert!(game.lines() >= lines, "line count went backwards");
        lines = game.lines();
        assert_eq!(game.level(), game.lines() / 10);

        if !game.is_game_over() {
            let piece = game.current_piece.expect("live game has a piece");
            assert!(game.board.can_place(&piece));
        } else {
            game = game.apply(Action::Restart);
            lines = 0;
        }
    }
}

#[test]
fn test_tick_interval_speeds_up_then_floors() {
    let intervals: Vec<_> = (0..20).map(compute_tick_interval).collect();
    assert!(intervals.windows(2).all(|pair| pair[1] <= pair[0]));
    assert_eq!(intervals[19].as_millis(), 80);
}
