use damas_wasm::board::{Board, Piece, PieceColor, Position};
use damas_wasm::game::{GameOutcome, GameState};
use damas_wasm::search::{best_move, best_move_at_depth, Difficulty};

fn pos(row: i8, col: i8) -> Position {
    Position::new(row, col)
}

fn state_with_board(board: Board, to_move: PieceColor) -> GameState {
    GameState {
        white_pieces: board.count_pieces(PieceColor::White),
        black_pieces: board.count_pieces(PieceColor::Black),
        board,
        current_player: to_move,
        white_captured: 0,
        black_captured: 0,
        winner: GameOutcome::InProgress,
        move_history: Vec::new(),
    }
}

// Scenario: White must not step to (4,1), where Black's man at (3,0) would
// jump into the square White vacated. (4,3) keeps the material balance.
fn setup_step_trap() -> GameState {
    let mut board = Board::empty();
    board.set_piece(pos(5, 2), Piece::man(PieceColor::White));
    board.set_piece(pos(3, 0), Piece::man(PieceColor::Black));
    state_with_board(board, PieceColor::White)
}

// Scenario: White's king on the long diagonal has a forced flying capture of
// the man at (5,2); the landings on the center columns score highest and the
// first of them wins the tie.
fn setup_king_capture() -> GameState {
    let mut board = Board::empty();
    board.set_piece(pos(7, 0), Piece::king(PieceColor::White));
    board.set_piece(pos(5, 2), Piece::man(PieceColor::Black));
    board.set_piece(pos(0, 1), Piece::man(PieceColor::Black));
    state_with_board(board, PieceColor::White)
}

#[test]
fn search_is_deterministic() {
    let state = GameState::new();

    let first = best_move_at_depth(&state, 2);
    let second = best_move_at_depth(&state, 2);

    assert!(first.is_some(), "the opening position has moves");
    assert_eq!(first, second, "same state and depth must give the same move");
}

#[test]
fn forced_capture_is_taken() {
    let mut board = Board::empty();
    board.set_piece(pos(4, 3), Piece::man(PieceColor::White));
    board.set_piece(pos(3, 2), Piece::man(PieceColor::Black));
    board.set_piece(pos(0, 7), Piece::man(PieceColor::Black));
    let state = state_with_board(board, PieceColor::White);

    let best = best_move_at_depth(&state, 2).expect("white has moves");
    assert!(best.is_capture());
    assert_eq!(best.captured.as_slice(), &[pos(3, 2)]);
}

#[test]
fn search_sidesteps_a_losing_square() {
    let state = setup_step_trap();

    let best = best_move_at_depth(&state, 2).expect("white has moves");
    println!(
        "chosen: ({},{}) -> ({},{})",
        best.from.row, best.from.col, best.to.row, best.to.col
    );
    assert_eq!(best.from, pos(5, 2));
    assert_eq!(
        best.to,
        pos(4, 3),
        "stepping to (4,1) gives the man away to the jump from (3,0)"
    );
}

#[test]
fn king_capture_lands_on_the_best_square() {
    let state = setup_king_capture();

    let best = best_move_at_depth(&state, 2).expect("white has moves");
    assert_eq!(best.captured.as_slice(), &[pos(5, 2)]);
    // Landings (4,3), (3,4) and (2,5) all collect the center bonus; the tie
    // breaks toward the first one generated.
    assert_eq!(best.to, pos(4, 3));
}

#[test]
fn no_legal_moves_means_no_best_move() {
    let mut board = Board::empty();
    // A white man on row 0 has no forward square left.
    board.set_piece(pos(0, 1), Piece::man(PieceColor::White));
    board.set_piece(pos(5, 4), Piece::man(PieceColor::Black));
    let state = state_with_board(board, PieceColor::White);

    assert_eq!(best_move_at_depth(&state, 4), None);
}

#[test]
fn difficulty_maps_to_depth() {
    assert_eq!(Difficulty::Easy.depth(), 2);
    assert_eq!(Difficulty::Medium.depth(), 4);
    assert_eq!(Difficulty::Hard.depth(), 6);

    assert_eq!(Difficulty::from_str("easy"), Some(Difficulty::Easy));
    assert_eq!(Difficulty::from_str("medium"), Some(Difficulty::Medium));
    assert_eq!(Difficulty::from_str("hard"), Some(Difficulty::Hard));
    assert_eq!(Difficulty::from_str("grandmaster"), None);
    assert_eq!(Difficulty::from_str(Difficulty::Hard.to_str()), Some(Difficulty::Hard));
}

#[test]
fn every_difficulty_finds_an_opening_move() {
    let state = GameState::new();

    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let best = best_move(&state, difficulty);
        assert!(
            best.is_some(),
            "{} search must produce a move from the start position",
            difficulty.to_str()
        );
    }
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_root_split_matches_sequential_search() {
    use damas_wasm::search::best_move_at_depth_parallel;

    let states = [GameState::new(), setup_step_trap(), setup_king_capture()];
    for state in &states {
        for depth in [2, 4] {
            assert_eq!(
                best_move_at_depth_parallel(state, depth),
                best_move_at_depth(state, depth),
                "root splitting must agree with the sequential search"
            );
        }
    }
}
