use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

pub mod board;
pub mod evaluation;
pub mod game;
pub mod moves;
pub mod search;

use board::{Board, Piece, PieceColor, PieceRank, Position};
use game::{GameOutcome, GameState};
use moves::{all_legal_moves, legal_moves, Move, PieceMoves};
use search::Difficulty;

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

#[cfg(feature = "debug")]
#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

// ============================================================================
// JS-facing DTOs. Field names mirror the web app's own JSON state, so a
// snapshot coming out of the room store deserializes as-is.
// ============================================================================

#[derive(Serialize, Deserialize)]
struct JsPiece {
    color: String,
    #[serde(rename = "type")]
    rank: String,
}

#[derive(Serialize, Deserialize, Clone, Copy)]
struct JsPosition {
    row: i8,
    col: i8,
}

#[derive(Serialize, Deserialize)]
struct JsMove {
    from: JsPosition,
    to: JsPosition,
    #[serde(default)]
    captured: Vec<JsPosition>,
}

#[derive(Serialize, Deserialize)]
struct JsGameState {
    board: Vec<Vec<Option<JsPiece>>>,
    #[serde(rename = "currentPlayer")]
    current_player: String,
    #[serde(rename = "whitePieces")]
    white_pieces: u8,
    #[serde(rename = "blackPieces")]
    black_pieces: u8,
    #[serde(rename = "whiteCaptured")]
    white_captured: u8,
    #[serde(rename = "blackCaptured")]
    black_captured: u8,
    winner: Option<String>,
    #[serde(rename = "moveHistory", default)]
    move_history: Vec<JsMove>,
}

#[derive(Serialize)]
struct JsPieceMoves {
    position: JsPosition,
    moves: Vec<JsMove>,
}

fn position_to_js(pos: Position) -> JsPosition {
    JsPosition {
        row: pos.row,
        col: pos.col,
    }
}

fn position_from_js(pos: JsPosition) -> Position {
    Position::new(pos.row, pos.col)
}

fn move_to_js(mv: &Move) -> JsMove {
    JsMove {
        from: position_to_js(mv.from),
        to: position_to_js(mv.to),
        captured: mv.captured.iter().copied().map(position_to_js).collect(),
    }
}

fn move_from_js(mv: &JsMove) -> Move {
    Move {
        from: position_from_js(mv.from),
        to: position_from_js(mv.to),
        captured: mv.captured.iter().copied().map(position_from_js).collect(),
    }
}

fn piece_moves_to_js(piece_moves: &PieceMoves) -> JsPieceMoves {
    JsPieceMoves {
        position: position_to_js(piece_moves.position),
        moves: piece_moves.moves.iter().map(move_to_js).collect(),
    }
}

fn outcome_to_js(outcome: GameOutcome) -> Option<String> {
    match outcome {
        GameOutcome::InProgress => None,
        GameOutcome::Won(color) => Some(color.to_str().to_string()),
        GameOutcome::Draw => Some("draw".to_string()),
    }
}

fn outcome_from_js(winner: &Option<String>) -> GameOutcome {
    match winner.as_deref() {
        None => GameOutcome::InProgress,
        Some("draw") => GameOutcome::Draw,
        Some(color) => match PieceColor::from_str(color) {
            Some(color) => GameOutcome::Won(color),
            None => GameOutcome::InProgress,
        },
    }
}

fn state_to_js(game: &GameState) -> JsGameState {
    let mut rows = Vec::with_capacity(8);
    for row in 0..8 {
        let mut cols: Vec<Option<JsPiece>> = Vec::with_capacity(8);
        for col in 0..8 {
            let piece = game.board.get_piece(Position::new(row, col));
            cols.push(piece.map(|p| JsPiece {
                color: p.color.to_str().to_string(),
                rank: p.rank.to_str().to_string(),
            }));
        }
        rows.push(cols);
    }

    JsGameState {
        board: rows,
        current_player: game.current_player.to_str().to_string(),
        white_pieces: game.white_pieces,
        black_pieces: game.black_pieces,
        white_captured: game.white_captured,
        black_captured: game.black_captured,
        winner: outcome_to_js(game.winner),
        move_history: game.move_history.iter().map(move_to_js).collect(),
    }
}

fn state_from_js(js_game: &JsGameState) -> GameState {
    let mut board = Board::empty();
    for (row, cols) in js_game.board.iter().enumerate().take(8) {
        for (col, square) in cols.iter().enumerate().take(8) {
            if let Some(js_piece) = square {
                let color =
                    PieceColor::from_str(&js_piece.color).unwrap_or(PieceColor::White);
                let rank = PieceRank::from_str(&js_piece.rank).unwrap_or(PieceRank::Normal);
                board.set_piece(Position::new(row as i8, col as i8), Piece::new(color, rank));
            }
        }
    }

    // Piece counts are derivable, so recompute them from the board rather
    // than trusting the snapshot; capture tallies are history, not derivable.
    GameState {
        white_pieces: board.count_pieces(PieceColor::White),
        black_pieces: board.count_pieces(PieceColor::Black),
        board,
        current_player: PieceColor::from_str(&js_game.current_player)
            .unwrap_or(PieceColor::White),
        white_captured: js_game.white_captured,
        black_captured: js_game.black_captured,
        winner: outcome_from_js(&js_game.winner),
        move_history: js_game.move_history.iter().map(move_from_js).collect(),
    }
}

// ============================================================================
// Engine: the boundary object the web app talks to. It holds one GameState
// and hands back full snapshots; the caller owns persistence and turn
// authorization.
// ============================================================================

#[wasm_bindgen]
pub struct Engine {
    game: GameState,
}

#[wasm_bindgen]
impl Engine {
    /// Builds an engine from a full game-state snapshot as stored by the
    /// room backend.
    #[wasm_bindgen(constructor)]
    pub fn new(json_state: JsValue) -> Result<Engine, JsValue> {
        let js_game: JsGameState = serde_wasm_bindgen::from_value(json_state)?;
        Ok(Engine {
            game: state_from_js(&js_game),
        })
    }

    /// Fresh game at the standard starting position, White to move.
    pub fn new_game() -> Engine {
        Engine {
            game: GameState::new(),
        }
    }

    /// Full snapshot of the current state, in the app's JSON shape.
    pub fn state(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&state_to_js(&self.game)).unwrap_or(JsValue::NULL)
    }

    /// Legal moves for the piece at (row, col). Pass `must_capture = true`
    /// when continuing a jump chain from a landing square.
    pub fn get_legal_moves(&self, row: i8, col: i8, must_capture: bool) -> JsValue {
        let moves = legal_moves(&self.game.board, Position::new(row, col), must_capture);
        let js_moves: Vec<JsMove> = moves.iter().map(move_to_js).collect();
        serde_wasm_bindgen::to_value(&js_moves).unwrap_or(JsValue::NULL)
    }

    /// Every movable piece of `color` with its moves, mandatory captures
    /// already enforced board-wide.
    pub fn get_all_legal_moves(&self, color: &str) -> JsValue {
        let color = PieceColor::from_str(color).unwrap_or(self.game.current_player);
        let all_moves: Vec<JsPieceMoves> = all_legal_moves(&self.game.board, color)
            .iter()
            .map(piece_moves_to_js)
            .collect();
        serde_wasm_bindgen::to_value(&all_moves).unwrap_or(JsValue::NULL)
    }

    /// Applies a move (trusted to come from the generator) and returns the
    /// resulting snapshot.
    pub fn apply_move(&mut self, js_move: JsValue) -> Result<JsValue, JsValue> {
        let js_move: JsMove = serde_wasm_bindgen::from_value(js_move)?;
        self.game = self.game.apply_move(&move_from_js(&js_move));
        Ok(self.state())
    }

    /// Search for the side to move at the given difficulty ("easy",
    /// "medium", "hard"; unknown strings fall back to medium). Returns null
    /// when the side to move has no legal move.
    pub fn get_best_move(&self, difficulty: &str) -> JsValue {
        let difficulty = Difficulty::from_str(difficulty).unwrap_or(Difficulty::Medium);
        match search::best_move(&self.game, difficulty) {
            Some(best) => {
                web_sys::console::debug_1(&JsValue::from(format!(
                    "{} {}: ({},{}) -> ({},{})",
                    self.game.current_player.to_str(),
                    difficulty.to_str(),
                    best.from.row,
                    best.from.col,
                    best.to.row,
                    best.to.col,
                )));
                serde_wasm_bindgen::to_value(&move_to_js(&best)).unwrap_or(JsValue::NULL)
            }
            None => JsValue::NULL,
        }
    }

    /// Static evaluation of the current position in man-hundredths, from the
    /// side to move's perspective.
    pub fn evaluate_position(&self) -> i32 {
        evaluation::evaluate(&self.game.board, self.game.current_player)
    }

    pub fn perft(&self, depth: usize) -> u64 {
        self.game.perft(depth)
    }
}
