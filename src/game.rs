use serde::{Deserialize, Serialize};

use crate::board::{Board, PieceColor};
use crate::moves::{all_legal_moves, legal_moves, Move};

/// Terminal status of a game. `Draw` is never produced by `apply_move`
/// (a stalled side loses instead); it exists so externally adjudicated
/// draws survive a snapshot round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    InProgress,
    Won(PieceColor),
    Draw,
}

impl GameOutcome {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameOutcome::InProgress
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub current_player: PieceColor,
    pub white_pieces: u8,
    pub black_pieces: u8,
    pub white_captured: u8,
    pub black_captured: u8,
    pub winner: GameOutcome,
    pub move_history: Vec<Move>,
}

impl GameState {
    /// Fresh game: standard setup, White to move.
    pub fn new() -> Self {
        GameState {
            board: Board::initial(),
            current_player: PieceColor::White,
            white_pieces: 12,
            black_pieces: 12,
            white_captured: 0,
            black_captured: 0,
            winner: GameOutcome::InProgress,
            move_history: Vec::new(),
        }
    }

    /// Applies `mv` and returns the resulting state; the input state is left
    /// untouched. The move is trusted to come from the generator for the
    /// side to move; no legality re-check happens here.
    ///
    /// Turn handoff: the opponent moves next, unless this move captured and
    /// the moved piece has another capture from its landing square, in which
    /// case the same player stays on turn to continue the chain. Callers
    /// drive the continuation by querying `legal_moves` from `mv.to` with
    /// `must_capture = true`.
    pub fn apply_move(&self, mv: &Move) -> GameState {
        let board = self.board.apply_move(mv);

        let mut white_pieces = self.white_pieces;
        let mut black_pieces = self.black_pieces;
        let mut white_captured = self.white_captured;
        let mut black_captured = self.black_captured;

        for taken in &mv.captured {
            match self.board.get_piece(*taken) {
                Some(piece) if piece.color == PieceColor::Black => {
                    black_pieces = black_pieces.saturating_sub(1);
                    white_captured = white_captured.saturating_add(1);
                }
                Some(_) => {
                    white_pieces = white_pieces.saturating_sub(1);
                    black_captured = black_captured.saturating_add(1);
                }
                None => {}
            }
        }

        let mut next_player = self.current_player.opponent();
        if mv.is_capture() && !legal_moves(&board, mv.to, true).is_empty() {
            next_player = self.current_player;
        }

        let winner = if black_pieces == 0 {
            GameOutcome::Won(PieceColor::White)
        } else if white_pieces == 0 {
            GameOutcome::Won(PieceColor::Black)
        } else if all_legal_moves(&board, next_player).is_empty() {
            // Stalemate loses: the side that cannot move forfeits the game.
            GameOutcome::Won(next_player.opponent())
        } else {
            GameOutcome::InProgress
        };

        let mut move_history = self.move_history.clone();
        move_history.push(mv.clone());

        GameState {
            board,
            current_player: next_player,
            white_pieces,
            black_pieces,
            white_captured,
            black_captured,
            winner,
            move_history,
        }
    }

    /// Leaf count of the move tree to `depth`, driven through the real
    /// applicator (so chain-capture turn retention is exercised). Diagnostic
    /// for generator/applicator regressions.
    pub fn perft(&self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let mut nodes = 0;
        for piece_moves in all_legal_moves(&self.board, self.current_player) {
            for mv in &piece_moves.moves {
                nodes += self.apply_move(mv).perft(depth - 1);
            }
        }
        nodes
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}
