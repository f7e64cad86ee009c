use crate::board::{Board, PieceColor};
use crate::evaluation::evaluate;
use crate::game::GameState;
use crate::moves::{all_legal_moves, Move};

pub const INFINITY: i32 = 1_000_000;

/// AI strength presets, mapped straight onto search depth. Depth is the only
/// throttle: there is no time control, so interactive callers should stay at
/// these plies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[inline]
    pub fn depth(self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn to_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Picks a move for the side to move in `state` at the given difficulty.
/// Returns `None` when that side has no legal move (it has already lost).
pub fn best_move(state: &GameState, difficulty: Difficulty) -> Option<Move> {
    best_move_at_depth(state, difficulty.depth())
}

/// Fixed-depth minimax with alpha-beta pruning. Deterministic: given the
/// same state and depth, the same move comes back every time; score ties go
/// to the move generated first.
pub fn best_move_at_depth(state: &GameState, depth: u8) -> Option<Move> {
    let (_, mv) = minimax(
        &state.board,
        depth,
        -INFINITY,
        INFINITY,
        true,
        state.current_player,
    );
    mv
}

/// Recursive tree walk. The maximizing side is always `ai_color`, and every
/// leaf is scored from `ai_color`'s perspective regardless of whose turn it
/// is at that node; the min/max branching supplies the negation. Plies
/// alternate colors strictly, so a jump chain inside the tree is explored
/// one jump per ply.
fn minimax(
    board: &Board,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    ai_color: PieceColor,
) -> (i32, Option<Move>) {
    let to_move = if maximizing {
        ai_color
    } else {
        ai_color.opponent()
    };
    let all_moves = all_legal_moves(board, to_move);

    if depth == 0 || all_moves.is_empty() {
        return (evaluate(board, ai_color), None);
    }

    let mut best: Option<Move> = None;

    if maximizing {
        let mut max_score = -INFINITY;
        'search: for piece_moves in &all_moves {
            for mv in &piece_moves.moves {
                let next = board.apply_move(mv);
                let (score, _) = minimax(&next, depth - 1, alpha, beta, false, ai_color);
                if score > max_score {
                    max_score = score;
                    best = Some(mv.clone());
                }
                alpha = alpha.max(score);
                if beta <= alpha {
                    break 'search;
                }
            }
        }
        (max_score, best)
    } else {
        let mut min_score = INFINITY;
        'search: for piece_moves in &all_moves {
            for mv in &piece_moves.moves {
                let next = board.apply_move(mv);
                let (score, _) = minimax(&next, depth - 1, alpha, beta, true, ai_color);
                if score < min_score {
                    min_score = score;
                    best = Some(mv.clone());
                }
                beta = beta.min(score);
                if beta <= alpha {
                    break 'search;
                }
            }
        }
        (min_score, best)
    }
}

/// Root-split parallel search: every top-level branch is searched
/// independently with a full window, then the results are combined in
/// generation order. Returns the same move as `best_move_at_depth` (ties
/// still go to the earliest branch) at the cost of weaker pruning across
/// root siblings.
#[cfg(feature = "parallel")]
pub fn best_move_at_depth_parallel(state: &GameState, depth: u8) -> Option<Move> {
    use rayon::prelude::*;

    let ai_color = state.current_player;
    let root_moves: Vec<Move> = all_legal_moves(&state.board, ai_color)
        .into_iter()
        .flat_map(|piece_moves| piece_moves.moves)
        .collect();

    if depth == 0 || root_moves.is_empty() {
        return None;
    }

    let scores: Vec<i32> = root_moves
        .par_iter()
        .map(|mv| {
            let next = state.board.apply_move(mv);
            minimax(&next, depth - 1, -INFINITY, INFINITY, false, ai_color).0
        })
        .collect();

    let mut best_index = 0;
    for (index, score) in scores.iter().enumerate().skip(1) {
        if *score > scores[best_index] {
            best_index = index;
        }
    }
    Some(root_moves[best_index].clone())
}
