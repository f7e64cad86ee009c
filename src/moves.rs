use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Board, Piece, PieceColor, PieceRank, Position};

/// Inline-allocated move list; eight covers the worst realistic fan-out of a
/// single piece (a centered flying king).
pub type MoveList = SmallVec<[Move; 8]>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    /// Squares of the pieces this move removes. Empty for a plain step; a
    /// single entry per jump (multi-jumps are chained as separate moves).
    #[serde(default)]
    pub captured: SmallVec<[Position; 4]>,
}

impl Move {
    pub fn step(from: Position, to: Position) -> Self {
        Move {
            from,
            to,
            captured: SmallVec::new(),
        }
    }

    pub fn jump(from: Position, to: Position, captured: Position) -> Self {
        let mut taken = SmallVec::new();
        taken.push(captured);
        Move {
            from,
            to,
            captured: taken,
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

/// One movable piece together with everything it may legally do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceMoves {
    pub position: Position,
    pub moves: MoveList,
}

/// Diagonal directions a piece may move in: the two forward ones for a man,
/// all four for a king.
fn move_directions(piece: Piece) -> ArrayVec<(i8, i8), 4> {
    let mut dirs = ArrayVec::new();
    match piece.rank {
        PieceRank::Normal => {
            let fwd = piece.color.forward();
            dirs.push((fwd, -1));
            dirs.push((fwd, 1));
        }
        PieceRank::King => {
            dirs.push((-1, -1));
            dirs.push((-1, 1));
            dirs.push((1, -1));
            dirs.push((1, 1));
        }
    }
    dirs
}

fn man_moves_in_direction(
    board: &Board,
    from: Position,
    piece: Piece,
    dir: (i8, i8),
    must_capture: bool,
    steps: &mut MoveList,
    captures: &mut MoveList,
) {
    let adjacent = from.offset(dir.0, dir.1);
    if !adjacent.in_bounds() {
        return;
    }

    match board.get_piece(adjacent) {
        None => {
            if !must_capture {
                steps.push(Move::step(from, adjacent));
            }
        }
        Some(target) if target.color != piece.color => {
            let landing = adjacent.offset(dir.0, dir.1);
            if landing.in_bounds() && board.get_piece(landing).is_none() {
                captures.push(Move::jump(from, landing, adjacent));
            }
        }
        Some(_) => {}
    }
}

/// Flying-king ray walk: step one square onto an empty neighbour, or capture
/// a single enemy anywhere along the diagonal and land on any empty square
/// beyond it. A second piece of either color closes the ray.
fn king_moves_in_direction(
    board: &Board,
    from: Position,
    piece: Piece,
    dir: (i8, i8),
    must_capture: bool,
    steps: &mut MoveList,
    captures: &mut MoveList,
) {
    let mut current = from.offset(dir.0, dir.1);
    let mut distance = 1;
    let mut found_enemy: Option<Position> = None;

    while current.in_bounds() {
        match board.get_piece(current) {
            None => {
                if let Some(enemy) = found_enemy {
                    captures.push(Move::jump(from, current, enemy));
                } else if distance == 1 && !must_capture {
                    steps.push(Move::step(from, current));
                }
            }
            Some(target) if target.color != piece.color && found_enemy.is_none() => {
                found_enemy = Some(current);
            }
            Some(_) => break,
        }
        current = current.offset(dir.0, dir.1);
        distance += 1;
    }
}

/// Legal moves for the piece at `position`. If the piece has any capture,
/// only captures are returned; `must_capture` additionally suppresses plain
/// steps (used when a capture exists elsewhere on the board, and when
/// continuing a jump chain). An empty square yields an empty list.
pub fn legal_moves(board: &Board, position: Position, must_capture: bool) -> MoveList {
    let piece = match board.get_piece(position) {
        Some(piece) => piece,
        None => return MoveList::new(),
    };

    let mut steps = MoveList::new();
    let mut captures = MoveList::new();

    for dir in move_directions(piece) {
        match piece.rank {
            PieceRank::Normal => man_moves_in_direction(
                board,
                position,
                piece,
                dir,
                must_capture,
                &mut steps,
                &mut captures,
            ),
            PieceRank::King => king_moves_in_direction(
                board,
                position,
                piece,
                dir,
                must_capture,
                &mut steps,
                &mut captures,
            ),
        }
    }

    if !captures.is_empty() {
        captures
    } else if must_capture {
        MoveList::new()
    } else {
        steps
    }
}

/// Every movable piece of `color` with its move list, in board scan order.
///
/// Two passes: the first detects whether any piece of `color` can capture
/// anywhere; the second regenerates per-piece lists with that flag, so one
/// available capture silences every plain step on the board. Pieces with no
/// moves are omitted.
pub fn all_legal_moves(board: &Board, color: PieceColor) -> Vec<PieceMoves> {
    let mut has_capture = false;
    for (position, piece) in board.pieces() {
        if piece.color != color {
            continue;
        }
        if legal_moves(board, position, false)
            .iter()
            .any(Move::is_capture)
        {
            has_capture = true;
            break;
        }
    }

    let mut all_moves = Vec::new();
    for (position, piece) in board.pieces() {
        if piece.color != color {
            continue;
        }
        let moves = legal_moves(board, position, has_capture);
        if !moves.is_empty() {
            all_moves.push(PieceMoves { position, moves });
        }
    }
    all_moves
}
