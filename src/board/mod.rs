mod fen;

use crate::error::{EngineError, EngineResult};
use crate::hash::zobrist::zobrist_keys;
use crate::moves::movegen;
use crate::moves::types::{Move, MoveScore, side_filtered_collector};
use crate::search;
use crate::square::{SQUARES, Square};
use std::fmt;
use tracing::debug;

/// Which side is to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline(always)]
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

/// Piece kinds, numbered so the Zobrist piece code `2 * kind + color` starts
/// at 2 and leaves 0 free for the empty square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 1,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Decode a 1-6 value into a PieceKind.
    #[inline(always)]
    pub(crate) fn from_u8(v: u8) -> Self {
        match v {
            1 => PieceKind::Pawn,
            2 => PieceKind::Rook,
            3 => PieceKind::Knight,
            4 => PieceKind::Bishop,
            5 => PieceKind::Queen,
            6 => PieceKind::King,
            _ => panic!("Invalid PieceKind encoding: {}", v),
        }
    }
}

const COLOR_BIT: u8 = 0b1000;
const KIND_MASK: u8 = 0b0111;

/// A square's occupant packed into one byte: 0 is the empty square, otherwise
/// bit 3 is the color (set = black) and bits 0..3 the [`PieceKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece(u8);

impl Piece {
    pub const EMPTY: Piece = Piece(0);

    #[inline(always)]
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Piece((color as u8) << 3 | kind as u8)
    }

    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub fn kind(self) -> Option<PieceKind> {
        match self.0 & KIND_MASK {
            0 => None,
            k => Some(PieceKind::from_u8(k)),
        }
    }

    #[inline(always)]
    pub fn color(self) -> Option<Color> {
        if self.is_empty() {
            None
        } else if self.0 & COLOR_BIT != 0 {
            Some(Color::Black)
        } else {
            Some(Color::White)
        }
    }

    /// Both fields at once; `None` for the empty square.
    #[inline(always)]
    pub fn split(self) -> Option<(Color, PieceKind)> {
        self.kind().map(|kind| {
            let color = if self.0 & COLOR_BIT != 0 {
                Color::Black
            } else {
                Color::White
            };
            (color, kind)
        })
    }

    /// False for the empty square, whatever `color` is.
    #[inline(always)]
    pub fn is_of_color(self, color: Color) -> bool {
        self.color() == Some(color)
    }

    /// Index into the Zobrist key table: 0 for empty, else `2 * kind + color`.
    #[inline(always)]
    pub(crate) fn code(self) -> usize {
        match self.split() {
            None => 0,
            Some((color, kind)) => 2 * kind as usize + color as usize,
        }
    }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// One snapshot of the game: 64 squares, the side to move and an
/// incrementally maintained Zobrist hash.
#[derive(Debug, Clone)]
pub struct Position {
    squares: [Piece; SQUARES],
    side_to_move: Color,
    hash: u64,
}

impl Position {
    /// An empty board with White to move.
    pub fn empty() -> Self {
        let mut pos = Position {
            squares: [Piece::EMPTY; SQUARES],
            side_to_move: Color::White,
            hash: 0,
        };
        pos.refresh_hash();
        pos
    }

    /// The canonical starting position.
    pub fn start() -> Self {
        let mut pos = Position::empty();
        pos.reset();
        pos
    }

    /// Install the starting layout, set White to move and recompute the hash.
    pub fn reset(&mut self) {
        self.squares = [Piece::EMPTY; SQUARES];
        for (x, &kind) in BACK_RANK.iter().enumerate() {
            self.squares[x] = Piece::new(Color::White, kind);
            self.squares[8 + x] = Piece::new(Color::White, PieceKind::Pawn);
            self.squares[48 + x] = Piece::new(Color::Black, PieceKind::Pawn);
            self.squares[56 + x] = Piece::new(Color::Black, kind);
        }
        self.side_to_move = Color::White;
        self.refresh_hash();
    }

    #[inline(always)]
    pub fn get(&self, sq: Square) -> Piece {
        self.squares[sq.index()]
    }

    #[inline(always)]
    pub fn get_ix(&self, ix: usize) -> Piece {
        self.squares[ix]
    }

    /// Raw placement. Does not touch the hash; call [`Position::refresh_hash`]
    /// after a batch of edits.
    #[inline(always)]
    pub fn set(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.index()] = piece;
    }

    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline(always)]
    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    #[inline(always)]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Move the piece on `mv.from` to `mv.to`, clear the origin, toggle the
    /// side to move and keep the hash in sync by XOR-ing the four square
    /// deltas plus the side key.
    pub fn apply(&mut self, mv: &Move) {
        let keys = zobrist_keys();
        let from_ix = mv.from.index();
        let to_ix = mv.to.index();
        let moving = self.squares[from_ix];
        self.hash ^= keys.piece[to_ix][self.squares[to_ix].code()];
        self.hash ^= keys.piece[to_ix][moving.code()];
        self.hash ^= keys.piece[from_ix][moving.code()];
        self.hash ^= keys.piece[from_ix][Piece::EMPTY.code()];
        self.squares[to_ix] = moving;
        self.squares[from_ix] = Piece::EMPTY;
        self.side_to_move = self.side_to_move.opposite();
        self.hash ^= keys.side_to_move;
    }

    /// Full recompute from current state. Must match the incremental hash at
    /// all times.
    pub fn compute_hash_full(&self) -> u64 {
        let keys = zobrist_keys();
        let mut hash = 0u64;
        for (ix, piece) in self.squares.iter().enumerate() {
            hash ^= keys.piece[ix][piece.code()];
        }
        if self.side_to_move == Color::Black {
            hash ^= keys.side_to_move;
        }
        hash
    }

    /// Recompute from current state and store into `self.hash`.
    #[inline]
    pub fn refresh_hash(&mut self) {
        self.hash = self.compute_hash_full();
    }
}

/// Positions are equal when their squares and side to move agree; the hash is
/// derived from both and not compared.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.side_to_move == other.side_to_move && self.squares == other.squares
    }
}

impl Eq for Position {}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

/// The public playing surface: a stack of [`Position`] snapshots. Every
/// mutation pushes a copy first, so undo is a pop.
#[derive(Debug, Clone)]
pub struct Board {
    stack: Vec<Position>,
}

impl Board {
    /// A board at the starting position with an empty undo history.
    pub fn new() -> Self {
        Board {
            stack: vec![Position::start()],
        }
    }

    /// The current position (top of the stack).
    pub fn current(&self) -> &Position {
        self.top()
    }

    #[inline]
    fn top(&self) -> &Position {
        self.stack.last().expect("position stack is never empty")
    }

    #[inline]
    fn top_mut(&mut self) -> &mut Position {
        self.stack
            .last_mut()
            .expect("position stack is never empty")
    }

    /// Drop all history and start over from the initial position.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.stack.push(Position::start());
    }

    /// All moves for the side to move. Friendly-target emissions from the raw
    /// generator are filtered out here.
    pub fn get_moves(&self) -> Vec<Move> {
        let pos = self.top();
        let mut moves = Vec::new();
        let mut collect = side_filtered_collector(&mut moves, pos.side_to_move());
        movegen::generate(pos, &mut collect);
        drop(collect);
        moves
    }

    /// Moves from one square, validating that the square is on the board,
    /// occupied, and holds a piece of the side to move.
    pub fn get_moves_from(&self, sq: Square) -> EngineResult<Vec<Move>> {
        let pos = self.top();
        if !sq.is_inside() {
            return Err(EngineError::InvalidPosition);
        }
        let piece = pos.get(sq);
        if piece.is_empty() {
            return Err(EngineError::NoPieceHere);
        }
        if !piece.is_of_color(pos.side_to_move()) {
            return Err(EngineError::WrongPlayersTurn);
        }
        let mut moves = Vec::new();
        let mut collect = side_filtered_collector(&mut moves, pos.side_to_move());
        movegen::generate_from(pos, sq, &mut collect)?;
        drop(collect);
        Ok(moves)
    }

    /// Play a move after checking its target against the generator's output
    /// for the origin square.
    pub fn make_move(&mut self, mv: &Move) -> EngineResult<()> {
        let legal = self.get_moves_from(mv.from)?;
        if !legal.iter().any(|m| m.to == mv.to) {
            return Err(EngineError::InvalidMove);
        }
        let next = self.top().clone();
        self.stack.push(next);
        self.top_mut().apply(mv);
        Ok(())
    }

    /// Play a move given as text, e.g. `D2-D4` or `e3xe7`.
    pub fn make_move_text(&mut self, text: &str) -> EngineResult<()> {
        let mv = Move::from_text(text)?;
        self.make_move(&mv)
    }

    /// Pop the current position, restoring the previous snapshot exactly.
    pub fn undo(&mut self) -> EngineResult<()> {
        if self.stack.len() <= 1 {
            return Err(EngineError::NoUndoAvailable);
        }
        self.stack.pop();
        Ok(())
    }

    /// Static evaluation of the current position, relative to the side to move.
    pub fn evaluate(&self) -> i32 {
        search::eval::evaluate(self.top())
    }

    /// Iterative-deepening search on the current position. `on_progress` is
    /// called once per depth with the best move so far.
    pub fn think(
        &self,
        max_depth: u32,
        on_progress: impl FnMut(&Move, u32, i32),
    ) -> EngineResult<Vec<MoveScore>> {
        search::search::think(self.top(), max_depth, on_progress)
    }

    /// The current position as FEN (board layout and active color).
    pub fn fen(&self) -> String {
        self.top().to_fen()
    }

    /// Load a FEN string as a new snapshot on top of the stack, so a load is
    /// undoable. A parse failure leaves the stack untouched.
    pub fn load_fen(&mut self, text: &str) -> EngineResult<()> {
        let mut next = Position::empty();
        next.set_fen(text)?;
        debug!(fen = text.trim(), hash = next.hash(), "loaded position");
        self.stack.push(next);
        Ok(())
    }

    /// Zobrist hash of the current position.
    pub fn hash(&self) -> u64 {
        self.top().hash()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

#[cfg(test)]
mod tests;
