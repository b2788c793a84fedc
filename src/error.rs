//! Error types for the engine core.
//!
//! Every fallible public operation returns [`EngineResult`]; the REPL at the
//! outer boundary converts these into printed `Error: <message>` lines.

use thiserror::Error;

/// Errors surfaced by the board façade, FEN reader and search.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Square is outside the 8x8 board.
    #[error("not a valid position")]
    InvalidPosition,

    /// Move listing requested for an empty square.
    #[error("no piece on this square")]
    NoPieceHere,

    /// Move listing requested for a piece of the side not to move.
    #[error("not this player's turn")]
    WrongPlayersTurn,

    /// Move whose target is not among the legal targets of its origin.
    #[error("not a valid move")]
    InvalidMove,

    /// Undo requested with only the current position on the stack.
    #[error("there is no undo buffer left")]
    NoUndoAvailable,

    /// Search requested in a position where the side to move has no moves.
    #[error("no moves possible")]
    NoMovesPossible,

    /// FEN board section places more than 64 squares.
    #[error("too many pieces")]
    FenTooManyPieces,

    /// FEN board section ends before all 64 squares are covered.
    #[error("too few pieces")]
    FenTooFewPieces,

    /// Move generation was asked to start from an empty square. Callers are
    /// expected to check occupancy first; hitting this is a programming error.
    #[error("unable to move this piece")]
    InvalidGenerateTarget,
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
