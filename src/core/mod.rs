// Core module exports

pub mod macros;
pub mod piece;
pub mod square;
pub mod types;

// Re-export common types for easier access
pub use piece::{ParsePieceError, Piece, PieceType};
pub use square::{File, ParseFileError, ParseRankError, ParseSquareError, Rank, Square};
pub use types::{Castling, Colour};
