use thiserror::Error;

use crate::core::Colour;

/******************************************\
|==========================================|
|                  Piece                   |
|==========================================|
\******************************************/

/// # Piece representation
///
/// - Represents the different chess pieces

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    WhitePawn, BlackPawn, WhiteKnight, BlackKnight, WhiteBishop, BlackBishop, WhiteRook, BlackRook, WhiteQueen, BlackQueen, WhiteKing, BlackKing
}

impl Piece {
    /// Number of elements in the Piece enum
    pub const NUM: usize = 12;
}

crate::impl_from_to_primitive!(Piece);
crate::impl_enum_iter!(Piece);

/******************************************\
|==========================================|
|                Piece Type                |
|==========================================|
\******************************************/

/// # Piece Type representation
///
/// - Represents the different chess piece types

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceType {
   Pawn, Knight, Bishop, Rook, Queen, King,
}

impl PieceType {
    /// Number of elements in the PieceType enum
    pub const NUM: usize = 6;
}

crate::impl_from_to_primitive!(PieceType);
crate::impl_enum_iter!(PieceType);

/******************************************\
|==========================================|
|              Implementation              |
|==========================================|
\******************************************/

impl Piece {
    /// Returns the piece type of the piece
    pub const fn pt(self) -> PieceType {
        unsafe { PieceType::from_unchecked(self as u8 >> 1) }
    }

    /// Returns the colour of the piece
    pub const fn colour(self) -> Colour {
        unsafe { Colour::from_unchecked(self as u8 & 1) }
    }

    /// Combines a colour and piece type pair to create a piece
    ///
    /// ## Examples
    ///
    /// ```
    /// use tutor_chess::core::{Piece, Colour, PieceType};
    ///
    /// assert_eq!(Piece::from_parts(Colour::White, PieceType::Pawn), Piece::WhitePawn);
    /// assert_eq!(Piece::from_parts(Colour::Black, PieceType::King), Piece::BlackKing);
    /// ```
    pub const fn from_parts(colour: Colour, piece_type: PieceType) -> Self {
        unsafe { Piece::from_unchecked(colour as u8 | (piece_type as u8) << 1) }
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

/// String to convert from piece/piece type to their FEN letter
const PIECE_STR: &str = "PpNnBbRrQqKk";

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let piece_char = PIECE_STR.chars().nth(self.index()).unwrap();
        write!(f, "{}", piece_char)
    }
}

impl std::fmt::Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let piece_char = PIECE_STR
            .chars()
            .nth(self.index() << 1)
            .unwrap()
            .to_ascii_lowercase();
        write!(f, "{}", piece_char)
    }
}

/******************************************\
|==========================================|
|                Parse Piece               |
|==========================================|
\******************************************/

impl std::str::FromStr for Piece {
    type Err = ParsePieceError;

    /// Parse the FEN piece letter into a piece, with error checking
    ///
    /// ## Examples
    ///
    /// ```
    /// use tutor_chess::core::{Piece, ParsePieceError};
    /// use std::str::FromStr;
    ///
    /// assert_eq!(Piece::from_str("P").unwrap(), Piece::WhitePawn);
    /// assert_eq!("k".parse::<Piece>().unwrap(), Piece::BlackKing);
    /// assert!(matches!("X".parse::<Piece>(), Err(ParsePieceError::InvalidChar('X'))));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 1 {
            return Err(ParsePieceError::InvalidLength(s.len()));
        }

        let piece_char = s.chars().next().ok_or(ParsePieceError::InvalidLength(0))?;
        let index = PIECE_STR
            .chars()
            .position(|c| c == piece_char)
            .ok_or(ParsePieceError::InvalidChar(piece_char))? as u8;

        unsafe { Ok(Piece::from_unchecked(index)) }
    }
}

/******************************************\
|==========================================|
|              Widget Codes                |
|==========================================|
\******************************************/

/// Two-character codes used by the board widget: colour letter + kind letter,
/// in enum order.
const PIECE_CODES: [&str; Piece::NUM] = [
    "wp", "bp", "wn", "bn", "wb", "bb", "wr", "br", "wq", "bq", "wk", "bk",
];

impl Piece {
    /// Returns the two-character widget code for the piece ("wp", "bk", ...)
    pub const fn code(self) -> &'static str {
        PIECE_CODES[self as usize]
    }

    /// Parses a two-character widget code into a piece, with error checking
    ///
    /// ## Examples
    ///
    /// ```
    /// use tutor_chess::core::{Piece, ParsePieceError};
    ///
    /// assert_eq!(Piece::from_code("wp").unwrap(), Piece::WhitePawn);
    /// assert_eq!(Piece::from_code("bk").unwrap(), Piece::BlackKing);
    /// assert!(Piece::from_code("xq").is_err());
    /// ```
    pub fn from_code(code: &str) -> Result<Self, ParsePieceError> {
        if code.len() != 2 {
            return Err(ParsePieceError::InvalidLength(code.len()));
        }

        let index = PIECE_CODES
            .iter()
            .position(|c| *c == code)
            .ok_or_else(|| ParsePieceError::InvalidChar(code.chars().next().unwrap()))?
            as u8;

        unsafe { Ok(Piece::from_unchecked(index)) }
    }
}

/******************************************\
|==========================================|
|            Piece Parse Error             |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePieceError {
    #[error("Invalid length for piece string: {0}, expected 1")]
    InvalidLength(usize),
    #[error("Invalid character for piece string: '{0}'")]
    InvalidChar(char),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
