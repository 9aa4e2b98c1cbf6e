use thiserror::Error;

/******************************************\
|==========================================|
|                 Squares                  |
|==========================================|
\******************************************/

/// # Square representation
///
/// - Represents the squares of a chess board
///
/// Discriminants follow the padded 16-file board numbering used by the FEN
/// codec and the board array: `a8 = 0`, `h8 = 7`, `a7 = 16`, ..., `h1 = 119`.
/// The file is `index & 15` and the rank row (counted from the top) is
/// `index >> 4`; indices with `index & 0x88 != 0` are padding and have no
/// square.

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Square {
    A8 = 0x00, B8, C8, D8, E8, F8, G8, H8,
    A7 = 0x10, B7, C7, D7, E7, F7, G7, H7,
    A6 = 0x20, B6, C6, D6, E6, F6, G6, H6,
    A5 = 0x30, B5, C5, D5, E5, F5, G5, H5,
    A4 = 0x40, B4, C4, D4, E4, F4, G4, H4,
    A3 = 0x50, B3, C3, D3, E3, F3, G3, H3,
    A2 = 0x60, B2, C2, D2, E2, F2, G2, H2,
    A1 = 0x70, B1, C1, D1, E1, F1, G1, H1,
}

impl Square {
    /// Number of addressable squares on the board
    pub const NUM: usize = 64;

    /// Number of slots in the padded board array (two 8-wide boards side by side)
    pub const SLOTS: usize = 128;

    /// Converts a padded-board index to a Square
    ///
    /// ## Safety
    /// - The index must satisfy `index & 0x88 == 0`, i.e. name a real square
    ///   rather than a padding slot
    #[inline]
    pub const unsafe fn from_unchecked(index: u8) -> Self {
        debug_assert!(index & 0x88 == 0, "padding index has no square");
        unsafe { std::mem::transmute(index) }
    }

    /// Converts a Square to its padded-board array index
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Converts a padded-board index to a Square, rejecting padding slots
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index & 0x88 == 0 {
            Some(unsafe { Self::from_unchecked(index) })
        } else {
            None
        }
    }

    /// Returns iterator for all squares in index order (a8, b8, ..., h1)
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..Self::SLOTS as u8)
            .filter(|i| i & 0x88 == 0)
            .map(|i| unsafe { Self::from_unchecked(i) })
    }
}

/******************************************\
|==========================================|
|                  Ranks                   |
|==========================================|
\******************************************/

/// # Ranks representation
///
/// - Represents the ranks of a chess board

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord)]
pub enum Rank {
    Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8,
}

impl Rank {
    /// Number of elements in the Rank enum
    pub const NUM: usize = 8;
}

crate::impl_from_to_primitive!(Rank);
crate::impl_enum_iter!(Rank);

/******************************************\
|==========================================|
|                  Files                   |
|==========================================|
\******************************************/

/// # Files representation
///
/// - Represents the files of a chess board

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord)]
pub enum File {
    FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
}

impl File {
    /// Number of elements in the File enum
    pub const NUM: usize = 8;
}

crate::impl_from_to_primitive!(File);
crate::impl_enum_iter!(File);

/******************************************\
|==========================================|
|              Implementation              |
|==========================================|
\******************************************/

impl Square {
    /// Returns the rank of a square
    ///
    /// The board numbering counts rows from the top, so rank 8 is row 0.
    pub const fn rank(&self) -> Rank {
        let row = (*self as u8) >> 4;
        unsafe { Rank::from_unchecked(7 - row) }
    }

    /// Returns the file of a square
    pub const fn file(&self) -> File {
        let file_index = (*self as u8) & 0xF;
        unsafe { File::from_unchecked(file_index) }
    }

    /// Combines a pair of file and rank to create a square
    pub const fn from_parts(file: File, rank: Rank) -> Self {
        let index = ((7 - rank as u8) << 4) | (file as u8);
        unsafe { Self::from_unchecked(index) }
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

impl std::fmt::Display for File {
    /// Displays the file in the form of its chess board representation (FileA => 'a')
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", (b'a' + (*self as u8)) as char)
    }
}

impl std::fmt::Display for Rank {
    /// Displays the rank in the form of its chess board representation (Rank1 => '1')
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", (b'1' + (*self as u8)) as char)
    }
}

impl std::fmt::Display for Square {
    /// Displays the square in the form of its algebraic name (Square::A1 => "a1")
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/******************************************\
|==========================================|
|              Parsing Strings             |
|==========================================|
\******************************************/

impl std::str::FromStr for File {
    type Err = ParseFileError;

    /// Parses the file string into a file, with error checking
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 1 {
            return Err(ParseFileError::InvalidLength(s.len()));
        }

        let file_char = s.chars().next().unwrap();
        match file_char {
            'a'..='h' => unsafe { Ok(File::from_unchecked(file_char as u8 - b'a')) },
            _ => Err(ParseFileError::InvalidChar(file_char)),
        }
    }
}

impl std::str::FromStr for Rank {
    type Err = ParseRankError;

    /// Parses the rank string into a rank, with error checking
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 1 {
            return Err(ParseRankError::InvalidLength(s.len()));
        }

        let rank_char = s.chars().next().unwrap();
        match rank_char {
            '1'..='8' => unsafe { Ok(Rank::from_unchecked(rank_char as u8 - b'1')) },
            _ => Err(ParseRankError::InvalidChar(rank_char)),
        }
    }
}

impl std::str::FromStr for Square {
    type Err = ParseSquareError;

    /// Parses an algebraic square name into a square, with error checking
    ///
    /// ## Examples
    ///
    /// ```
    /// use tutor_chess::core::{Square, ParseSquareError};
    /// use std::str::FromStr;
    ///
    /// assert_eq!(Square::from_str("a1").unwrap(), Square::A1);
    /// assert_eq!("h8".parse::<Square>().unwrap(), Square::H8);
    /// assert!(matches!("e9".parse::<Square>(), Err(ParseSquareError::InvalidRankChar('9'))));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 2 {
            return Err(ParseSquareError::InvalidLength(s.len()));
        }

        let mut chars = s.chars();
        let file_char = chars.next().unwrap();
        let rank_char = chars.next().unwrap();

        let file = file_char
            .to_string()
            .parse::<File>()
            .map_err(|_| ParseSquareError::InvalidFileChar(file_char))?;
        let rank = rank_char
            .to_string()
            .parse::<Rank>()
            .map_err(|_| ParseSquareError::InvalidRankChar(rank_char))?;

        Ok(Square::from_parts(file, rank))
    }
}

/******************************************\
|==========================================|
|            Square Parse Errors           |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFileError {
    #[error("Invalid length for file string: {0}, expected 1")]
    InvalidLength(usize),
    #[error("Invalid character for file string: '{0}', expected 'a'-'h'")]
    InvalidChar(char),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseRankError {
    #[error("Invalid length for rank string: {0}, expected 1")]
    InvalidLength(usize),
    #[error("Invalid character for rank string: '{0}', expected '1'-'8'")]
    InvalidChar(char),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseSquareError {
    #[error("Invalid length for square string: {0}, expected 2")]
    InvalidLength(usize),
    #[error("Invalid character for file string: '{0}', expected 'a'-'h'")]
    InvalidFileChar(char),
    #[error("Invalid character for rank string: '{0}', expected '1'-'8'")]
    InvalidRankChar(char),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_indices() {
        assert_eq!(Square::A8.index(), 0);
        assert_eq!(Square::H8.index(), 7);
        assert_eq!(Square::A7.index(), 16);
        assert_eq!(Square::E4.index(), 68);
        assert_eq!(Square::A1.index(), 112);
        assert_eq!(Square::H1.index(), 119);
    }

    #[test]
    fn test_square_from_parts() {
        assert_eq!(Square::from_parts(File::FileA, Rank::Rank1), Square::A1);
        assert_eq!(Square::from_parts(File::FileE, Rank::Rank4), Square::E4);
        assert_eq!(Square::from_parts(File::FileH, Rank::Rank8), Square::H8);
    }

    #[test]
    fn test_file_and_rank() {
        let square = Square::C6;
        assert_eq!(square.file(), File::FileC);
        assert_eq!(square.rank(), Rank::Rank6);
    }

    #[test]
    fn test_square_conversions() {
        for file in File::iter() {
            for rank in Rank::iter() {
                let square = Square::from_parts(file, rank);
                assert_eq!(square.file(), file);
                assert_eq!(square.rank(), rank);
            }
        }
    }

    #[test]
    fn test_from_index_rejects_padding() {
        assert_eq!(Square::from_index(0), Some(Square::A8));
        assert_eq!(Square::from_index(119), Some(Square::H1));

        for index in 0..=u8::MAX {
            let expected_valid = index < 128 && index & 0x88 == 0;
            assert_eq!(Square::from_index(index).is_some(), expected_valid);
        }
    }

    #[test]
    fn test_iter_covers_all_squares_in_index_order() {
        let squares: Vec<Square> = Square::iter().collect();
        assert_eq!(squares.len(), Square::NUM);
        assert_eq!(squares[0], Square::A8);
        assert_eq!(squares[7], Square::H8);
        assert_eq!(squares[8], Square::A7);
        assert_eq!(squares[63], Square::H1);

        for sq in &squares {
            assert_eq!(sq.index() & 0x88, 0);
        }
    }

    #[test]
    fn test_name_index_roundtrip() {
        for sq in Square::iter() {
            let name = sq.to_string();
            assert_eq!(name.parse::<Square>().unwrap(), sq);
        }
    }

    #[test]
    fn test_square_from_str_valid() {
        assert_eq!("a1".parse::<Square>().unwrap(), Square::A1);
        assert_eq!("h8".parse::<Square>().unwrap(), Square::H8);
        assert_eq!("e4".parse::<Square>().unwrap(), Square::E4);
        assert_eq!("c7".parse::<Square>().unwrap(), Square::C7);
        assert_eq!("g2".parse::<Square>().unwrap(), Square::G2);
    }

    #[test]
    fn test_square_from_str_invalid() {
        assert!(matches!(
            "e".parse::<Square>(),
            Err(ParseSquareError::InvalidLength(1))
        ));
        assert!(matches!(
            "e4g".parse::<Square>(),
            Err(ParseSquareError::InvalidLength(3))
        ));
        assert!(matches!(
            "".parse::<Square>(),
            Err(ParseSquareError::InvalidLength(0))
        ));

        assert!(matches!(
            "z4".parse::<Square>(),
            Err(ParseSquareError::InvalidFileChar('z'))
        ));
        assert!(matches!(
            "i1".parse::<Square>(),
            Err(ParseSquareError::InvalidFileChar('i'))
        ));
        assert!(matches!(
            "A1".parse::<Square>(),
            Err(ParseSquareError::InvalidFileChar('A'))
        ));

        assert!(matches!(
            "a9".parse::<Square>(),
            Err(ParseSquareError::InvalidRankChar('9'))
        ));
        assert!(matches!(
            "h0".parse::<Square>(),
            Err(ParseSquareError::InvalidRankChar('0'))
        ));
        assert!(matches!(
            "f ".parse::<Square>(),
            Err(ParseSquareError::InvalidRankChar(' '))
        ));
    }
}
