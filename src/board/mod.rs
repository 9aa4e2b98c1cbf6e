pub mod fen;

pub use fen::{FenParseError, START_FEN};

use crate::core::*;

/******************************************\
|==========================================|
|                  Board                   |
|==========================================|
\******************************************/

/// # Board state
///
/// Value type holding a full position: the padded 128-slot square array,
/// side to move, castling rights, en-passant target and the move clocks.
/// The codec replaces it wholesale on `set`; there is no incremental
/// mutation API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    board: [Option<Piece>; Square::SLOTS],

    // Cached king squares for O(1) lookup, indexed by colour
    kings: [Option<Square>; Colour::NUM],

    stm: Colour,

    castle: Castling,

    enpassant: Option<Square>,

    halfmove_clock: u8,

    fullmove_number: u16,
}

/******************************************\
|==========================================|
|           Basic Implementation           |
|==========================================|
\******************************************/

impl Default for Board {
    fn default() -> Board {
        let mut board = Board::new();
        board.set(START_FEN).unwrap();
        board
    }
}

impl Board {
    /// Creates an empty board: no pieces, white to move, no castling rights
    pub(crate) fn new() -> Board {
        Board {
            board: [None; Square::SLOTS],
            kings: [None; Colour::NUM],
            stm: Colour::White,
            castle: Castling::NONE,
            enpassant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Returns the piece on a square, if any
    ///
    /// Only the 64 addressable slots are reachable through `Square`; the
    /// padding slots of the 128-wide array stay `None` for the lifetime of
    /// the board.
    #[inline]
    pub fn on(&self, square: Square) -> Option<Piece> {
        unsafe { *self.board.get_unchecked(square.index()) }
    }

    #[inline]
    pub fn stm(&self) -> Colour {
        self.stm
    }

    #[inline]
    pub fn castling(&self) -> Castling {
        self.castle
    }

    #[inline]
    pub fn ep(&self) -> Option<Square> {
        self.enpassant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u8 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Returns the cached king square for a colour, if one was recorded
    ///
    /// Position legality is not enforced; for a placement with several kings
    /// of one colour the cache holds the last one parsed.
    #[inline]
    pub fn king_square(&self, colour: Colour) -> Option<Square> {
        self.kings[colour.index()]
    }

    /// Iterates over all occupied squares in index order (a8 first)
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|sq| self.on(sq).map(|piece| (sq, piece)))
    }

    /// Places a piece on a square, updating the king cache
    pub(crate) fn add_piece(&mut self, piece: Piece, square: Square) {
        self.board[square.index()] = Some(piece);

        if piece.pt() == PieceType::King {
            self.kings[piece.colour().index()] = Some(square);
        }
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SEPARATOR: &str = "\n     +---+---+---+---+---+---+---+---+";

        writeln!(f, "{}", SEPARATOR)?;

        for rank in Rank::iter().rev() {
            write!(f, " {}   |", rank as u8 + 1)?;

            for file in File::iter() {
                let square = Square::from_parts(file, rank);
                let cell = match self.on(square) {
                    Some(piece) => piece.to_string(),
                    None => " ".to_string(),
                };
                write!(f, " {} |", cell)?;
            }

            writeln!(f, "{}", SEPARATOR)?;
        }

        writeln!(f)?;
        writeln!(f, "       A   B   C   D   E   F   G   H")?;
        writeln!(f)?;
        writeln!(f, "Current Side: {:?}", self.stm())?;
        writeln!(f, "Castling: {}", self.castle)?;
        writeln!(
            f,
            "En Passant Square: {}",
            match self.enpassant {
                Some(square) => square.to_string(),
                None => "None".to_string(),
            }
        )?;
        writeln!(f, "Half Move Clock: {}", self.halfmove_clock)?;
        writeln!(f, "Full Move: {}", self.fullmove_number)?;
        writeln!(f, "Fen: {}", self.fen())?;

        Ok(())
    }
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
    fn test_default_is_start_position() {
        let board = Board::default();

        assert_eq!(board.on(Square::A1), Some(Piece::WhiteRook));
        assert_eq!(board.on(Square::E1), Some(Piece::WhiteKing));
        assert_eq!(board.on(Square::E8), Some(Piece::BlackKing));
        assert_eq!(board.on(Square::D8), Some(Piece::BlackQueen));
        assert_eq!(board.on(Square::E4), None);
        assert_eq!(board.stm(), Colour::White);
        assert_eq!(board.castling(), Castling::ALL);
        assert_eq!(board.ep(), None);
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
    }

    #[test]
    fn test_king_cache() {
        let board = Board::default();
        assert_eq!(board.king_square(Colour::White), Some(Square::E1));
        assert_eq!(board.king_square(Colour::Black), Some(Square::E8));

        let board = Board::from_fen("8/8/8/4p3/3P4/8/8/8 w - - 0 1").unwrap();
        assert_eq!(board.king_square(Colour::White), None);
        assert_eq!(board.king_square(Colour::Black), None);
    }

    #[test]
    fn test_pieces_iterator() {
        let board = Board::from_fen("8/8/8/4p3/3P4/8/8/8 w - - 0 1").unwrap();
        let pieces: Vec<(Square, Piece)> = board.pieces().collect();
        assert_eq!(
            pieces,
            vec![
                (Square::E5, Piece::BlackPawn),
                (Square::D4, Piece::WhitePawn),
            ]
        );

        let board = Board::default();
        assert_eq!(board.pieces().count(), 32);
    }

    #[test]
    fn test_padding_slots_stay_empty() {
        let board = Board::default();

        for index in 0..Square::SLOTS as u8 {
            if index & 0x88 != 0 {
                assert_eq!(board.board[index as usize], None);
            }
        }
    }

    #[test]
    fn test_display_mentions_fen() {
        let board = Board::default();
        let text = board.to_string();
        assert!(text.contains(START_FEN));
        assert!(text.contains("Current Side: White"));
    }
}
