use super::Board;

use crate::core::*;
use thiserror::Error;

/******************************************\
|==========================================|
|            Useful fen strings            |
|==========================================|
\******************************************/

/// The standard chess starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/******************************************\
|==========================================|
|               Parse Fen                  |
|==========================================|
\******************************************/

impl Board {
    pub const FEN_SECTIONS: usize = 6;

    /// Replaces this board wholesale with the position described by `fen`.
    ///
    /// The incoming string is parsed into a fresh board first, so a failed
    /// parse leaves the existing state untouched.
    pub fn set(&mut self, fen: &str) -> Result<(), FenParseError> {
        *self = Board::from_fen(fen)?;
        Ok(())
    }

    /// Parses the six whitespace-separated FEN fields into a new board
    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        let mut board = Board::new();

        let mut parts = fen.split_whitespace();

        let piece_placement = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        board.parse_piece_placement(piece_placement)?;

        let side_to_move = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        board.parse_side_to_move(side_to_move)?;

        let castling = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        board.parse_castling(castling)?;

        let enpassant = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        board.parse_enpassant(enpassant)?;

        let halfmove_token = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        board.halfmove_clock = Self::parse_halfmove(halfmove_token)?;

        let fullmove_token = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        board.fullmove_number = Self::parse_fullmove(fullmove_token)?;

        if parts.next().is_some() {
            return Err(FenParseError::InvalidNumberOfFields);
        }

        Ok(board)
    }

    /// Serializes the board back into the six FEN fields
    ///
    /// Piece placement is generated rank 8 to rank 1, file a to file h, with
    /// consecutive empty squares collapsed into a digit run.
    pub fn fen(&self) -> String {
        let mut fen = String::new();

        for rank in Rank::iter().rev() {
            let mut empty_count = 0;
            for file in File::iter() {
                let square = Square::from_parts(file, rank);
                match self.on(square) {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push_str(&piece.to_string());
                    }
                    None => {
                        empty_count += 1;
                    }
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank != Rank::Rank1 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push_str(match self.stm {
            Colour::White => "w",
            Colour::Black => "b",
        });

        fen.push_str(&format!(" {}", self.castle));

        fen.push(' ');
        match self.enpassant {
            Some(square) => fen.push_str(&square.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {}", self.halfmove_clock));

        fen.push_str(&format!(" {}", self.fullmove_number));

        fen
    }

    fn parse_separator(
        rank_iter: &mut impl DoubleEndedIterator<Item = Rank>,
        rank: Rank,
        file: u8,
    ) -> Result<(Rank, u8), FenParseError> {
        if file != 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Rank {:?} ended prematurely at file index {} (expected 8) before '/'",
                rank, file
            )));
        }

        let next_rank = rank_iter.next().ok_or_else(|| {
            FenParseError::InvalidRankFormat(format!(
                "Too many rank separators ('/') found after completing rank {:?}",
                rank
            ))
        })?;

        Ok((next_rank, 0))
    }

    fn parse_skip(
        skip: char,
        idx: usize,
        current_rank: Rank,
        current_file_index: u8,
    ) -> Result<u8, FenParseError> {
        let skip_val = skip.to_digit(10).unwrap();

        if !(1..=8).contains(&skip_val) {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Invalid skip digit '{}' (must be 1-8) at char index {}",
                skip, idx
            )));
        }

        let skip_u8 = skip_val as u8;

        if current_file_index + skip_u8 > 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Skip value {} exceeds rank length at file index {} on rank {:?}",
                skip_u8, current_file_index, current_rank
            )));
        }

        Ok(skip_u8)
    }

    fn parse_piece(&mut self, piece: char, rank: Rank, file: u8) -> Result<(), FenParseError> {
        if file >= 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Piece placement '{}' attempted beyond file H (index >= 8) on rank {:?}",
                piece, rank
            )));
        }

        let piece_enum = piece
            .to_string()
            .parse::<Piece>()
            .map_err(|_| FenParseError::InvalidPiecePlacementChar(piece))?;

        let current_file = unsafe { File::from_unchecked(file) };

        let sq = Square::from_parts(current_file, rank);

        self.add_piece(piece_enum, sq);

        Ok(())
    }

    pub(crate) fn parse_piece_placement(
        &mut self,
        piece_placement: &str,
    ) -> Result<(), FenParseError> {
        let mut rank_iter = Rank::iter().rev();

        let mut rank = rank_iter
            .next()
            .ok_or_else(|| FenParseError::InvalidRankFormat("Board has no ranks?".to_string()))?;

        let mut file: u8 = 0;

        for (i, char) in piece_placement.chars().enumerate() {
            match char {
                '/' => {
                    (rank, file) = Self::parse_separator(&mut rank_iter, rank, file)?;
                }

                skip if skip.is_ascii_digit() => {
                    file += Self::parse_skip(skip, i, rank, file)?;
                }

                piece_char => {
                    self.parse_piece(piece_char, rank, file)?;
                    file += 1;
                }
            }
        }

        if file != 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Final rank {:?} ended prematurely at file index {} (expected 8)",
                rank, file
            )));
        }

        if rank_iter.next().is_some() {
            return Err(FenParseError::InvalidRankFormat(
                "Not enough ranks specified in FEN string (expected 8)".to_string(),
            ));
        }

        Ok(())
    }

    fn parse_side_to_move(&mut self, side_to_move: &str) -> Result<(), FenParseError> {
        match side_to_move {
            "w" => self.stm = Colour::White,
            "b" => self.stm = Colour::Black,
            _ => return Err(FenParseError::InvalidSideToMove(side_to_move.to_string())),
        };
        Ok(())
    }

    fn parse_castling(&mut self, castling: &str) -> Result<(), FenParseError> {
        self.castle = Castling::NONE;

        if castling == "-" {
            return Ok(());
        }

        for c in castling.chars() {
            match c {
                'K' => self.castle.set(Castling::WK),
                'Q' => self.castle.set(Castling::WQ),
                'k' => self.castle.set(Castling::BK),
                'q' => self.castle.set(Castling::BQ),
                _ => return Err(FenParseError::InvalidCastlingChar(c)),
            };
        }

        Ok(())
    }

    fn parse_enpassant(&mut self, enpassant: &str) -> Result<(), FenParseError> {
        self.enpassant = match enpassant {
            "-" => None,

            _ => {
                let square = enpassant
                    .parse::<Square>()
                    .map_err(|_| FenParseError::InvalidEnPassantSquare(enpassant.to_string()))?;

                if ![Rank::Rank3, Rank::Rank6].contains(&square.rank()) {
                    return Err(FenParseError::InvalidEnPassantSquare(format!(
                        "{square} is not a valid enpassant square"
                    )));
                }
                Some(square)
            }
        };
        Ok(())
    }

    fn parse_halfmove(halfmove_token: &str) -> Result<u8, FenParseError> {
        halfmove_token
            .parse::<u8>()
            .map_err(|_| FenParseError::InvalidHalfmoveClock(halfmove_token.to_string()))
    }

    fn parse_fullmove(fullmove_token: &str) -> Result<u16, FenParseError> {
        let fullmove_number = fullmove_token
            .parse::<u16>()
            .map_err(|_| FenParseError::InvalidFullmoveNumber(fullmove_token.to_string()))?;

        if fullmove_number == 0 {
            return Err(FenParseError::InvalidFullmoveNumber(format!(
                "Fullmove number cannot be 0, found: {}",
                fullmove_token
            )));
        }

        Ok(fullmove_number)
    }
}

/******************************************\
|==========================================|
|             Fen Parse Errors             |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenParseError {
    #[error("FEN string must have 6 fields separated by spaces")]
    InvalidNumberOfFields,

    #[error("Invalid character in FEN piece placement: '{0}'")]
    InvalidPiecePlacementChar(char),

    #[error("Invalid rank format in FEN piece placement: {0}")]
    InvalidRankFormat(String),

    #[error("Invalid side to move in FEN: '{0}', expected 'w' or 'b'")]
    InvalidSideToMove(String),

    #[error("Invalid character in FEN castling availability: '{0}'")]
    InvalidCastlingChar(char),

    #[error("Invalid en passant target square in FEN: '{0}'")]
    InvalidEnPassantSquare(String),

    #[error("Invalid halfmove clock value in FEN: '{0}'")]
    InvalidHalfmoveClock(String),

    #[error("Invalid fullmove number value in FEN: '{0}'")]
    InvalidFullmoveNumber(String),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {

    use super::*;

    const CASTLE_FEN: &str = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";

    const TWO_PAWNS_FEN: &str = "8/8/8/4p3/3P4/8/8/8 w - - 0 1";

    #[test]
    fn test_parse_start_fen() {
        let mut board = Board::new();
        assert!(board.set(START_FEN).is_ok());

        assert_eq!(board.on(Square::A1), Some(Piece::WhiteRook));
        assert_eq!(board.on(Square::E1), Some(Piece::WhiteKing));
        assert_eq!(board.on(Square::H8), Some(Piece::BlackRook));
        assert_eq!(board.on(Square::D8), Some(Piece::BlackQueen));
        assert_eq!(board.on(Square::E4), None);
        assert_eq!(board.stm(), Colour::White);
        assert_eq!(board.castling(), Castling::ALL);
        assert_eq!(board.ep(), None);
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
        assert_eq!(board.fen(), START_FEN);
    }

    #[test]
    fn test_parse_two_pawns_fen() {
        let board = Board::from_fen(TWO_PAWNS_FEN).unwrap();

        let pieces: Vec<(Square, Piece)> = board.pieces().collect();
        assert_eq!(
            pieces,
            vec![
                (Square::E5, Piece::BlackPawn),
                (Square::D4, Piece::WhitePawn),
            ]
        );
        assert_eq!(board.fen(), TWO_PAWNS_FEN);
    }

    #[test]
    fn test_parse_castle_fen_roundtrip() {
        let board = Board::from_fen(CASTLE_FEN).unwrap();

        assert_eq!(board.on(Square::A8), Some(Piece::BlackRook));
        assert_eq!(board.on(Square::E8), Some(Piece::BlackKing));
        assert_eq!(board.on(Square::H8), Some(Piece::BlackRook));
        assert_eq!(board.on(Square::A1), Some(Piece::WhiteRook));
        assert_eq!(board.on(Square::E1), Some(Piece::WhiteKing));
        assert_eq!(board.on(Square::H1), Some(Piece::WhiteRook));
        assert_eq!(board.pieces().count(), 6);
        assert_eq!(board.castling(), Castling::ALL);
        assert_eq!(board.fen(), CASTLE_FEN);
    }

    #[test]
    fn test_roundtrip_is_idempotent() {
        let fens = [
            START_FEN,
            CASTLE_FEN,
            TWO_PAWNS_FEN,
            "r1bqkbnr/pp1ppppp/2n5/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 1 10",
            "rnbqkb1r/pp1p1pPp/8/2p1pP2/1P1P4/3P3P/P1P1P3/RNBQKBNR w KQkq e6 0 1",
            "8/8/8/8/8/8/8/8 b - - 99 500",
        ];

        for fen in fens {
            let board = Board::from_fen(fen).unwrap();
            assert_eq!(board.fen(), fen);
            assert_eq!(Board::from_fen(&board.fen()).unwrap(), board);
        }
    }

    #[test]
    fn test_castling_field_order_independent() {
        let rights = ["KQkq", "qkQK", "kKqQ", "QKqk"];

        let expected = Board::from_fen(CASTLE_FEN).unwrap();

        for r in rights {
            let fen = format!("r3k2r/8/8/8/8/8/8/R3K2R w {} - 0 1", r);
            let board = Board::from_fen(&fen).unwrap();
            assert_eq!(board.castling(), Castling::ALL);
            assert_eq!(board, expected);
            assert_eq!(board.fen(), CASTLE_FEN);
        }
    }

    #[test]
    fn test_castling_field_empty_clears_rights() {
        let mut board = Board::new();
        board.parse_castling("").unwrap();
        assert_eq!(board.castling(), Castling::NONE);

        board.parse_castling("KQkq").unwrap();
        assert_eq!(board.castling(), Castling::ALL);
        board.parse_castling("-").unwrap();
        assert_eq!(board.castling(), Castling::NONE);
    }

    #[test]
    fn test_enpassant_roundtrip() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.ep(), Some(Square::E3));
        assert_eq!(board.ep().unwrap().index(), 84);
        assert_eq!(board.fen(), fen);

        let fen = "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.ep(), Some(Square::C6));
        assert_eq!(board.fen(), fen);
    }

    #[test]
    fn test_set_failure_preserves_previous_state() {
        let mut board = Board::from_fen(CASTLE_FEN).unwrap();
        let before = board.clone();

        assert!(board.set("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
        assert_eq!(board, before);

        assert!(board.set("not a fen").is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_fen_invalid_piece() {
        let fen = "rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert!(matches!(
            Board::from_fen(fen),
            Err(FenParseError::InvalidPiecePlacementChar('x'))
        ));
    }

    #[test]
    fn test_fen_invalid_rank_length_short() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPP/RNBQKBNR w KQkq - 0 1";
        let result = Board::from_fen(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));

        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("ended prematurely at file index 7")
        );
    }

    #[test]
    fn test_fen_invalid_rank_length_short_at_end() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN w KQkq - 0 1";
        let result = Board::from_fen(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Final rank Rank1 ended prematurely at file index 7")
        );
    }

    #[test]
    fn test_fen_invalid_rank_length_long_piece() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let result = Board::from_fen(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("attempted beyond file H")
        );
    }

    #[test]
    fn test_fen_invalid_rank_length_long_skip() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/P6P1/RNBQKBNR w KQkq - 0 1";
        let result = Board::from_fen(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Skip value 1 exceeds rank length")
        );
    }

    #[test]
    fn test_fen_invalid_skip_digit_zero() {
        let fen = "rnbqkbnr/pppp0ppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let result = Board::from_fen(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid skip digit '0'")
        );
    }

    #[test]
    fn test_fen_invalid_skip_digit_nine() {
        let fen = "rnbqkbnr/pppp9ppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let result = Board::from_fen(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid skip digit '9'")
        );
    }

    #[test]
    fn test_fen_too_many_ranks() {
        let fen = "8/8/8/8/8/8/8/8/8 w KQkq - 0 1";
        let result = Board::from_fen(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Too many rank separators")
        );
    }

    #[test]
    fn test_fen_too_few_ranks() {
        let fen = "8/8/8/8/8/8/8 w KQkq - 0 1";
        let result = Board::from_fen(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Not enough ranks specified")
        );
    }

    #[test]
    fn test_fen_missing_fields() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";
        assert!(matches!(
            Board::from_fen(fen),
            Err(FenParseError::InvalidNumberOfFields)
        ));
    }

    #[test]
    fn test_fen_extra_fields() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra";
        assert!(matches!(
            Board::from_fen(fen),
            Err(FenParseError::InvalidNumberOfFields)
        ));
    }

    #[test]
    fn test_fen_invalid_side() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1";
        assert!(
            matches!(Board::from_fen(fen), Err(FenParseError::InvalidSideToMove(s)) if s == "x")
        );
    }

    #[test]
    fn test_fen_invalid_castling() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQXkq - 0 1";
        assert!(matches!(
            Board::from_fen(fen),
            Err(FenParseError::InvalidCastlingChar('X'))
        ));
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w K-q - 0 1";
        assert!(matches!(
            Board::from_fen(fen),
            Err(FenParseError::InvalidCastlingChar('-'))
        ));
    }

    #[test]
    fn test_fen_invalid_enpassant() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1";
        assert!(
            matches!(Board::from_fen(fen), Err(FenParseError::InvalidEnPassantSquare(s)) if s == "e9")
        );
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq zz 0 1";
        assert!(
            matches!(Board::from_fen(fen), Err(FenParseError::InvalidEnPassantSquare(s)) if s == "zz")
        );
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1";
        assert!(
            matches!(Board::from_fen(fen), Err(FenParseError::InvalidEnPassantSquare(s)) if s.contains("e4"))
        );
    }

    #[test]
    fn test_fen_invalid_halfmove() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - fifty 1";
        assert!(
            matches!(Board::from_fen(fen), Err(FenParseError::InvalidHalfmoveClock(s)) if s == "fifty")
        );
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - -1 1";
        assert!(
            matches!(Board::from_fen(fen), Err(FenParseError::InvalidHalfmoveClock(s)) if s == "-1")
        );
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 256 1";
        assert!(
            matches!(Board::from_fen(fen), Err(FenParseError::InvalidHalfmoveClock(s)) if s == "256")
        );
    }

    #[test]
    fn test_fen_invalid_fullmove() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 zero";
        assert!(
            matches!(Board::from_fen(fen), Err(FenParseError::InvalidFullmoveNumber(s)) if s == "zero")
        );
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0";
        assert!(
            matches!(Board::from_fen(fen), Err(FenParseError::InvalidFullmoveNumber(s)) if s.contains("cannot be 0"))
        );
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 -5";
        assert!(
            matches!(Board::from_fen(fen), Err(FenParseError::InvalidFullmoveNumber(s)) if s == "-5")
        );
    }

    #[test]
    fn test_fen_clock_values_kept_verbatim() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 42 137";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.halfmove_clock(), 42);
        assert_eq!(board.fullmove_number(), 137);
        assert_eq!(board.stm(), Colour::Black);
        assert_eq!(board.fen(), fen);
    }
}
