//! Widget-facing position map.
//!
//! The board widget renders a plain mapping from algebraic square name to a
//! two-character piece code ("wp", "bk", ...). That map carries none of the
//! board invariants: drag and drop mutates it freely and nothing checks
//! legality. It is derived from a [`Board`] by a pure projection rather than
//! maintained as an independent shadow copy.

use std::collections::BTreeMap;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::board::{Board, FenParseError};
use crate::core::{Piece, Square};

/******************************************\
|==========================================|
|               Position Map               |
|==========================================|
\******************************************/

/// Mapping from square to piece as consumed by the board widget.
///
/// Serializes as a JSON object of square names to piece codes, e.g.
/// `{"d4": "wp", "e5": "bp"}`. The widget sentinels `start` and `empty`
/// correspond to [`PositionMap::start`] and [`PositionMap::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionMap(BTreeMap<Square, Piece>);

impl PositionMap {
    /// Creates an empty map (the widget's `empty` sentinel)
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the standard initial layout (the widget's `start` sentinel)
    pub fn start() -> Self {
        Self::from_board(&Board::default())
    }

    /// Projects a board into its rendering map
    ///
    /// Only piece placement survives the projection; side to move, castling
    /// rights and the clocks have no widget representation.
    pub fn from_board(board: &Board) -> Self {
        Self(board.pieces().collect())
    }

    /// Parses a FEN placement field (or a full FEN string, of which only the
    /// first field is read) into a map
    pub fn from_placement(s: &str) -> Result<Self, FenParseError> {
        let placement = s
            .split_whitespace()
            .next()
            .ok_or(FenParseError::InvalidNumberOfFields)?;

        let mut board = Board::new();
        board.parse_piece_placement(placement)?;

        Ok(Self::from_board(&board))
    }

    /// Serializes the map back into a FEN placement field
    pub fn placement(&self) -> String {
        let mut board = Board::new();
        for (&square, &piece) in &self.0 {
            board.add_piece(piece, square);
        }

        let fen = board.fen();
        fen.split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string()
    }

    /// Returns the piece on a square, if any
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.0.get(&square).copied()
    }

    /// Places a piece on a square, returning whatever it replaced
    pub fn set(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.0.insert(square, piece)
    }

    /// Removes the piece on a square, returning it
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.0.remove(&square)
    }

    /// Applies an unvalidated drag-and-drop move: whatever sits on `from`
    /// lands on `to`, and any piece already on `to` is returned as captured.
    ///
    /// A move from an empty square does nothing. No chess rules apply here.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Option<Piece> {
        let Some(piece) = self.0.remove(&from) else {
            return None;
        };

        self.0.insert(to, piece)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over occupied squares in square-index order (a8 first)
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.0.iter().map(|(&sq, &piece)| (sq, piece))
    }
}

/******************************************\
|==========================================|
|              Serialization               |
|==========================================|
\******************************************/

impl Serialize for PositionMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (square, piece) in &self.0 {
            map.serialize_entry(&square.to_string(), piece.code())?;
        }
        map.end()
    }
}

struct PositionMapVisitor;

impl<'de> Visitor<'de> for PositionMapVisitor {
    type Value = PositionMap;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a map of square names to piece codes")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = BTreeMap::new();

        while let Some((square, code)) = access.next_entry::<String, String>()? {
            let square = square
                .parse::<Square>()
                .map_err(serde::de::Error::custom)?;
            let piece = Piece::from_code(&code).map_err(serde::de::Error::custom)?;
            entries.insert(square, piece);
        }

        Ok(PositionMap(entries))
    }
}

impl<'de> Deserialize<'de> for PositionMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(PositionMapVisitor)
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
