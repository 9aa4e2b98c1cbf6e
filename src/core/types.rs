/******************************************\
|==========================================|
|                 Colours                  |
|==========================================|
\******************************************/

/// # Colour Representation
///
/// Represents the two colours in chess: White and Black.

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    White,
    Black
}

impl Colour {
    /// Number of elements in the Colour enum
    pub const NUM: usize = 2;
}

crate::impl_from_to_primitive!(Colour);

impl std::ops::Not for Colour {
    type Output = Self;

    /// Returns the opposite colour
    fn not(self) -> Self::Output {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }
}

/******************************************\
|==========================================|
|                 Castling                 |
|==========================================|
\******************************************/

/// # Castling Representation
///
/// Represents the castling rights for a position

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Castling(pub u8);

impl Default for Castling {
    fn default() -> Self {
        Castling::NONE
    }
}

crate::impl_bit_ops!(Castling);

impl Castling {
    // Atomic castling rights
    pub const WK: Castling = Castling(1);
    pub const WQ: Castling = Castling(2);
    pub const BK: Castling = Castling(4);
    pub const BQ: Castling = Castling(8);
    // Board colour castling rights
    pub const WHITE_CASTLING: Castling = Castling(3);
    pub const BLACK_CASTLING: Castling = Castling(12);
    // All or nothing castling rights
    pub const ALL: Castling = Castling(15);
    pub const NONE: Castling = Castling(0);

    /// Helper function to check if a castling right has another castling right as a subset
    pub fn has(self, right: Castling) -> bool {
        self & right != Castling::NONE
    }

    /// Helper function to set castling rights
    pub fn set(&mut self, right: Castling) {
        *self |= right;
    }

    /// Helper function to remove castling rights
    pub fn remove(&mut self, right: Castling) {
        *self &= !right;
    }

    /// Get the king side castling right for a colour
    #[inline]
    pub fn king_side(colour: Colour) -> Self {
        match colour {
            Colour::White => Castling::WK,
            Colour::Black => Castling::BK,
        }
    }

    /// Get the queen side castling right for a colour
    #[inline]
    pub fn queen_side(colour: Colour) -> Self {
        match colour {
            Colour::White => Castling::WQ,
            Colour::Black => Castling::BQ,
        }
    }
}

impl std::ops::Not for Castling {
    type Output = Self;

    /// Invert the bits to give the opposite castling rights
    #[inline]
    fn not(self) -> Self::Output {
        Castling(!self.0 & 0x0F)
    }
}

impl std::fmt::Display for Castling {
    /// Displays castling rights in the `KQkq` format
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }

        let mut s = String::new();
        if self.has(Castling::WK) {
            s.push('K');
        }
        if self.has(Castling::WQ) {
            s.push('Q');
        }
        if self.has(Castling::BK) {
            s.push('k');
        }
        if self.has(Castling::BQ) {
            s.push('q');
        }

        write!(f, "{}", s)
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
