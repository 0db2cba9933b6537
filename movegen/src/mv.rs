use std::fmt::Display;

use arrayvec::ArrayVec;
use util::{piece::Piece, square::Square};

/// No chess position has more than 218 legal moves.
pub const MAX_MOVES: usize = 256;

pub type MoveList = ArrayVec<Move, MAX_MOVES>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    Promotion,
    EnPassant,
    Castling,
}

impl MoveKind {
    const fn from_bits(bits: u16) -> Self {
        match bits & 0b11 {
            0 => Self::Normal,
            1 => Self::Promotion,
            2 => Self::EnPassant,
            _ => Self::Castling,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Promotion {
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl Promotion {
    pub const ALL: [Self; 4] = [Self::Knight, Self::Bishop, Self::Rook, Self::Queen];

    pub const fn piece(&self) -> Piece {
        match self {
            Self::Knight => Piece::Knight,
            Self::Bishop => Piece::Bishop,
            Self::Rook => Piece::Rook,
            Self::Queen => Piece::Queen,
        }
    }

    pub const fn to_char(&self) -> char {
        self.piece().to_char()
    }

    const fn from_bits(bits: u16) -> Self {
        match bits & 0b11 {
            0 => Self::Knight,
            1 => Self::Bishop,
            2 => Self::Rook,
            _ => Self::Queen,
        }
    }
}

/// A move packed into 16 bits:
///
/// | bits  | field              |
/// |-------|--------------------|
/// | 0-5   | destination square |
/// | 6-11  | origin square      |
/// | 12-13 | [`MoveKind`]       |
/// | 14-15 | [`Promotion`]      |
///
/// Only moves produced by the generator are meaningful, nothing is checked
/// on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u16);

impl Move {
    /// a1a1, never a legal move.
    pub const NULL: Self = Self(0);

    pub const fn new(from: Square, to: Square) -> Self {
        Self((from as u16) << 6 | to as u16)
    }

    pub const fn with_kind(
        from: Square,
        to: Square,
        kind: MoveKind,
        promotion: Option<Promotion>,
    ) -> Self {
        let promotion = match promotion {
            Some(p) => p as u16,
            None => 0,
        };
        Self(promotion << 14 | (kind as u16) << 12 | (from as u16) << 6 | to as u16)
    }

    pub const fn from(&self) -> Square {
        Square::from_u8((self.0 >> 6 & 0x3f) as u8)
    }

    pub const fn to(&self) -> Square {
        Square::from_u8((self.0 & 0x3f) as u8)
    }

    pub const fn kind(&self) -> MoveKind {
        MoveKind::from_bits(self.0 >> 12)
    }

    pub const fn promotion(&self) -> Option<Promotion> {
        match self.kind() {
            MoveKind::Promotion => Some(Promotion::from_bits(self.0 >> 14)),
            _ => None,
        }
    }

    pub const fn is_null(&self) -> bool {
        self.0 == Self::NULL.0
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(p) = self.promotion() {
            write!(f, "{}", p.to_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_survive_packing() {
        let mv = Move::with_kind(
            Square::G7,
            Square::H8,
            MoveKind::Promotion,
            Some(Promotion::Rook),
        );
        assert_eq!(mv.from(), Square::G7);
        assert_eq!(mv.to(), Square::H8);
        assert_eq!(mv.kind(), MoveKind::Promotion);
        assert_eq!(mv.promotion(), Some(Promotion::Rook));
        assert_eq!(mv.to_string(), "g7h8r");
    }

    #[test]
    fn plain_moves() {
        let mv = Move::new(Square::E2, Square::E4);
        assert_eq!(mv.kind(), MoveKind::Normal);
        assert_eq!(mv.promotion(), None);
        assert_eq!(mv.to_string(), "e2e4");
        assert!(!mv.is_null());
        assert_eq!(mv, Move::with_kind(Square::E2, Square::E4, MoveKind::Normal, None));
    }

    #[test]
    fn special_kinds() {
        let castle = Move::with_kind(Square::E8, Square::C8, MoveKind::Castling, None);
        assert_eq!(castle.kind(), MoveKind::Castling);
        assert_eq!(castle.promotion(), None);
        assert_eq!(castle.to_string(), "e8c8");

        let ep = Move::with_kind(Square::D5, Square::E6, MoveKind::EnPassant, None);
        assert_eq!(ep.kind(), MoveKind::EnPassant);
        assert_eq!(ep.from(), Square::D5);
    }

    #[test]
    fn null_move() {
        assert!(Move::NULL.is_null());
        assert_eq!(Move::default(), Move::NULL);
        assert_eq!(Move::NULL.from(), Square::A1);
        assert_eq!(Move::NULL.to(), Square::A1);
    }

    #[test]
    fn promotion_letters() {
        let letters: String = Promotion::ALL.iter().map(|p| p.to_char()).collect();
        assert_eq!(letters, "nbrq");
        assert_eq!(Promotion::Rook.piece(), Piece::Rook);
    }
}
