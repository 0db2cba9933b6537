use std::ops::{Index, IndexMut};
use util::{bitboard::Bitboard, piece::Piece, square::Square};

/// Occupancy of one side: every piece type plus their union in `all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PieceBitboards {
    pub all: Bitboard,
    pub pawn: Bitboard,
    pub knight: Bitboard,
    pub bishop: Bitboard,
    pub rook: Bitboard,
    pub queen: Bitboard,
    pub king: Bitboard,
}

impl PieceBitboards {
    /// Flips `sq` in both the piece type's set and `all`.
    pub fn toggle(&mut self, piece: &Piece, sq: &Square) {
        self[piece] ^= sq.bitboard();
        self.all ^= sq.bitboard();
    }

    pub fn bishop_queen(&self) -> Bitboard {
        self.bishop | self.queen
    }

    pub fn rook_queen(&self) -> Bitboard {
        self.rook | self.queen
    }
}

impl Index<&Piece> for PieceBitboards {
    type Output = Bitboard;
    fn index(&self, index: &Piece) -> &Self::Output {
        match index {
            Piece::Pawn => &self.pawn,
            Piece::Knight => &self.knight,
            Piece::Bishop => &self.bishop,
            Piece::Rook => &self.rook,
            Piece::Queen => &self.queen,
            Piece::King => &self.king,
        }
    }
}

impl IndexMut<&Piece> for PieceBitboards {
    fn index_mut(&mut self, index: &Piece) -> &mut Self::Output {
        match index {
            Piece::Pawn => &mut self.pawn,
            Piece::Knight => &mut self.knight,
            Piece::Bishop => &mut self.bishop,
            Piece::Rook => &mut self.rook,
            Piece::Queen => &mut self.queen,
            Piece::King => &mut self.king,
        }
    }
}
