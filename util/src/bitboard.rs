use std::{
    fmt::Display,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not},
};

use crate::{
    bits::pdep,
    color::Color,
    square::{File, Rank, Square},
};

impl Iterator for Bitboard {
    type Item = Square;
    fn next(&mut self) -> Option<Self::Item> {
        self.next_sq()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const FULL: Self = Self(u64::MAX);
    pub const EMPTY: Self = Self(0);

    pub const fn sq_count(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn more_than_one(&self) -> bool {
        self.0 & self.0.wrapping_sub(1) != 0
    }

    /// Every subset of `self`, the i-th one being `i` deposited into the set
    /// bits of `self`.
    pub fn subsets(&self) -> impl Iterator<Item = Self> {
        let mask = self.0;
        (0..1u64 << mask.count_ones()).map(move |i| Self(pdep(i, mask)))
    }

    pub fn next_sq(&mut self) -> Option<Square> {
        if !self.is_empty() {
            let idx = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1;
            Square::from_u8_checked(idx)
        } else {
            None
        }
    }

    /// Lowest square, `None` when empty.
    pub const fn lsb(&self) -> Option<Square> {
        if self.is_empty() {
            None
        } else {
            Square::from_u8_checked(self.0.trailing_zeros() as u8)
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == Self::EMPTY.0
    }

    pub const fn has_sq(&self, sq: Square) -> bool {
        self.0 & sq.bitboard().0 != 0
    }

    pub const fn from_squares(sqs: &[Square]) -> Self {
        let mut bb = 0;
        let mut i = 0;
        while i < sqs.len() {
            bb |= sqs[i].bitboard().0;
            i += 1;
        }
        Self(bb)
    }

    /// One rank towards the opponent of `color`.
    pub const fn forward(&self, color: &Color) -> Self {
        Self(match color {
            Color::White => self.0 << 8,
            Color::Black => self.0 >> 8,
        })
    }

    /// One rank forward and one file towards the a-file.
    pub const fn forward_west(&self, color: &Color) -> Self {
        let bb = self.0 & !File::A.bitboard().0;
        Self(match color {
            Color::White => bb << 7,
            Color::Black => bb >> 9,
        })
    }

    /// One rank forward and one file towards the h-file.
    pub const fn forward_east(&self, color: &Color) -> Self {
        let bb = self.0 & !File::H.bitboard().0;
        Self(match color {
            Color::White => bb << 9,
            Color::Black => bb >> 7,
        })
    }

    /// Squares attacked by pawns of `color` standing on `self`.
    pub const fn pawn_attacks(&self, color: &Color) -> Self {
        Self(self.forward_west(color).0 | self.forward_east(color).0)
    }
}

impl Display for Bitboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in Rank::ALL.iter().rev() {
            writeln!(f)?;
            for file in File::ALL {
                if self.has_sq(Square::from_rank_file(*rank, file)) {
                    write!(f, "x")?
                } else {
                    write!(f, ".")?
                }
            }
        }
        Ok(())
    }
}

macro_rules! impl_bitwise {
    ($t:ident, $f:ident) => {
        impl $t for Bitboard {
            type Output = Self;
            fn $f(self, rhs: Self) -> Self::Output {
                Self($t::$f(self.0, rhs.0))
            }
        }
    };
}

impl_bitwise! {BitAnd, bitand}
impl_bitwise! {BitOr, bitor}
impl_bitwise! {BitXor, bitxor}

macro_rules! impl_bitwise_assign {
    ($t:ident, $f:ident) => {
        impl $t for Bitboard {
            fn $f(&mut self, rhs: Self) {
                $t::$f(&mut self.0, rhs.0)
            }
        }
    };
}

impl_bitwise_assign! {BitAndAssign, bitand_assign}
impl_bitwise_assign! {BitOrAssign, bitor_assign}
impl_bitwise_assign! {BitXorAssign, bitxor_assign}

impl Not for Bitboard {
    type Output = Self;
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}
