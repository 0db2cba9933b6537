use std::str::FromStr;

use crate::{bitboard::Bitboard, color::Color, error::ChessError, helper::impl_char_conv};

chess_macro::make_ranks_files_squares!();

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(str: &str) -> Result<Self, Self::Err> {
        let mut chars = str.chars();

        let (c1, c2) = match (chars.next(), chars.next(), chars.next()) {
            (Some(c1), Some(c2), None) => (c1, c2),
            _ => {
                return Err(ChessError::Parse(format!(
                    "'{str}' cannot be used to construct a square"
                )))
            }
        };

        let file = File::from_char(c1).ok_or_else(|| {
            ChessError::Parse(format!("Char '{c1}' cannot be used to create a file"))
        })?;
        let rank = Rank::from_char(c2).ok_or_else(|| {
            ChessError::Parse(format!("Char '{c2}' cannot be used to create a rank"))
        })?;

        Ok(Self::from_rank_file(rank, file))
    }
}

impl Square {
    pub const fn rank(&self) -> Rank {
        Rank::from_u8(*self as u8 / 8)
    }
    pub const fn file(&self) -> File {
        File::from_u8(*self as u8 % 8)
    }
    pub const fn from_rank_file(rank: Rank, file: File) -> Self {
        Self::from_u8(rank as u8 * 8 + file as u8)
    }
    pub const fn apply_delta(&self, (d_rank, d_file): (i8, i8)) -> Option<Self> {
        if let Some(file) = self.file().increment_checked(d_file) {
            if let Some(rank) = self.rank().increment_checked(d_rank) {
                return Some(Self::from_rank_file(rank, file));
            }
        }
        None
    }
    pub const fn bitboard(&self) -> Bitboard {
        Bitboard(1 << *self as u8)
    }
    pub const fn file_distance(&self, other: &Self) -> u8 {
        (self.file() as u8).abs_diff(other.file() as u8)
    }
    pub const fn rank_distance(&self, other: &Self) -> u8 {
        (self.rank() as u8).abs_diff(other.rank() as u8)
    }
    /// Chebyshev distance, the number of king steps between the squares.
    pub const fn distance(&self, other: &Self) -> u8 {
        let files = self.file_distance(other);
        let ranks = self.rank_distance(other);
        if files > ranks {
            files
        } else {
            ranks
        }
    }
}

impl Rank {
    const FIRST: Bitboard = Bitboard(0xFF);

    pub const fn bitboard(&self) -> Bitboard {
        Bitboard(Self::FIRST.0 << (8 * *self as u8))
    }

    pub const fn pov(&self, color: &Color) -> Self {
        match color {
            Color::White => *self,
            Color::Black => Self::from_u8(7 - *self as u8),
        }
    }
}

impl_char_conv! {
    Rank,
    '1'=First,
    '2'=Second,
    '3'=Third,
    '4'=Fourth,
    '5'=Fifth,
    '6'=Sixth,
    '7'=Seventh,
    '8'=Eighth,
}

impl File {
    const A_BB: Bitboard = Bitboard(0x0101010101010101);

    pub const fn bitboard(&self) -> Bitboard {
        Bitboard(Self::A_BB.0 << *self as u8)
    }
}

impl_char_conv! {
    File,
    'a'=A,
    'b'=B,
    'c'=C,
    'd'=D,
    'e'=E,
    'f'=F,
    'g'=G,
    'h'=H,
}
