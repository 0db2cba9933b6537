use std::ops::{BitAnd, BitAndAssign, BitOr};

use util::{color::Color, error::ChessError, piece::Piece, square::Square};

/// One history frame. The frame on top describes the current position and,
/// after a move, what that move captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub active_color: Color,
    pub castling: CastlingRights,
    pub ep_square: Option<Square>,
    /// Piece that stood on the destination of the move leading here.
    /// Always `None` for en passant, which is restored by the move kind.
    pub captured: Option<Piece>,
    pub half_move_count: u16,
    pub full_move_count: u16,
}

impl Default for State {
    fn default() -> Self {
        Self {
            active_color: Color::White,
            castling: CastlingRights::NONE,
            ep_square: None,
            captured: None,
            half_move_count: 0,
            full_move_count: 1,
        }
    }
}

/// `KQkq` as the bits `0b1000`, `0b0100`, `0b0010`, `0b0001`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(pub u8);

impl CastlingRights {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(0b1111);
    pub const WHITE_KING_SIDE: Self = Self(0b1000);
    pub const WHITE_QUEEN_SIDE: Self = Self(0b0100);
    pub const BLACK_KING_SIDE: Self = Self(0b0010);
    pub const BLACK_QUEEN_SIDE: Self = Self(0b0001);

    pub const fn king_side(color: &Color) -> Self {
        match color {
            Color::White => Self::WHITE_KING_SIDE,
            Color::Black => Self::BLACK_KING_SIDE,
        }
    }

    pub const fn queen_side(color: &Color) -> Self {
        match color {
            Color::White => Self::WHITE_QUEEN_SIDE,
            Color::Black => Self::BLACK_QUEEN_SIDE,
        }
    }

    pub const fn both(color: &Color) -> Self {
        Self(Self::king_side(color).0 | Self::queen_side(color).0)
    }

    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn idx(&self) -> usize {
        self.0 as usize
    }

    pub fn from_fen(input: &str) -> Result<Self, ChessError> {
        if input == "-" {
            return Ok(Self::NONE);
        }
        let mut castling = Self::NONE;
        for c in input.chars() {
            castling = castling
                | match c {
                    'K' => Self::WHITE_KING_SIDE,
                    'Q' => Self::WHITE_QUEEN_SIDE,
                    'k' => Self::BLACK_KING_SIDE,
                    'q' => Self::BLACK_QUEEN_SIDE,
                    _ => {
                        return Err(ChessError::Parse(format!(
                            "Castling input '{input}' is invalid"
                        )))
                    }
                };
        }
        Ok(castling)
    }

    pub fn to_fen(&self) -> String {
        let output: String = [
            (Self::WHITE_KING_SIDE, 'K'),
            (Self::WHITE_QUEEN_SIDE, 'Q'),
            (Self::BLACK_KING_SIDE, 'k'),
            (Self::BLACK_QUEEN_SIDE, 'q'),
        ]
        .iter()
        .filter(|(right, _)| self.contains(*right))
        .map(|(_, c)| *c)
        .collect();

        if output.is_empty() {
            "-".to_string()
        } else {
            output
        }
    }
}

impl BitOr for CastlingRights {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for CastlingRights {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for CastlingRights {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0
    }
}
