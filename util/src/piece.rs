use crate::helper::impl_char_conv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl_char_conv! {
    Piece,
    'p'=Pawn,
    'n'=Knight,
    'b'=Bishop,
    'r'=Rook,
    'q'=Queen,
    'k'=King,
}
