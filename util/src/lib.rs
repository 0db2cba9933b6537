pub mod bitboard;
pub mod bits;
pub mod color;
pub mod error;
pub mod lookup;
pub mod piece;
pub mod slider;
pub mod square;

mod helper;
