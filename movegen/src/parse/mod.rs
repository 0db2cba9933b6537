//! Text formats: FEN positions and long algebraic moves.

mod board;
mod mv;
