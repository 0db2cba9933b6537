pub mod board;
pub mod both_colors;
pub mod cli;
pub mod display;
pub mod lookup;
pub mod make_move;
pub mod movegen;
pub mod mv;
pub mod parse;
pub mod perft;
pub mod piece_bb;
pub mod state;
