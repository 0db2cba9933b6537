use util::error::ChessError;

use crate::{board::Board, mv::Move};

impl Move {
    /// Looks up the legal move written as `input` in long algebraic
    /// notation, e.g. `e2e4` or `e7e8q`.
    pub fn from_str(input: &str, board: &Board) -> Result<Self, ChessError> {
        if !matches!(input.len(), 4 | 5) {
            return Err(ChessError::Parse(
                "Move input should be of form <start><end>[promotion] eg. 'e2e4'".to_string(),
            ));
        }

        match board.find_move(input) {
            mv if mv.is_null() => Err(ChessError::InvalidMove(format!(
                "{input} is not a valid move"
            ))),
            mv => Ok(mv),
        }
    }
}
