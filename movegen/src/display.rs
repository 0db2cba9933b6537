use std::fmt::Display;

use util::{color::Color, piece::Piece};

use crate::board::Board;

pub fn display_piece(color: &Color, piece: &Piece) -> char {
    match color {
        Color::White => piece.to_char().to_ascii_uppercase(),
        Color::Black => piece.to_char(),
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let vertical_line = "+---+---+---+---+---+---+---+---+";
        writeln!(f, "{vertical_line}")?;
        for rank in self.all_sqs() {
            let mut rank_number = None;
            for (sq, piece) in rank {
                let c = match piece {
                    Some((color, piece)) => display_piece(&color, &piece),
                    None => ' ',
                };
                write!(f, "| {c} ")?;
                rank_number = Some(sq.rank());
            }
            if let Some(rank) = rank_number {
                writeln!(f, "| {rank}")?;
            }
            writeln!(f, "{vertical_line}")?;
        }
        writeln!(f, "  a   b   c   d   e   f   g   h")?;
        writeln!(f)?;
        write!(f, "{}", self.fen())
    }
}
