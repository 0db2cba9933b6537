use util::{
    color::Color,
    error::ChessError,
    piece::Piece,
    square::{File, Rank, Square},
};

use crate::{
    board::Board,
    display::display_piece,
    state::{CastlingRights, State},
};

impl Board {
    /// Six field FEN of the position.
    pub fn fen(&self) -> String {
        let mut fen = String::new();
        for rank in self.all_sqs() {
            let mut empty_number = 0;
            for (_, piece) in rank {
                if let Some((color, piece)) = piece {
                    if empty_number > 0 {
                        fen += &format!("{empty_number}");
                        empty_number = 0;
                    }
                    fen.push(display_piece(&color, &piece));
                } else {
                    empty_number += 1;
                }
            }
            if empty_number > 0 {
                fen += &format!("{empty_number}");
            }
            fen += "/"
        }
        fen.pop();

        fen += &format!(" {}", self.state.active_color.to_fen());
        fen += &format!(" {}", self.state.castling.to_fen());
        fen += &format!(
            " {}",
            match self.state.ep_square {
                Some(sq) => sq.to_string(),
                None => "-".to_string(),
            }
        );
        fen += &format!(" {}", self.state.half_move_count);
        fen += &format!(" {}", self.state.full_move_count);

        fen
    }

    /// Reads a FEN with four to six fields, the move counters defaulting to
    /// `0 1`. See https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation
    ///
    /// Castling rights that the placement cannot support (king or rook not on
    /// its home square) are dropped. A position where the side to move could
    /// capture the enemy king is rejected.
    pub fn from_fen(input: &str) -> Result<Self, ChessError> {
        let fen_chunks: Vec<&str> = input.split_whitespace().collect();

        if fen_chunks.len() < 4 {
            return Err(ChessError::Parse("Too few FEN segments".to_string()));
        }
        if fen_chunks.len() > 6 {
            return Err(ChessError::Parse("Too many FEN segments".to_string()));
        }

        let mut board = Self::empty();
        board.place_from_fen(fen_chunks[0])?;
        board.state = State::from_fen(&fen_chunks)?;

        for color in &Color::ALL {
            let kings = board.pieces[color].king.sq_count();
            if kings != 1 {
                return Err(ChessError::Parse(format!(
                    "{color:?} has {kings} kings, expected exactly one"
                )));
            }
        }

        let us = board.state.active_color;
        let their_king = board.king_sq(&!us);
        if !board.sq_attackers(&their_king, &us, board.occupied()).is_empty() {
            return Err(ChessError::Parse(format!(
                "{:?} king is in check with {us:?} to move",
                !us
            )));
        }

        for color in &Color::ALL {
            board.drop_unsupported_rights(color);
        }

        Ok(board)
    }

    fn drop_unsupported_rights(&mut self, color: &Color) {
        let own = &self.pieces[color];
        let back_rank = Rank::First.pov(color);
        let king_home = own.king.has_sq(Square::from_rank_file(back_rank, File::E));
        for (right, rook_file) in [
            (CastlingRights::king_side(color), File::H),
            (CastlingRights::queen_side(color), File::A),
        ] {
            if !king_home || !own.rook.has_sq(Square::from_rank_file(back_rank, rook_file)) {
                self.state.castling &= CastlingRights(!right.0);
            }
        }
    }

    fn place_from_fen(&mut self, fen_chunk: &str) -> Result<(), ChessError> {
        let ranks: Vec<&str> = fen_chunk.split('/').collect();
        if ranks.len() != Rank::COUNT {
            return Err(ChessError::Parse(format!(
                "Piece placement '{fen_chunk}' should have 8 ranks"
            )));
        }

        for (rank, rank_str) in Rank::ALL.iter().rev().zip(ranks) {
            let mut file_idx = 0;
            let mut last_char_number = false;
            for rank_char in rank_str.chars() {
                if let Some(number) = rank_char.to_digit(10) {
                    if last_char_number || number == 0 {
                        return Err(ChessError::Parse(format!(
                            "Rank {rank} ({rank_str}) has a bad empty square count"
                        )));
                    }
                    last_char_number = true;
                    file_idx += number as usize;
                } else {
                    let piece = Piece::from_char(rank_char.to_ascii_lowercase()).ok_or_else(|| {
                        ChessError::Parse(format!("'{rank_char}' cannot be parsed as a piece"))
                    })?;
                    let file = *File::ALL.get(file_idx).ok_or_else(|| {
                        ChessError::Parse(format!("Rank {rank} ({rank_str}) has too many squares"))
                    })?;
                    self.put_piece(
                        &Color::from_char(rank_char),
                        &piece,
                        &Square::from_rank_file(*rank, file),
                    );
                    last_char_number = false;
                    file_idx += 1;
                }
            }
            if file_idx != File::COUNT {
                return Err(ChessError::Parse(format!(
                    "Rank {rank} ({rank_str}) should have 8 squares, has {file_idx}"
                )));
            }
        }
        Ok(())
    }
}

impl State {
    fn from_fen(fen_chunks: &[&str]) -> Result<Self, ChessError> {
        let active_color = Color::from_fen(fen_chunks[1]).ok_or_else(|| {
            ChessError::Parse(format!(
                "'{}' cannot be used to construct active_color",
                fen_chunks[1]
            ))
        })?;

        let castling = CastlingRights::from_fen(fen_chunks[2])?;

        let ep_square = match fen_chunks[3] {
            "-" => None,
            sq => Some(sq.parse::<Square>()?),
        };

        let half_move_count = match fen_chunks.get(4) {
            Some(val) => val.parse::<u16>().map_err(|_| {
                ChessError::Parse(format!("Half move count could not be parsed from '{val}'"))
            })?,
            None => 0,
        };

        let full_move_count = match fen_chunks.get(5) {
            Some(val) => val.parse::<u16>().map_err(|_| {
                ChessError::Parse(format!("Full move count could not be parsed from '{val}'"))
            })?,
            None => 1,
        };

        Ok(Self {
            active_color,
            castling,
            ep_square,
            captured: None,
            half_move_count,
            full_move_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use util::{color::Color, piece::Piece, square::Square};

    use crate::{board::Board, state::CastlingRights};

    #[test]
    fn round_trip() {
        for fen in [
            crate::board::START_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2",
        ] {
            assert_eq!(Board::from_fen(fen).unwrap().fen(), fen);
        }
    }

    #[test]
    fn optional_counters() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
        assert_eq!(board.state.active_color, Color::Black);
        assert_eq!(board.state.half_move_count, 0);
        assert_eq!(board.state.full_move_count, 1);
        assert_eq!(board.fen(), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");
    }

    #[test]
    fn placement() {
        let board = Board::default();
        assert_eq!(board.piece_on(Square::D1), Some((Color::White, Piece::Queen)));
        assert_eq!(board.piece_on(Square::G8), Some((Color::Black, Piece::Knight)));
        assert_eq!(board.piece_on(Square::E4), None);
        assert_eq!(board.state.castling, CastlingRights::ALL);
    }

    #[test]
    fn unsupported_rights_are_dropped() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w KQkq - 0 1").unwrap();
        assert_eq!(board.state.castling.to_fen(), "Q");

        // a knight on the rook's square does not keep the right
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K2N w K - 0 1").unwrap();
        assert_eq!(board.state.castling, CastlingRights::NONE);
        assert!(board.generate_moves().iter().all(|m| m.to_string() != "e1g1"));

        let board = Board::from_fen("1r2k2r/8/8/8/8/8/8/R3K2N b KQkq - 0 1").unwrap();
        assert_eq!(board.state.castling.to_fen(), "Qk");

        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R2K3R w KQkq - 0 1").unwrap();
        assert_eq!(board.state.castling.to_fen(), "kq");
    }

    #[test]
    fn malformed() {
        for fen in [
            "",
            "8/8/8/8/8/8/8/8 w",
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra",
            "4k3/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K2 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K4 w - - 0 1",
            "4k3/8/8/8/8/8/8/44K w - - 0 1",
            "4k3/8/8/8/8/8/8/4X3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w KZ - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - z9 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - - a 1",
            "4k3/8/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/3KK3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4R1K1 w - - 0 1",
            "4k3/8/8/8/8/3n4/8/4K3 b - - 0 1",
        ] {
            assert!(Board::from_fen(fen).is_err(), "'{fen}' should not parse");
        }
    }
}
