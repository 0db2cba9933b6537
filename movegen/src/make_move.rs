use util::{color::Color, piece::Piece, square::Square};

use crate::{
    board::Board,
    lookup::{castling_rights_mask, castling_rook},
    mv::{Move, MoveKind},
};

impl Board {
    /// Plays a move produced by [`Board::generate_moves`] for this position.
    /// Anything else leaves the board in an unspecified state.
    pub fn make_move(&mut self, mv: Move) {
        let us = self.state.active_color;
        let them = !us;
        let from = mv.from();
        let to = mv.to();
        let (_, piece) = self.piece_on(from).expect("move should start on a piece");

        self.push_history();

        let captured = match mv.kind() {
            MoveKind::EnPassant => None,
            _ => self.piece_on(to).map(|(_, p)| p),
        };
        self.state.captured = captured;
        self.state.ep_square = None;

        match mv.kind() {
            MoveKind::Normal => {
                if let Some(captured) = &captured {
                    self.remove_piece(&them, captured, &to);
                }
                self.move_piece(&us, &piece, &from, &to);
                if piece == Piece::Pawn && from.rank_distance(&to) == 2 {
                    self.state.ep_square = Some(Square::from_u8((from as i8 + us.forward()) as u8));
                }
            }
            MoveKind::Promotion => {
                if let Some(captured) = &captured {
                    self.remove_piece(&them, captured, &to);
                }
                let promoted = mv
                    .promotion()
                    .expect("promotion moves carry a piece")
                    .piece();
                self.remove_piece(&us, &Piece::Pawn, &from);
                self.put_piece(&us, &promoted, &to);
            }
            MoveKind::Castling => {
                let (rook_from, rook_to) = castling_rook(to);
                self.move_piece(&us, &Piece::King, &from, &to);
                self.move_piece(&us, &Piece::Rook, &rook_from, &rook_to);
            }
            MoveKind::EnPassant => {
                let captured_sq = Square::from_u8((to as i8 - us.forward()) as u8);
                self.remove_piece(&them, &Piece::Pawn, &captured_sq);
                self.move_piece(&us, &Piece::Pawn, &from, &to);
            }
        }

        // an en passant capture never touches a king or rook square
        if mv.kind() != MoveKind::EnPassant {
            self.state.castling &= castling_rights_mask(&us, self.pieces[&us].all);
        }

        if piece == Piece::Pawn || captured.is_some() {
            self.state.half_move_count = 0;
        } else {
            self.state.half_move_count += 1;
        }
        if us == Color::Black {
            self.state.full_move_count += 1;
        }
        self.state.active_color = them;
    }

    /// Takes back `mv`, which must be the last move made.
    pub fn undo_move(&mut self, mv: Move) {
        let captured = self.state.captured;
        self.state = self.pop_history();

        let us = self.state.active_color;
        let them = !us;
        let from = mv.from();
        let to = mv.to();

        match mv.kind() {
            MoveKind::Normal => {
                let (_, piece) = self.piece_on(to).expect("moved piece should be on its target");
                self.move_piece(&us, &piece, &to, &from);
                if let Some(captured) = &captured {
                    self.put_piece(&them, captured, &to);
                }
            }
            MoveKind::Promotion => {
                let (_, promoted) = self
                    .piece_on(to)
                    .expect("promoted piece should be on its target");
                self.remove_piece(&us, &promoted, &to);
                self.put_piece(&us, &Piece::Pawn, &from);
                if let Some(captured) = &captured {
                    self.put_piece(&them, captured, &to);
                }
            }
            MoveKind::Castling => {
                let (rook_from, rook_to) = castling_rook(to);
                self.move_piece(&us, &Piece::Rook, &rook_to, &rook_from);
                self.move_piece(&us, &Piece::King, &to, &from);
            }
            MoveKind::EnPassant => {
                let captured_sq = Square::from_u8((to as i8 - us.forward()) as u8);
                self.move_piece(&us, &Piece::Pawn, &to, &from);
                self.put_piece(&them, &Piece::Pawn, &captured_sq);
            }
        }
    }
}
