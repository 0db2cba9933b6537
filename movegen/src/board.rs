use util::{
    bitboard::Bitboard,
    color::Color,
    piece::Piece,
    square::{File, Rank, Square},
};

use crate::{
    both_colors::BothColors,
    lookup::{bishop_moves, king_moves, knight_moves, pawn_attacks, rook_moves},
    mv::{Move, MoveList},
    piece_bb::PieceBitboards,
    state::State,
};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A position plus the state frames of every move made on it so far.
///
/// The bitboards in `pieces` and the square-indexed `mailbox` always
/// describe the same placement. Only [`Board::put_piece`],
/// [`Board::remove_piece`] and [`Board::move_piece`] change either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub pieces: BothColors<PieceBitboards>,
    mailbox: [Option<(Color, Piece)>; 64],
    pub state: State,
    history: Vec<State>,
}

impl Default for Board {
    fn default() -> Self {
        Board::from_fen(START_FEN).expect("default fen is valid")
    }
}

#[derive(Debug)]
pub enum Status {
    Checkmate,
    Stalemate,
    Ongoing(MoveList),
}

impl Board {
    /// No pieces, white to move. Only a starting point for FEN parsing,
    /// move generation needs both kings.
    pub(crate) fn empty() -> Self {
        Self {
            pieces: BothColors::default(),
            mailbox: [None; 64],
            state: State::default(),
            history: Vec::new(),
        }
    }

    pub fn piece_on(&self, sq: Square) -> Option<(Color, Piece)> {
        self.mailbox[sq.idx()]
    }

    pub fn king_sq(&self, color: &Color) -> Square {
        self.pieces[color]
            .king
            .lsb()
            .expect("king should always exist")
    }

    pub fn occupied(&self) -> Bitboard {
        self.pieces[&Color::White].all | self.pieces[&Color::Black].all
    }

    /// Number of moves that can still be undone.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub(crate) fn push_history(&mut self) {
        self.history.push(self.state);
    }

    pub(crate) fn pop_history(&mut self) -> State {
        self.history
            .pop()
            .expect("undo_move should follow a make_move")
    }

    pub fn put_piece(&mut self, color: &Color, piece: &Piece, sq: &Square) {
        self.pieces[color].toggle(piece, sq);
        self.mailbox[sq.idx()] = Some((*color, *piece));
    }

    pub fn remove_piece(&mut self, color: &Color, piece: &Piece, sq: &Square) {
        self.pieces[color].toggle(piece, sq);
        self.mailbox[sq.idx()] = None;
    }

    pub fn move_piece(&mut self, color: &Color, piece: &Piece, from: &Square, to: &Square) {
        self.pieces[color].toggle(piece, from);
        self.pieces[color].toggle(piece, to);
        self.mailbox[from.idx()] = None;
        self.mailbox[to.idx()] = Some((*color, *piece));
    }

    /// Pieces of `color` attacking `sq` when the board holds `occupied`.
    pub fn sq_attackers(&self, sq: &Square, color: &Color, occupied: Bitboard) -> Bitboard {
        let attackers = &self.pieces[color];
        (pawn_attacks(!color, sq) & attackers.pawn)
            | (knight_moves(sq) & attackers.knight)
            | (king_moves(sq) & attackers.king)
            | (bishop_moves(sq, occupied) & attackers.bishop_queen())
            | (rook_moves(sq, occupied) & attackers.rook_queen())
    }

    pub fn in_check(&self) -> bool {
        let color = &self.state.active_color;
        !self
            .sq_attackers(&self.king_sq(color), !color, self.occupied())
            .is_empty()
    }

    pub fn status(&self) -> Status {
        let moves = self.generate_moves();
        if moves.is_empty() {
            if self.in_check() {
                Status::Checkmate
            } else {
                Status::Stalemate
            }
        } else {
            Status::Ongoing(moves)
        }
    }

    pub fn get_sq_moves(&self, sq: Square) -> MoveList {
        self.generate_moves()
            .into_iter()
            .filter(|mv| mv.from() == sq)
            .collect()
    }

    /// The legal move written as `uci` (e.g. `e2e4`, `e7e8q`), or
    /// [`Move::NULL`] if there is none.
    pub fn find_move(&self, uci: &str) -> Move {
        self.generate_moves()
            .into_iter()
            .find(|mv| mv.to_string() == uci)
            .unwrap_or(Move::NULL)
    }

    /// Every square with its piece, rank by rank from the eighth down.
    pub fn all_sqs(&self) -> Vec<Vec<(Square, Option<(Color, Piece)>)>> {
        Rank::ALL
            .iter()
            .rev()
            .map(|&rank| {
                File::ALL
                    .iter()
                    .map(|file| {
                        let sq = Square::from_rank_file(rank, *file);
                        (sq, self.piece_on(sq))
                    })
                    .collect()
            })
            .collect()
    }
}
