use util::square::{Rank, Square};

use super::Masks;
use crate::{
    board::Board,
    lookup::{bishop_moves, pawn_attacks, rook_moves},
    mv::{Move, MoveKind, MoveList, Promotion},
};

/// Origin of a pawn move landing on `to` after travelling `offset` squares.
fn origin(to: Square, offset: i8) -> Square {
    Square::from_u8((to as i8 - offset) as u8)
}

impl Board {
    pub(super) fn generate_pawn_moves(&self, moves: &mut MoveList, masks: &Masks) {
        let us = &self.state.active_color;
        let own = &self.pieces[us];
        let enemy = &self.pieces[!us];
        let empty = !masks.occupied;
        let third_rank = Rank::Third.pov(us).bitboard();
        let forward = us.forward();

        // unpinned pawns all at once
        let free = own.pawn & !masks.pinned;
        let single = free.forward(us) & empty;
        let double = (single & third_rank).forward(us) & empty;
        for to in single & masks.check_mask {
            push_pawn_move(moves, origin(to, forward), to);
        }
        for to in double & masks.check_mask {
            push_pawn_move(moves, origin(to, 2 * forward), to);
        }
        for to in free.forward_west(us) & enemy.all & masks.check_mask {
            push_pawn_move(moves, origin(to, forward - 1), to);
        }
        for to in free.forward_east(us) & enemy.all & masks.check_mask {
            push_pawn_move(moves, origin(to, forward + 1), to);
        }

        for from in own.pawn & masks.pinned {
            let pawn = from.bitboard();
            let single = pawn.forward(us) & empty;
            let double = (single & third_rank).forward(us) & empty;
            let captures = pawn_attacks(us, &from) & enemy.all;
            for to in (single | double | captures) & masks.check_mask & masks.pin_line(&from) {
                push_pawn_move(moves, from, to);
            }
        }

        self.generate_en_passant(moves, masks);
    }

    /// En passant is checked by removing both pawns from the board and
    /// looking for a slider that then reaches the king. This covers the pawn
    /// pin along the rank that an ordinary pin mask misses.
    fn generate_en_passant(&self, moves: &mut MoveList, masks: &Masks) {
        let us = &self.state.active_color;
        let them = !us;
        let Some(ep_sq) = self.state.ep_square else {
            return;
        };
        if ep_sq.rank() != Rank::Sixth.pov(us) {
            return;
        }
        let captured_sq = origin(ep_sq, us.forward());
        let enemy = &self.pieces[them];
        if !enemy.pawn.has_sq(captured_sq) {
            return;
        }

        for from in pawn_attacks(them, &ep_sq) & self.pieces[us].pawn {
            let occupied =
                masks.occupied ^ from.bitboard() ^ captured_sq.bitboard() ^ ep_sq.bitboard();
            let leapers = masks.leaper_checkers & !captured_sq.bitboard();
            let sliders = (bishop_moves(&masks.king_sq, occupied) & enemy.bishop_queen())
                | (rook_moves(&masks.king_sq, occupied) & enemy.rook_queen());

            if (leapers | sliders).is_empty() {
                moves.push(Move::with_kind(from, ep_sq, MoveKind::EnPassant, None));
            }
        }
    }
}

/// Pushes a pawn move, expanded into the four promotions when it reaches the
/// last rank.
fn push_pawn_move(moves: &mut MoveList, from: Square, to: Square) {
    if matches!(to.rank(), Rank::First | Rank::Eighth) {
        for promotion in Promotion::ALL {
            moves.push(Move::with_kind(
                from,
                to,
                MoveKind::Promotion,
                Some(promotion),
            ));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}
