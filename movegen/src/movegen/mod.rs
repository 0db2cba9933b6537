//! Legal move generation in one pass: check and pin masks are computed up
//! front so every move emitted is legal, nothing is made and taken back.

mod castling;
mod pawn;

use util::{bitboard::Bitboard, color::Color, square::Square};

use crate::{
    board::Board,
    lookup::{
        bishop_moves, bishop_xray, check_ray, king_moves, knight_moves, pawn_attacks, rook_moves,
        rook_xray,
    },
    mv::{Move, MoveList},
};

/// Everything the piece generators need to know about the side to move.
struct Masks {
    king_sq: Square,
    occupied: Bitboard,
    /// Destinations that resolve a check (all squares when not in check),
    /// minus own pieces.
    check_mask: Bitboard,
    /// Own pieces standing between the king and an enemy slider.
    pinned: Bitboard,
    /// Knights and pawns giving check.
    leaper_checkers: Bitboard,
}

impl Board {
    pub fn generate_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_moves_into(&mut moves);
        moves
    }

    /// Appends every legal move of the side to move to `moves`, which needs
    /// room for all of them.
    pub(crate) fn generate_moves_into(&self, moves: &mut MoveList) {
        let us = &self.state.active_color;
        let them = !us;
        let own = &self.pieces[us];
        let enemy = &self.pieces[them];
        let occupied = own.all | enemy.all;
        let king_sq = self.king_sq(us);

        // the king must not hide behind itself from a slider
        let seen = self.seen_by(them, occupied ^ king_sq.bitboard());

        let leaper_checkers =
            (knight_moves(&king_sq) & enemy.knight) | (pawn_attacks(us, &king_sq) & enemy.pawn);
        let slider_checkers = (bishop_moves(&king_sq, occupied) & enemy.bishop_queen())
            | (rook_moves(&king_sq, occupied) & enemy.rook_queen());
        let checkers = leaper_checkers | slider_checkers;

        push_targets(moves, king_sq, king_moves(&king_sq) & !(seen | own.all));

        if checkers.more_than_one() {
            return;
        }

        let mut check_mask = if checkers.is_empty() {
            Bitboard::FULL
        } else {
            slider_checkers
                .map(|checker| check_ray(&king_sq, &checker))
                .fold(leaper_checkers, |acc, ray| acc | ray)
        };
        check_mask &= !own.all;

        let pinners = (bishop_xray(&king_sq, occupied) & enemy.bishop_queen())
            | (rook_xray(&king_sq, occupied) & enemy.rook_queen());
        let pinned = pinners
            .map(|pinner| check_ray(&king_sq, &pinner))
            .fold(Bitboard::EMPTY, |acc, ray| acc | ray)
            & own.all;

        let masks = Masks {
            king_sq,
            occupied,
            check_mask,
            pinned,
            leaper_checkers,
        };

        self.generate_pawn_moves(moves, &masks);
        self.generate_piece_moves(moves, &masks);
        self.generate_castling_moves(moves, seen, occupied);
    }

    /// Squares attacked by `color` when the board holds `occupied`.
    fn seen_by(&self, color: &Color, occupied: Bitboard) -> Bitboard {
        let pieces = &self.pieces[color];
        let mut seen = pieces.pawn.pawn_attacks(color);
        for sq in pieces.knight {
            seen |= knight_moves(&sq);
        }
        for sq in pieces.bishop_queen() {
            seen |= bishop_moves(&sq, occupied);
        }
        for sq in pieces.rook_queen() {
            seen |= rook_moves(&sq, occupied);
        }
        for sq in pieces.king {
            seen |= king_moves(&sq);
        }
        seen
    }

    /// Knights, bishops, rooks and queens. A pinned piece stays on the line
    /// through its king, and a pinned knight never moves.
    fn generate_piece_moves(&self, moves: &mut MoveList, masks: &Masks) {
        let own = &self.pieces[&self.state.active_color];
        let free = !masks.pinned;

        for from in own.knight & free {
            push_targets(moves, from, knight_moves(&from) & masks.check_mask);
        }

        for from in own.bishop_queen() {
            let mut targets = bishop_moves(&from, masks.occupied) & masks.check_mask;
            if masks.pinned.has_sq(from) {
                targets &= masks.pin_line(&from);
            }
            push_targets(moves, from, targets);
        }

        for from in own.rook_queen() {
            let mut targets = rook_moves(&from, masks.occupied) & masks.check_mask;
            if masks.pinned.has_sq(from) {
                targets &= masks.pin_line(&from);
            }
            push_targets(moves, from, targets);
        }
    }
}

impl Masks {
    fn pin_line(&self, pinned: &Square) -> Bitboard {
        crate::lookup::align_mask(&self.king_sq, pinned)
    }
}

fn push_targets(moves: &mut MoveList, from: Square, targets: Bitboard) {
    for to in targets {
        moves.push(Move::new(from, to));
    }
}
