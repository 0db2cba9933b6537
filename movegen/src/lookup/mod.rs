//! Process-wide attack tables, built on first use and read-only afterwards.

mod castling;

use std::sync::OnceLock;

use util::{
    bitboard::Bitboard,
    bits::pext,
    color::Color,
    lookup::{
        generate_check_ray_lookup, generate_king_lookup, generate_knight_lookup,
        generate_line_lookup, generate_pawn_capture_lookup,
    },
    slider::{SliderTable, BISHOP, ROOK},
    square::Square,
};

use crate::{mv::Move, state::CastlingRights};

pub use castling::{castling_key, castling_rook};

pub struct AttackTables {
    bishop: SliderTable,
    rook: SliderTable,
    king: [Bitboard; 64],
    knight: [Bitboard; 64],
    pawn: [[Bitboard; 64]; 2],
    check_ray: Box<[[Bitboard; 64]; 64]>,
    line: Box<[[Bitboard; 64]; 64]>,
    rights: [[CastlingRights; 32]; 2],
    castling: Box<[[[u8; 64]; 16]; 2]>,
}

impl AttackTables {
    fn new() -> Self {
        Self {
            bishop: BISHOP.build_table(),
            rook: ROOK.build_table(),
            king: generate_king_lookup(),
            knight: generate_knight_lookup(),
            pawn: generate_pawn_capture_lookup(),
            check_ray: Box::new(generate_check_ray_lookup()),
            line: Box::new(generate_line_lookup()),
            rights: castling::generate_rights_lookup(),
            castling: Box::new(castling::generate_castling_lookup()),
        }
    }
}

static TABLES: OnceLock<AttackTables> = OnceLock::new();

/// Builds the tables now instead of on the first lookup.
pub fn init() {
    tables();
}

#[inline(always)]
fn tables() -> &'static AttackTables {
    TABLES.get_or_init(AttackTables::new)
}

#[inline(always)]
pub fn king_moves(sq: &Square) -> Bitboard {
    tables().king[sq.idx()]
}

#[inline(always)]
pub fn knight_moves(sq: &Square) -> Bitboard {
    tables().knight[sq.idx()]
}

/// Squares a pawn of `color` on `sq` attacks.
#[inline(always)]
pub fn pawn_attacks(color: &Color, sq: &Square) -> Bitboard {
    tables().pawn[color.idx()][sq.idx()]
}

#[inline(always)]
pub fn bishop_moves(sq: &Square, occupied: Bitboard) -> Bitboard {
    tables().bishop.attacks(sq, occupied)
}

#[inline(always)]
pub fn rook_moves(sq: &Square, occupied: Bitboard) -> Bitboard {
    tables().rook.attacks(sq, occupied)
}

#[inline(always)]
pub fn bishop_xray(sq: &Square, occupied: Bitboard) -> Bitboard {
    tables().bishop.xray(sq, occupied)
}

#[inline(always)]
pub fn rook_xray(sq: &Square, occupied: Bitboard) -> Bitboard {
    tables().rook.xray(sq, occupied)
}

/// Squares that block a slider on `checker` from reaching `king`, plus
/// `checker` itself.
#[inline(always)]
pub fn check_ray(king: &Square, checker: &Square) -> Bitboard {
    tables().check_ray[king.idx()][checker.idx()]
}

/// The full line through two aligned squares, empty if they are not aligned.
#[inline(always)]
pub fn align_mask(sq1: &Square, sq2: &Square) -> Bitboard {
    tables().line[sq1.idx()][sq2.idx()]
}

/// Castling rights still possible once the side `color` has moved and
/// occupies `own`.
#[inline(always)]
pub fn castling_rights_mask(color: &Color, own: Bitboard) -> CastlingRights {
    let idx = pext(own.0, castling::RIGHTS_SQUARES[color].0) as usize;
    tables().rights[color.idx()][idx]
}

/// The castling moves `color` may play given its rights and a
/// [`castling_key`] of the back rank.
#[inline(always)]
pub fn castling_moves(color: &Color, rights: CastlingRights, key: usize) -> &'static [Move] {
    let code = tables().castling[color.idx()][rights.idx()][key];
    castling::castling_moves(color, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        let first = tables() as *const AttackTables;
        init();
        assert_eq!(first, tables() as *const AttackTables);
    }

    #[test]
    fn slider_lookups() {
        let occupied = Bitboard::from_squares(&[Square::D4, Square::F6, Square::D7]);
        let rook = rook_moves(&Square::D4, occupied);
        assert!(rook.has_sq(Square::D7));
        assert!(!rook.has_sq(Square::D8));
        assert_eq!(rook.sq_count(), 13);

        let bishop = bishop_moves(&Square::D4, occupied);
        assert!(bishop.has_sq(Square::F6));
        assert!(!bishop.has_sq(Square::G7));
        assert!((rook & bishop).is_empty());

        let xray = bishop_xray(&Square::D4, occupied);
        assert!(xray.has_sq(Square::G7));
        assert!(xray.has_sq(Square::H8));
        assert!(rook_xray(&Square::D4, occupied).has_sq(Square::D8));
    }

    #[test]
    fn leaper_lookups() {
        assert_eq!(king_moves(&Square::H8).sq_count(), 3);
        assert_eq!(knight_moves(&Square::B1).sq_count(), 3);
        assert_eq!(
            pawn_attacks(&Color::Black, &Square::E5),
            Bitboard::from_squares(&[Square::D4, Square::F4])
        );
    }

    #[test]
    fn lines_and_rays() {
        assert!(align_mask(&Square::E1, &Square::E5).has_sq(Square::E8));
        assert!(align_mask(&Square::E1, &Square::F3).is_empty());
        assert_eq!(
            check_ray(&Square::G1, &Square::D4),
            Bitboard::from_squares(&[Square::F2, Square::E3, Square::D4])
        );
    }

    #[test]
    fn rights_mask() {
        let start = Bitboard(0xFFFF);
        assert_eq!(castling_rights_mask(&Color::White, start), CastlingRights::ALL);
        let king_moved = start ^ Square::E1.bitboard() ^ Square::E2.bitboard();
        assert_eq!(
            castling_rights_mask(&Color::White, king_moved),
            CastlingRights::from_fen("kq").unwrap()
        );
    }

    #[test]
    fn castling_move_lookup() {
        let key = castling_key(&Color::White, Bitboard::EMPTY, Bitboard::EMPTY);
        assert_eq!(castling_moves(&Color::White, CastlingRights::ALL, key).len(), 2);
        assert!(castling_moves(&Color::White, CastlingRights::from_fen("kq").unwrap(), key)
            .is_empty());
    }
}
