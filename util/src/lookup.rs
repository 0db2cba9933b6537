use crate::{
    bitboard::Bitboard,
    color::Color,
    slider::DELTAS,
    square::{Rank, Square},
};

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-1, -2),
    (-2, 1),
    (-1, 2),
    (1, -2),
    (2, -1),
    (1, 2),
    (2, 1),
];

const fn jump_lookup(jumps: &[(i8, i8); 8]) -> [Bitboard; 64] {
    let mut lookup = [Bitboard::EMPTY; 64];
    let mut i = 0;
    while i < Square::COUNT {
        let sq = Square::from_u8(i as u8);
        let mut bb = Bitboard::EMPTY;
        let mut d = 0;
        while d < jumps.len() {
            if let Some(sq) = sq.apply_delta(jumps[d]) {
                bb.0 |= sq.bitboard().0
            }
            d += 1;
        }
        lookup[i] = bb;
        i += 1;
    }
    lookup
}

pub const fn generate_king_lookup() -> [Bitboard; 64] {
    jump_lookup(&DELTAS)
}

pub const fn generate_knight_lookup() -> [Bitboard; 64] {
    jump_lookup(&KNIGHT_JUMPS)
}

pub const fn generate_pawn_capture_lookup() -> [[Bitboard; 64]; 2] {
    let mut lookup = [[Bitboard::EMPTY; 64]; 2];

    let mut c = 0;
    while c < Color::ALL.len() {
        let color = Color::ALL[c];
        let mut i = 0;
        while i < Square::COUNT {
            let sq = Square::from_u8(i as u8);
            if sq.rank() as u8 != Rank::Eighth.pov(&color) as u8 {
                lookup[c][i] = sq.bitboard().pawn_attacks(&color);
            }
            i += 1;
        }
        c += 1;
    }

    lookup
}

/// Squares strictly between two squares on a common line, empty otherwise.
pub const fn generate_between_lookup() -> [[Bitboard; 64]; 64] {
    let mut lookup = [[Bitboard::EMPTY; 64]; 64];
    let mut i = 0;
    while i < Square::COUNT {
        let outer_sq = Square::from_u8(i as u8);
        let mut d = 0;
        while d < DELTAS.len() {
            let mut inner_sq = outer_sq;
            let mut curr_in_between = Bitboard::EMPTY;
            while let Some(sq) = inner_sq.apply_delta(DELTAS[d]) {
                lookup[i][sq.idx()] = curr_in_between;
                curr_in_between.0 |= sq.bitboard().0;
                inner_sq = sq;
            }
            d += 1;
        }
        i += 1;
    }
    lookup
}

/// From a king square to a checker on a common line: the squares in between
/// plus the checker itself, i.e. every square that blocks or captures.
pub const fn generate_check_ray_lookup() -> [[Bitboard; 64]; 64] {
    let between = generate_between_lookup();
    let mut lookup = [[Bitboard::EMPTY; 64]; 64];
    let mut i = 0;
    while i < Square::COUNT {
        let ksq = Square::from_u8(i as u8);
        let mut d = 0;
        while d < DELTAS.len() {
            let mut inner_sq = ksq;
            while let Some(sq) = inner_sq.apply_delta(DELTAS[d]) {
                lookup[i][sq.idx()].0 = between[i][sq.idx()].0 | sq.bitboard().0;
                inner_sq = sq;
            }
            d += 1;
        }
        i += 1;
    }
    lookup
}

/// The whole line (edge to edge) through two squares sharing a rank, file or
/// diagonal; empty for unaligned pairs.
pub const fn generate_line_lookup() -> [[Bitboard; 64]; 64] {
    let mut lookup = [[Bitboard::EMPTY; 64]; 64];
    let mut i = 0;
    while i < Square::COUNT {
        let outer_sq = Square::from_u8(i as u8);
        let mut d = 0;
        while d < DELTAS.len() {
            let mut inner_sq = outer_sq;
            let mut line = outer_sq.bitboard();

            while let Some(sq) = inner_sq.apply_delta(DELTAS[d]) {
                line.0 |= sq.bitboard().0;
                inner_sq = sq;
            }

            let (d_rank, d_file) = DELTAS[d];
            inner_sq = outer_sq;
            while let Some(sq) = inner_sq.apply_delta((-d_rank, -d_file)) {
                line.0 |= sq.bitboard().0;
                inner_sq = sq;
            }

            inner_sq = outer_sq;
            while let Some(sq) = inner_sq.apply_delta(DELTAS[d]) {
                lookup[i][sq.idx()] = line;
                inner_sq = sq;
            }

            d += 1;
        }
        i += 1;
    }
    lookup
}
