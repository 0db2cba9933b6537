use chess_macro::make_bitboard;
use util::{
    bitboard::Bitboard,
    bits::pdep,
    color::Color,
    square::{File, Rank, Square},
};

use crate::{
    both_colors::BothColors,
    mv::{Move, MoveKind},
    state::CastlingRights,
};

/// Squares whose own-side occupancy decides which castling rights survive:
/// the home king and rook squares plus the enemy's rook squares.
pub const RIGHTS_SQUARES: BothColors<Bitboard> = BothColors::new(
    make_bitboard!(
        X . . . . . . X
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        X . . . X . . X
    ),
    make_bitboard!(
        X . . . X . . X
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        X . . . . . . X
    ),
);

/// Back rank squares the king passes or lands on, which must not be seen.
const NO_ATTACK: BothColors<Bitboard> = BothColors::new(
    make_bitboard!(
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . X X X X X .
    ),
    make_bitboard!(
        . . X X X X X .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
    ),
);

/// Back rank squares between king and rooks, which must be empty.
const NO_OCCUPY: BothColors<Bitboard> = BothColors::new(
    make_bitboard!(
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . X X X . X X .
    ),
    make_bitboard!(
        . X X X . X X .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
    ),
);

/// Bits of a castling key, b-file first: `e f g` for the king side,
/// `b c d e` for the queen side.
const KING_SIDE_PATH: u8 = 0b11_1000;
const QUEEN_SIDE_PATH: u8 = 0b00_1111;

const KING_SIDE: u8 = 0b01;
const QUEEN_SIDE: u8 = 0b10;

const fn castle(color: Color, to_file: File) -> Move {
    let rank = Rank::First.pov(&color);
    Move::with_kind(
        Square::from_rank_file(rank, File::E),
        Square::from_rank_file(rank, to_file),
        MoveKind::Castling,
        None,
    )
}

const WHITE_CASTLES: [Move; 2] = [castle(Color::White, File::G), castle(Color::White, File::C)];
const BLACK_CASTLES: [Move; 2] = [castle(Color::Black, File::G), castle(Color::Black, File::C)];

/// Ready-made move lists for every castling code.
const CASTLING_MOVES: [[&[Move]; 4]; 2] = [
    [
        &[],
        &[WHITE_CASTLES[0]],
        &[WHITE_CASTLES[1]],
        &WHITE_CASTLES,
    ],
    [
        &[],
        &[BLACK_CASTLES[0]],
        &[BLACK_CASTLES[1]],
        &BLACK_CASTLES,
    ],
];

/// Six bits describing the back rank of `color`: squares c..g that are seen
/// by the enemy and squares b, c, d, f, g that are occupied, b-file lowest.
pub fn castling_key(color: &Color, seen: Bitboard, occupied: Bitboard) -> usize {
    let summary = (NO_ATTACK[color] & seen) | (NO_OCCUPY[color] & occupied);
    let shift = match color {
        Color::White => Square::B1 as u8,
        Color::Black => Square::B8 as u8,
    };
    (summary.0 >> shift) as usize
}

/// Castling code (`0` none, `1` king side, `2` queen side, `3` both) for
/// every side, rights nibble and castling key.
pub fn generate_castling_lookup() -> [[[u8; 64]; 16]; 2] {
    let mut lookup = [[[0; 64]; 16]; 2];
    for color in Color::ALL {
        for rights in 0..16 {
            let rights = CastlingRights(rights);
            for key in 0..64 {
                let mut code = 0;
                if rights.contains(CastlingRights::king_side(&color)) && key & KING_SIDE_PATH == 0
                {
                    code |= KING_SIDE;
                }
                if rights.contains(CastlingRights::queen_side(&color))
                    && key & QUEEN_SIDE_PATH == 0
                {
                    code |= QUEEN_SIDE;
                }
                lookup[color.idx()][rights.idx()][key as usize] = code;
            }
        }
    }
    lookup
}

pub fn castling_moves(color: &Color, code: u8) -> &'static [Move] {
    CASTLING_MOVES[color.idx()][code as usize]
}

/// Rights that survive once the side `color` occupies (exactly) the squares
/// `pdep(i, RIGHTS_SQUARES[color])`, for every `i`.
pub fn generate_rights_lookup() -> [[CastlingRights; 32]; 2] {
    let mut lookup = [[CastlingRights::ALL; 32]; 2];
    for color in Color::ALL {
        let them = !color;
        let own_rank = Rank::First.pov(&color);
        let their_rank = Rank::First.pov(&them);
        let home = |rank, file| Square::from_rank_file(rank, file);

        for (i, rights) in lookup[color.idx()].iter_mut().enumerate() {
            let occupied = Bitboard(pdep(i as u64, RIGHTS_SQUARES[&color].0));
            let mut cleared = CastlingRights::NONE;

            if !occupied.has_sq(home(own_rank, File::E)) {
                cleared = cleared | CastlingRights::both(&color);
            }
            if !occupied.has_sq(home(own_rank, File::H)) {
                cleared = cleared | CastlingRights::king_side(&color);
            }
            if !occupied.has_sq(home(own_rank, File::A)) {
                cleared = cleared | CastlingRights::queen_side(&color);
            }
            if occupied.has_sq(home(their_rank, File::H)) {
                cleared = cleared | CastlingRights::king_side(&them);
            }
            if occupied.has_sq(home(their_rank, File::A)) {
                cleared = cleared | CastlingRights::queen_side(&them);
            }

            *rights = CastlingRights(CastlingRights::ALL.0 & !cleared.0);
        }
    }
    lookup
}

/// Rook origin and destination of the castling move landing on `king_to`.
pub const fn castling_rook(king_to: Square) -> (Square, Square) {
    let rank = king_to.rank();
    match king_to.file() {
        File::G => (
            Square::from_rank_file(rank, File::H),
            Square::from_rank_file(rank, File::F),
        ),
        _ => (
            Square::from_rank_file(rank, File::A),
            Square::from_rank_file(rank, File::D),
        ),
    }
}
