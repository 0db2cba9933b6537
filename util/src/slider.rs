use crate::{bitboard::Bitboard, bits::pext, square::Square};

pub const DELTAS: [(i8, i8); 8] = [
    (-1, 0),
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];
const ORTHOGONALS: [(i8, i8); 4] = [DELTAS[0], DELTAS[1], DELTAS[2], DELTAS[3]];

const DIAGONALS: [(i8, i8); 4] = [DELTAS[4], DELTAS[5], DELTAS[6], DELTAS[7]];

/// Attack and x-ray sets of one slider type for every square and every
/// occupancy, addressed by `offset[sq] + pext(occupancy, mask[sq])`.
#[derive(Debug, Clone)]
pub struct SliderTable {
    /// Ray squares of each square, without the last square of every ray.
    /// Whether that square is occupied never changes the attack set.
    masks: [Bitboard; 64],
    offsets: [usize; 64],
    attacks: Vec<Bitboard>,
    xrays: Vec<Bitboard>,
}

impl SliderTable {
    #[inline(always)]
    fn idx(&self, sq: &Square, occupied: Bitboard) -> usize {
        self.offsets[sq.idx()] + pext(occupied.0, self.masks[sq.idx()].0) as usize
    }

    #[inline(always)]
    pub fn attacks(&self, sq: &Square, occupied: Bitboard) -> Bitboard {
        self.attacks[self.idx(sq, occupied)]
    }

    /// Attacks with the first blocker of every ray taken off the board.
    #[inline(always)]
    pub fn xray(&self, sq: &Square, occupied: Bitboard) -> Bitboard {
        self.xrays[self.idx(sq, occupied)]
    }

    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }
}

pub struct SliderPiece {
    deltas: [(i8, i8); 4],
}

impl SliderPiece {
    pub fn mask(&self, start_sq: &Square) -> Bitboard {
        let mut bitboard = Bitboard::EMPTY;
        for delta in self.deltas {
            let mut curr_sq = *start_sq;
            while let Some(sq) = curr_sq.apply_delta(delta) {
                bitboard |= curr_sq.bitboard();
                curr_sq = sq;
            }
        }
        bitboard &= !start_sq.bitboard();
        bitboard
    }

    /// Ray-casts from `start_sq`, each ray ending on the first blocker it hits.
    pub const fn moves(&self, start_sq: &Square, blockers: &Bitboard) -> Bitboard {
        let mut bitboard = Bitboard::EMPTY;
        let mut i = 0;
        while i < self.deltas.len() {
            let mut curr_sq = *start_sq;
            while let Some(sq) = curr_sq.apply_delta(self.deltas[i]) {
                bitboard.0 |= sq.bitboard().0;
                if blockers.0 & sq.bitboard().0 != 0 {
                    break;
                }
                curr_sq = sq;
            }
            i += 1;
        }
        bitboard
    }

    pub fn xray_moves(&self, start_sq: &Square, blockers: &Bitboard) -> Bitboard {
        let first_blockers = self.moves(start_sq, blockers) & *blockers;
        self.moves(start_sq, &(*blockers ^ first_blockers))
    }

    pub fn build_table(&self) -> SliderTable {
        let mut masks = [Bitboard::EMPTY; 64];
        let mut offsets = [0; 64];
        let mut attacks = Vec::new();
        let mut xrays = Vec::new();

        for sq in Square::ALL {
            let mask = self.mask(&sq);
            masks[sq.idx()] = mask;
            offsets[sq.idx()] = attacks.len();
            for subset in mask.subsets() {
                attacks.push(self.moves(&sq, &subset));
                xrays.push(self.xray_moves(&sq, &subset));
            }
        }

        SliderTable {
            masks,
            offsets,
            attacks,
            xrays,
        }
    }
}

pub const ROOK_LOOKUP_LEN: usize = 102400;
pub const ROOK: SliderPiece = SliderPiece {
    deltas: ORTHOGONALS,
};

pub const BISHOP_LOOKUP_LEN: usize = 5248;
pub const BISHOP: SliderPiece = SliderPiece { deltas: DIAGONALS };

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_sizes() {
        assert_eq!(ROOK.build_table().len(), ROOK_LOOKUP_LEN);
        assert_eq!(BISHOP.build_table().len(), BISHOP_LOOKUP_LEN);
    }

    #[test]
    fn masks_skip_ray_ends() {
        assert_eq!(ROOK.mask(&Square::A1).sq_count(), 12);
        assert_eq!(ROOK.mask(&Square::E4).sq_count(), 10);
        assert_eq!(BISHOP.mask(&Square::A1).sq_count(), 6);
        assert_eq!(BISHOP.mask(&Square::E4).sq_count(), 9);
        assert!(!ROOK.mask(&Square::E4).has_sq(Square::E8));
        assert!(ROOK.mask(&Square::E4).has_sq(Square::E7));
    }

    #[test]
    fn rays_stop_on_blockers() {
        let blockers = Bitboard::from_squares(&[Square::E6, Square::C4, Square::E2]);
        let moves = ROOK.moves(&Square::E4, &blockers);
        assert!(moves.has_sq(Square::E6));
        assert!(!moves.has_sq(Square::E7));
        assert!(moves.has_sq(Square::C4));
        assert!(!moves.has_sq(Square::B4));
        assert!(moves.has_sq(Square::H4));
        assert_eq!(moves.sq_count(), 9);
    }

    #[test]
    fn lookup_matches_ray_casting() {
        let rook = ROOK.build_table();
        let bishop = BISHOP.build_table();
        let occupancies = [
            Bitboard::EMPTY,
            Bitboard(0xFFFF00000000FFFF),
            Bitboard(0x0000_2400_1800_4200),
            Bitboard(0x8142_2418_1824_4281),
            Bitboard::FULL,
        ];
        for sq in Square::ALL {
            for occ in occupancies {
                assert_eq!(rook.attacks(&sq, occ), ROOK.moves(&sq, &occ));
                assert_eq!(bishop.attacks(&sq, occ), BISHOP.moves(&sq, &occ));
                assert_eq!(rook.xray(&sq, occ), ROOK.xray_moves(&sq, &occ));
            }
        }
    }

    #[test]
    fn xray_sees_through_first_blocker() {
        let rook = ROOK.build_table();
        let occ = Bitboard::from_squares(&[Square::E1, Square::E3, Square::E7]);
        let xray = rook.xray(&Square::E1, occ);
        assert!(xray.has_sq(Square::E3));
        assert!(xray.has_sq(Square::E7));
        assert!(!xray.has_sq(Square::E8));
    }
}
