use util::bitboard::Bitboard;

use crate::{
    board::Board,
    lookup::{castling_key, castling_moves},
    mv::MoveList,
    state::CastlingRights,
};

impl Board {
    /// Castling needs no check or pin masks. The rights say the king and rook
    /// are home, and `seen` (computed without our king) covers check as well
    /// as every square the king crosses.
    pub(super) fn generate_castling_moves(
        &self,
        moves: &mut MoveList,
        seen: Bitboard,
        occupied: Bitboard,
    ) {
        let us = &self.state.active_color;
        let rights = self.state.castling & CastlingRights::both(us);
        if rights == CastlingRights::NONE {
            return;
        }
        let key = castling_key(us, seen, occupied);
        moves.extend(castling_moves(us, rights, key).iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use crate::{board::Board, mv::MoveKind};

    fn castles(fen: &str) -> Vec<String> {
        Board::from_fen(fen)
            .expect("test fen is valid")
            .generate_moves()
            .iter()
            .filter(|m| m.kind() == MoveKind::Castling)
            .map(|m| m.to_string())
            .collect()
    }

    #[test]
    fn both_sides_when_free() {
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"), ["e1g1", "e1c1"]);
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1"), ["e8g8", "e8c8"]);
    }

    #[test]
    fn rights_are_required() {
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R w Qk - 0 1"), ["e1c1"]);
        assert!(castles("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1").is_empty());
    }

    #[test]
    fn not_out_of_or_through_check() {
        // in check from e8
        assert!(castles("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").is_empty());
        // f1 attacked
        assert_eq!(castles("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1"), ["e1c1"]);
        // c1 attacked
        assert_eq!(castles("2r3k1/8/8/8/8/8/8/R3K2R w KQ - 0 1"), ["e1g1"]);
    }

    #[test]
    fn b_file_may_be_attacked_but_not_occupied() {
        assert_eq!(castles("1r4k1/8/8/8/8/8/8/R3K2R w KQ - 0 1"), ["e1g1", "e1c1"]);
        assert_eq!(castles("6k1/8/8/8/8/8/8/RN2K2R w KQ - 0 1"), ["e1g1"]);
    }

    #[test]
    fn blocked_king_side() {
        assert_eq!(castles("6k1/8/8/8/8/8/8/R3K1NR w KQ - 0 1"), ["e1c1"]);
    }
}
