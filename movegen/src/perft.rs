//! Move path enumeration, the standard correctness check for a move
//! generator. See https://www.chessprogramming.org/Perft_Results

use std::{fs, path::Path, thread};

use util::error::ChessError;

use crate::{board::Board, mv::Move};

impl Board {
    /// Number of leaf nodes of the legal move tree `depth` plies deep.
    pub fn perft(&mut self, depth: u8) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.generate_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for mv in moves {
            self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.undo_move(mv);
        }
        nodes
    }

    /// Perft split by root move.
    pub fn divide(&mut self, depth: u8) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }
        self.generate_moves()
            .into_iter()
            .map(|mv| {
                self.make_move(mv);
                let nodes = self.perft(depth - 1);
                self.undo_move(mv);
                (mv, nodes)
            })
            .collect()
    }

    /// [`Board::perft`] with the root moves shared out over `thread_count`
    /// threads, each working on its own copy of the board.
    pub fn perft_multithread(&self, depth: u8, thread_count: usize) -> u64 {
        let moves = self.generate_moves();
        if depth <= 1 {
            return if depth == 0 { 1 } else { moves.len() as u64 };
        }
        let chunk_len = moves.len().div_ceil(thread_count.max(1)).max(1);

        thread::scope(|s| {
            let workers: Vec<_> = moves
                .chunks(chunk_len)
                .map(|chunk| {
                    let mut board = self.clone();
                    s.spawn(move || {
                        let mut nodes = 0;
                        for mv in chunk {
                            board.make_move(*mv);
                            nodes += board.perft(depth - 1);
                            board.undo_move(*mv);
                        }
                        nodes
                    })
                })
                .collect();

            workers
                .into_iter()
                .map(|worker| worker.join().expect("perft worker should not panic"))
                .sum()
        })
    }
}

/// One line of a perft suite: a position and its expected node counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteEntry {
    pub fen: String,
    /// `(depth, nodes)` pairs in file order.
    pub expected: Vec<(u8, u64)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteResult {
    pub fen: String,
    pub depth: u8,
    pub expected: u64,
    pub found: u64,
}

impl SuiteResult {
    pub fn passed(&self) -> bool {
        self.expected == self.found
    }
}

/// Parses `<fen> ;D1 <nodes> ;D2 <nodes> ...`.
pub fn parse_suite_line(line: &str) -> Result<SuiteEntry, ChessError> {
    let mut parts = line.split(';');
    let fen = parts.next().unwrap_or_default().trim().to_string();
    if fen.is_empty() {
        return Err(ChessError::Parse(format!("Suite line '{line}' has no FEN")));
    }

    let expected = parts
        .map(|part| {
            let bad = || ChessError::Parse(format!("Bad perft suite entry '{part}'"));
            let mut tokens = part.split_whitespace();
            let depth = tokens
                .next()
                .and_then(|t| t.strip_prefix('D'))
                .and_then(|d| d.parse::<u8>().ok())
                .ok_or_else(bad)?;
            let nodes = tokens
                .next()
                .and_then(|n| n.parse::<u64>().ok())
                .ok_or_else(bad)?;
            Ok((depth, nodes))
        })
        .collect::<Result<Vec<_>, ChessError>>()?;

    Ok(SuiteEntry { fen, expected })
}

/// Runs every entry of `entries` up to `max_depth`. Within an entry the
/// depths stop at the first mismatch.
pub fn run_suite(entries: &[SuiteEntry], max_depth: u8) -> Result<Vec<SuiteResult>, ChessError> {
    let mut results = Vec::new();
    for entry in entries {
        let mut board = Board::from_fen(&entry.fen)?;
        for &(depth, expected) in entry.expected.iter().filter(|(d, _)| *d <= max_depth) {
            let result = SuiteResult {
                fen: entry.fen.clone(),
                depth,
                expected,
                found: board.perft(depth),
            };
            let passed = result.passed();
            results.push(result);
            if !passed {
                break;
            }
        }
    }
    Ok(results)
}

/// Reads a suite file, skipping blank lines.
pub fn read_suite(path: impl AsRef<Path>) -> Result<Vec<SuiteEntry>, ChessError> {
    fs::read_to_string(path)?
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_suite_line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perft(fen: &str, depth: u8) -> u64 {
        Board::from_fen(fen).expect("test fen is valid").perft(depth)
    }

    #[test]
    fn starting_pos() {
        let mut board = Board::default();
        assert_eq!(board.perft(0), 1);
        assert_eq!(board.perft(1), 20);
        assert_eq!(board.perft(2), 400);
        assert_eq!(board.perft(3), 8_902);
        assert_eq!(board.perft(4), 197_281);
    }

    #[test]
    fn kiwipete() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        assert_eq!(perft(fen, 1), 48);
        assert_eq!(perft(fen, 2), 2_039);
        assert_eq!(perft(fen, 3), 97_862);
    }

    #[test]
    fn position_3() {
        let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
        assert_eq!(perft(fen, 1), 14);
        assert_eq!(perft(fen, 2), 191);
        assert_eq!(perft(fen, 3), 2_812);
        assert_eq!(perft(fen, 4), 43_238);
        assert_eq!(perft(fen, 5), 674_624);
    }

    #[test]
    fn position_4() {
        let fen = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
        let mirrored = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
        for fen in [fen, mirrored] {
            assert_eq!(perft(fen, 1), 6);
            assert_eq!(perft(fen, 2), 264);
            assert_eq!(perft(fen, 3), 9_467);
        }
    }

    #[test]
    fn position_5() {
        let fen = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
        assert_eq!(perft(fen, 1), 44);
        assert_eq!(perft(fen, 2), 1_486);
        assert_eq!(perft(fen, 3), 62_379);
    }

    #[test]
    fn position_6() {
        let fen = "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";
        assert_eq!(perft(fen, 1), 46);
        assert_eq!(perft(fen, 2), 2_079);
        assert_eq!(perft(fen, 3), 89_890);
    }

    #[test]
    fn talkchess() {
        // see https://www.chessprogramming.net/perfect-perft/
        const PERFTS: &[(&str, u8, u64)] = &[
            ("3k4/3p4/8/K1P4r/8/8/8/8 b - - 0 1", 6, 1_134_888),
            ("8/8/4k3/8/2p5/8/B2P2K1/8 w - - 0 1", 6, 1_015_133),
            ("8/8/1k6/2b5/2pP4/8/5K2/8 b - d3 0 1", 6, 1_440_467),
            ("5k2/8/8/8/8/8/8/4K2R w K - 0 1", 6, 661_072),
            ("3k4/8/8/8/8/8/8/R3K3 w Q - 0 1", 6, 803_711),
            ("r3k2r/1b4bq/8/8/8/8/7B/R3K2R w KQkq - 0 1", 4, 1_274_206),
            ("r3k2r/8/3Q4/8/8/5q2/8/R3K2R b KQkq - 0 1", 4, 1_720_476),
            ("2K2r2/4P3/8/8/8/8/8/3k4 w - - 0 1", 6, 3_821_001),
            ("8/8/1P2K3/8/2n5/1q6/8/5k2 b - - 0 1", 5, 1_004_658),
            ("4k3/1P6/8/8/8/8/K7/8 w - - 0 1", 6, 217_342),
            ("8/P1k5/K7/8/8/8/8/8 w - - 0 1", 6, 92_683),
            ("K1k5/8/P7/8/8/8/8/8 w - - 0 1", 6, 2_217),
            ("8/8/2k5/5q2/5n2/8/5K2/8 b - - 0 1", 4, 23_527),
            ("8/k1P5/8/1K6/8/8/8/8 w - - 0 1", 7, 567_584),
        ];

        for (i, (fen, depth, move_count)) in PERFTS.iter().enumerate() {
            let board = Board::from_fen(fen).expect("fen is valid");
            assert_eq!(
                board.perft_multithread(*depth, 8),
                *move_count,
                "failed pos {i} with fen {fen}"
            );
        }
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut board = Board::default();
        let split = board.divide(3);
        assert_eq!(split.len(), 20);
        assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 8_902);
        assert!(split
            .iter()
            .any(|(mv, n)| mv.to_string() == "e2e4" && *n == 600));
        assert!(board.divide(0).is_empty());
    }

    #[test]
    fn threads_agree() {
        let board = Board::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        let single = board.clone().perft(3);
        for threads in [1, 3, 8, 64] {
            assert_eq!(board.perft_multithread(3, threads), single);
        }
        assert_eq!(board.perft_multithread(1, 4), 48);
        assert_eq!(board.perft_multithread(0, 4), 1);
    }

    #[test]
    fn suite_lines() {
        let entry =
            parse_suite_line("4k3/8/8/8/8/8/8/4K2R w K - 0 1 ;D1 15 ;D2 66 ;D3 1197").unwrap();
        assert_eq!(entry.fen, "4k3/8/8/8/8/8/8/4K2R w K - 0 1");
        assert_eq!(entry.expected, vec![(1, 15), (2, 66), (3, 1197)]);

        assert!(parse_suite_line(" ;D1 20").is_err());
        assert!(parse_suite_line("4k3/8/8/8/8/8/8/4K2R w K - 0 1 ;X1 15").is_err());
        assert!(parse_suite_line("4k3/8/8/8/8/8/8/4K2R w K - 0 1 ;D1").is_err());
    }

    #[test]
    fn suite_runs_until_a_mismatch() {
        let entries = [
            parse_suite_line("4k3/8/8/8/8/8/8/4K2R w K - 0 1 ;D1 15 ;D2 66 ;D3 1197").unwrap(),
            parse_suite_line(
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 ;D1 20 ;D2 401 ;D3 8902",
            )
            .unwrap(),
        ];
        let results = run_suite(&entries, 3).unwrap();
        assert_eq!(results.len(), 5);
        assert!(results[..4].iter().all(SuiteResult::passed));
        assert!(!results[4].passed());
        assert_eq!(results[4].found, 400);

        assert_eq!(run_suite(&entries, 1).unwrap().len(), 2);
    }

    #[test]
    fn bundled_suite() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/perft_suite.txt");
        let entries = read_suite(path).unwrap();
        assert_eq!(entries.len(), 22);
        let results = run_suite(&entries, 3).unwrap();
        assert!(!results.is_empty());
        assert!(results.iter().all(SuiteResult::passed));
    }

    #[test]
    fn missing_suite_file() {
        assert!(matches!(
            read_suite("/nonexistent/perft_suite.txt"),
            Err(ChessError::Io(_))
        ));
    }
}
