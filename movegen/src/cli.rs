use std::{collections::VecDeque, time::Instant};

use clap::{Parser, Subcommand};
use util::{error::ChessError, square::Square};

use crate::{
    board::{Board, START_FEN},
    mv::Move,
    perft::{read_suite, run_suite},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
#[clap(rename_all = "snake_case")]
pub enum Command {
    /// Read further commands from stdin, one per line
    Interactive,
    /// Set the position from a FEN (quoted) or `startpos`
    Position {
        fen: String,
    },
    /// Count leaf nodes, per root move unless threads are used
    Perft {
        ply: u8,
        fen: Option<String>,
        #[arg(short, long)]
        thread_count: Option<usize>,
    },
    /// Play a move in long algebraic notation, e.g. e2e4
    Move {
        mv: String,
    },
    /// Take back the last move played
    Undo,
    /// List legal moves, optionally only those from one square
    Moves {
        sq: Option<String>,
    },
    /// Run a perft suite file of `<fen> ;D1 <n> ;D2 <n> ...` lines
    Suite {
        path: String,
        #[arg(short, long, default_value_t = 6)]
        max_depth: u8,
    },
    Fen,
    Print,
    Exit,
    Reset,
}

/// A board plus the moves played on it, so they can be taken back.
#[derive(Debug, Default)]
pub struct Session {
    pub board: Board,
    pub played: Vec<Move>,
}

impl Session {
    fn set_position(&mut self, fen: &str) -> Result<(), ChessError> {
        let fen = if fen == "startpos" { START_FEN } else { fen };
        self.board = Board::from_fen(fen)?;
        self.played.clear();
        Ok(())
    }
}

pub fn handle_command(cmd: Command, session: &mut Session) {
    if let Err(err) = try_handle_command(cmd, session) {
        println!("Error: {err}");
    }
}

fn try_handle_command(cmd: Command, session: &mut Session) -> Result<(), ChessError> {
    match cmd {
        Command::Perft {
            ply,
            fen,
            thread_count,
        } => {
            if let Some(fen) = fen {
                session.set_position(&fen)?;
            }
            let start = Instant::now();
            let total = if let Some(thread_count) = thread_count {
                session.board.perft_multithread(ply, thread_count)
            } else {
                let split = session.board.divide(ply);
                for (mv, count) in &split {
                    println!("{mv}: {count}");
                }
                split.iter().map(|(_, count)| count).sum()
            };
            let elapsed = start.elapsed();
            println!("Total: {total}");
            println!(
                "Million moves/sec: {:.2}",
                1e-6 * total as f64 / elapsed.as_secs_f64()
            );
        }
        Command::Reset => *session = Session::default(),
        Command::Print => println!("{}", session.board),
        Command::Fen => println!("{}", session.board.fen()),
        Command::Position { fen } => session.set_position(&fen)?,
        Command::Move { mv } => {
            let mv = Move::from_str(&mv, &session.board)?;
            session.board.make_move(mv);
            session.played.push(mv);
        }
        Command::Undo => match session.played.pop() {
            Some(mv) => session.board.undo_move(mv),
            None => println!("Nothing to undo"),
        },
        Command::Moves { sq } => {
            let moves = match sq {
                Some(sq) => session.board.get_sq_moves(sq.parse::<Square>()?),
                None => session.board.generate_moves(),
            };
            let moves: Vec<String> = moves.iter().map(Move::to_string).collect();
            println!("Moves: {}", moves.join(", "));
        }
        Command::Suite { path, max_depth } => {
            let results = run_suite(&read_suite(path)?, max_depth)?;
            for result in &results {
                println!(
                    "Perft {} {}: {} ({} expected) {}",
                    result.depth,
                    result.fen,
                    result.found,
                    result.expected,
                    if result.passed() { "OK" } else { "ERROR" }
                );
            }
            if results.iter().all(|result| result.passed()) {
                println!("ALL OK");
            } else {
                println!("FAILED");
            }
        }
        Command::Interactive | Command::Exit => {}
    }
    Ok(())
}

/// Splits a command line on spaces, keeping `'single quoted'` parts (such
/// as a FEN) together.
pub fn split_ignore_quotes(input: &str) -> VecDeque<String> {
    let mut split_strings = VecDeque::new();
    let mut inside_quotes = false;
    let mut current_string = String::new();

    for c in input.chars() {
        match c {
            '\'' => inside_quotes = !inside_quotes,
            ' ' if !inside_quotes => {
                if !current_string.is_empty() {
                    split_strings.push_back(current_string.clone());
                    current_string.clear();
                }
            }
            _ => current_string.push(c),
        }
    }

    if !current_string.is_empty() {
        split_strings.push_back(current_string);
    }

    split_strings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        let mut args = split_ignore_quotes(line);
        args.push_front("movegen".to_owned());
        Cli::try_parse_from(args).expect("command parses").command
    }

    #[test]
    fn quoted_fen_stays_together() {
        let args = split_ignore_quotes("position '4k3/8/8/8/8/8/8/4K3 w - - 0 1'");
        assert_eq!(args.len(), 2);
        assert_eq!(args[1], "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(split_ignore_quotes("  perft   3 ").len(), 2);
    }

    #[test]
    fn commands_parse() {
        assert!(matches!(
            parse("perft 4 -t 8"),
            Command::Perft {
                ply: 4,
                fen: None,
                thread_count: Some(8)
            }
        ));
        assert!(matches!(parse("moves e2"), Command::Moves { sq: Some(_) }));
        assert!(matches!(parse("undo"), Command::Undo));
        assert!(matches!(
            parse("suite perft_suite.txt"),
            Command::Suite { max_depth: 6, .. }
        ));
    }

    #[test]
    fn play_and_take_back() {
        let mut session = Session::default();
        handle_command(parse("move e2e4"), &mut session);
        handle_command(parse("move e7e5"), &mut session);
        assert_eq!(session.played.len(), 2);
        // illegal, ignored
        handle_command(parse("move e4e5"), &mut session);
        assert_eq!(session.played.len(), 2);

        handle_command(parse("undo"), &mut session);
        handle_command(parse("undo"), &mut session);
        assert!(session.played.is_empty());
        assert_eq!(session.board, Board::default());
        handle_command(parse("undo"), &mut session);
    }

    #[test]
    fn positions() {
        let mut session = Session::default();
        handle_command(parse("position '4k3/8/8/8/8/8/8/4K3 b - - 0 1'"), &mut session);
        assert_eq!(session.board.fen(), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");
        // a bad fen keeps the current position
        handle_command(parse("position 'not a fen'"), &mut session);
        assert_eq!(session.board.fen(), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");
        handle_command(parse("position startpos"), &mut session);
        assert_eq!(session.board, Board::default());
    }
}
