use std::fmt::Display;

#[derive(Debug)]
pub enum ChessError {
    Parse(String),
    InvalidMove(String),
    Io(std::io::Error),
}

impl Display for ChessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::InvalidMove(msg) => write!(f, "invalid move: {msg}"),
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for ChessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ChessError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
