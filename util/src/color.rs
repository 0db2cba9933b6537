#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Self; 2] = [Self::White, Self::Black];

    pub fn from_char(c: char) -> Self {
        if c.is_uppercase() {
            Self::White
        } else {
            Self::Black
        }
    }

    pub fn from_fen(input: &str) -> Option<Self> {
        match input {
            "w" => Some(Self::White),
            "b" => Some(Self::Black),
            _ => None,
        }
    }

    pub const fn to_fen(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    pub const fn idx(&self) -> usize {
        *self as usize
    }

    /// Square index offset of a single pawn push.
    pub const fn forward(&self) -> i8 {
        match self {
            Self::White => 8,
            Self::Black => -8,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

impl std::ops::Not for &Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Color::White => &Color::Black,
            Color::Black => &Color::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn fen_side_to_move() {
        assert_eq!(Color::from_fen("w"), Some(Color::White));
        assert_eq!(Color::from_fen("b"), Some(Color::Black));
        assert_eq!(Color::from_fen("x"), None);
        assert_eq!(Color::Black.to_fen(), 'b');
        assert_eq!(!Color::White, Color::Black);
    }
}
