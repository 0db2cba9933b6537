use std::ops::{Index, IndexMut};

use util::color::Color;

/// One value per side, indexed by `&Color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BothColors<T> {
    white: T,
    black: T,
}

impl<T> BothColors<T> {
    pub const fn new(white: T, black: T) -> Self {
        Self { white, black }
    }
}

impl<T> Index<&Color> for BothColors<T> {
    type Output = T;
    fn index(&self, index: &Color) -> &Self::Output {
        match index {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

impl<T> IndexMut<&Color> for BothColors<T> {
    fn index_mut(&mut self, index: &Color) -> &mut Self::Output {
        match index {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}
