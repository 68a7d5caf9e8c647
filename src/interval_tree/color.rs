//! Red-black color tag used by the balancing algorithms.

/// The color of a node in the red-black tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// Returns `true` if this is [`Color::Red`].
    #[inline]
    pub fn is_red(self) -> bool {
        matches!(self, Color::Red)
    }

    /// Returns `true` if this is [`Color::Black`].
    #[inline]
    pub fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }
}
