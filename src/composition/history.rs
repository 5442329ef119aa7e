use crate::foundation::core::Rgb8;

/// Most-recently-used colors, newest first, without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorHistory {
    colors: Vec<Rgb8>,
}

impl ColorHistory {
    /// Maximum number of remembered colors.
    pub const CAPACITY: usize = 5;

    /// Empty history.
    pub fn new() -> Self {
        Self {
            colors: Vec::with_capacity(Self::CAPACITY),
        }
    }

    /// Move `color` to the front, evicting the oldest entry past capacity.
    pub fn record(&mut self, color: Rgb8) {
        self.colors.retain(|&c| c != color);
        self.colors.insert(0, color);
        self.colors.truncate(Self::CAPACITY);
    }

    /// Look up a swatch without reordering.
    pub fn select(&self, index: usize) -> Option<Rgb8> {
        self.colors.get(index).copied()
    }

    /// Current entries, newest first.
    pub fn as_slice(&self) -> &[Rgb8] {
        &self.colors
    }

    /// Iterate newest first.
    pub fn iter(&self) -> impl Iterator<Item = Rgb8> + '_ {
        self.colors.iter().copied()
    }

    /// Number of remembered colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/history.rs"]
mod tests;
