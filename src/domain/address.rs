// SPDX-License-Identifier: MPL-2.0
//! Two-level item addresses.

use std::fmt;

/// Position of an item in the host collection: `row` within `section`.
///
/// Addresses order section-major, row-minor, which is also the order the
/// viewer pages through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IndexPath {
    pub section: usize,
    pub row: usize,
}

impl IndexPath {
    #[must_use]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// String form used to key cached item controllers.
    #[must_use]
    pub fn cache_key(self) -> String {
        format!("{}-{}", self.section, self.row)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_section_major() {
        assert!(IndexPath::new(0, 9) < IndexPath::new(1, 0));
        assert!(IndexPath::new(1, 0) < IndexPath::new(1, 1));
    }

    #[test]
    fn cache_key_distinguishes_section_and_row() {
        assert_eq!(IndexPath::new(1, 12).cache_key(), "1-12");
        assert_ne!(
            IndexPath::new(11, 2).cache_key(),
            IndexPath::new(1, 12).cache_key()
        );
    }

    #[test]
    fn display_is_bracketed() {
        assert_eq!(IndexPath::new(2, 3).to_string(), "[2, 3]");
    }
}
