// SPDX-License-Identifier: MPL-2.0
//! Conversion between flat item indices and (section, row) addresses.
//!
//! The host collection groups items into sections whose sizes vary. Paging
//! walks addresses in section-major order, so the viewer needs to step to the
//! neighbouring address and to translate between a flat position and an
//! address in both directions. Boundaries never wrap: stepping past the first
//! or last item yields `None`.

use crate::domain::address::IndexPath;
use crate::port::DataSource;

/// Snapshot of per-section item counts with address arithmetic on top.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexPathMap {
    counts: Vec<usize>,
    total: usize,
}

impl IndexPathMap {
    #[must_use]
    pub fn new(counts: Vec<usize>) -> Self {
        let total = counts.iter().sum();
        Self { counts, total }
    }

    /// Captures the current section layout of a data source.
    #[must_use]
    pub fn from_source(source: &dyn DataSource) -> Self {
        Self::new(
            (0..source.section_count())
                .map(|section| source.item_count(section))
                .collect(),
        )
    }

    /// Total number of items across all sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    #[must_use]
    pub fn section_count(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn contains(&self, address: IndexPath) -> bool {
        self.counts
            .get(address.section)
            .is_some_and(|count| address.row < *count)
    }

    #[must_use]
    pub fn first(&self) -> Option<IndexPath> {
        self.address_for(0)
    }

    #[must_use]
    pub fn last(&self) -> Option<IndexPath> {
        self.total.checked_sub(1).and_then(|i| self.address_for(i))
    }

    /// Address immediately after `address`, skipping empty sections.
    #[must_use]
    pub fn next(&self, address: IndexPath) -> Option<IndexPath> {
        if !self.contains(address) {
            return None;
        }
        if address.row + 1 < self.counts[address.section] {
            return Some(IndexPath::new(address.section, address.row + 1));
        }
        (address.section + 1..self.counts.len())
            .find(|section| self.counts[*section] > 0)
            .map(|section| IndexPath::new(section, 0))
    }

    /// Address immediately before `address`, skipping empty sections.
    #[must_use]
    pub fn previous(&self, address: IndexPath) -> Option<IndexPath> {
        if !self.contains(address) {
            return None;
        }
        if address.row > 0 {
            return Some(IndexPath::new(address.section, address.row - 1));
        }
        (0..address.section)
            .rev()
            .find(|section| self.counts[*section] > 0)
            .map(|section| IndexPath::new(section, self.counts[section] - 1))
    }

    /// Address of the item at flat position `index`.
    #[must_use]
    pub fn address_for(&self, index: usize) -> Option<IndexPath> {
        let mut remaining = index;
        for (section, count) in self.counts.iter().enumerate() {
            if remaining < *count {
                return Some(IndexPath::new(section, remaining));
            }
            remaining -= count;
        }
        None
    }

    /// Flat position of `address`: all preceding sections plus the row.
    #[must_use]
    pub fn flat_index_for(&self, address: IndexPath) -> Option<usize> {
        if !self.contains(address) {
            return None;
        }
        let preceding: usize = self.counts[..address.section].iter().sum();
        Some(preceding + address.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> IndexPathMap {
        IndexPathMap::new(vec![2, 0, 3, 1])
    }

    #[test]
    fn round_trip_holds_for_every_flat_index() {
        let map = map();
        for i in 0..map.len() {
            let address = map.address_for(i).expect("index in range");
            assert_eq!(map.flat_index_for(address), Some(i));
        }
    }

    #[test]
    fn address_for_walks_sections() {
        let map = map();
        assert_eq!(map.address_for(0), Some(IndexPath::new(0, 0)));
        assert_eq!(map.address_for(2), Some(IndexPath::new(2, 0)));
        assert_eq!(map.address_for(5), Some(IndexPath::new(3, 0)));
        assert_eq!(map.address_for(6), None);
    }

    #[test]
    fn next_and_previous_skip_empty_sections() {
        let map = map();
        assert_eq!(map.next(IndexPath::new(0, 1)), Some(IndexPath::new(2, 0)));
        assert_eq!(map.previous(IndexPath::new(2, 0)), Some(IndexPath::new(0, 1)));
    }

    #[test]
    fn next_of_previous_is_identity_away_from_boundaries() {
        let map = map();
        for i in 1..map.len() {
            let address = map.address_for(i).expect("index in range");
            let previous = map.previous(address).expect("not the first address");
            assert_eq!(map.next(previous), Some(address));
        }
    }

    #[test]
    fn boundaries_return_terminal_marker() {
        let map = map();
        assert_eq!(map.previous(IndexPath::new(0, 0)), None);
        assert_eq!(map.next(IndexPath::new(3, 0)), None);
    }

    #[test]
    fn invalid_addresses_are_rejected() {
        let map = map();
        assert!(!map.contains(IndexPath::new(1, 0)));
        assert_eq!(map.flat_index_for(IndexPath::new(2, 3)), None);
        assert_eq!(map.next(IndexPath::new(9, 0)), None);
    }

    #[test]
    fn empty_map_has_no_addresses() {
        let map = IndexPathMap::default();
        assert!(map.is_empty());
        assert_eq!(map.first(), None);
        assert_eq!(map.last(), None);
    }

    #[test]
    fn first_and_last() {
        let map = map();
        assert_eq!(map.first(), Some(IndexPath::new(0, 0)));
        assert_eq!(map.last(), Some(IndexPath::new(3, 0)));
    }
}
