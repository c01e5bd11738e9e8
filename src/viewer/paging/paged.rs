// SPDX-License-Identifier: MPL-2.0
//! Discrete page-container paging.
//!
//! The container asks for the controller before or after the visible one and
//! announces the pages it is about to show. Focus is reported optimistically
//! for each candidate, then once more for the page actually committed.

use crate::domain::address::IndexPath;
use crate::navigation::IndexPathMap;
use crate::port::DataSource;
use crate::viewer::cache::{ItemCache, Retrieval};
use crate::viewer::effect::{Direction, Effect};

/// Page tracking for a discrete page container.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedPager {
    map: IndexPathMap,
    current: IndexPath,
    pending: Vec<IndexPath>,
}

impl PagedPager {
    /// Starts on `start`. `None` when `start` is not in `map`.
    #[must_use]
    pub fn new(map: IndexPathMap, start: IndexPath) -> Option<Self> {
        map.contains(start).then(|| Self {
            map,
            current: start,
            pending: Vec::new(),
        })
    }

    #[must_use]
    pub fn current(&self) -> IndexPath {
        self.current
    }

    /// Pages announced by the last transition that has not finished yet.
    #[must_use]
    pub fn pending(&self) -> &[IndexPath] {
        &self.pending
    }

    #[must_use]
    pub fn neighbour(&self, direction: Direction) -> Option<IndexPath> {
        match direction {
            Direction::Previous => self.map.previous(self.current),
            Direction::Next => self.map.next(self.current),
        }
    }

    /// Controller for the page before `address`; `None` at the first page.
    pub fn controller_before<'c>(
        &self,
        address: IndexPath,
        cache: &'c mut ItemCache,
        source: &dyn DataSource,
    ) -> Option<Retrieval<'c>> {
        let previous = self.map.previous(address)?;
        cache.controller(previous, source)
    }

    /// Controller for the page after `address`; `None` at the last page.
    pub fn controller_after<'c>(
        &self,
        address: IndexPath,
        cache: &'c mut ItemCache,
        source: &dyn DataSource,
    ) -> Option<Retrieval<'c>> {
        let next = self.map.next(address)?;
        cache.controller(next, source)
    }

    /// The container is about to show `pending`.
    pub fn will_transition_to(&mut self, pending: &[IndexPath]) -> Vec<Effect> {
        self.pending = pending
            .iter()
            .copied()
            .filter(|address| self.map.contains(*address))
            .collect();
        self.pending.iter().copied().map(Effect::FocusChanged).collect()
    }

    /// The transition ended. Only a completed transition commits `landed`.
    pub fn did_finish(&mut self, completed: bool, landed: IndexPath) -> Vec<Effect> {
        self.pending.clear();
        if !completed {
            tracing::debug!(current = %self.current, "page transition cancelled");
            return Vec::new();
        }
        if !self.map.contains(landed) {
            tracing::warn!(%landed, "page transition landed outside the collection");
            return Vec::new();
        }
        self.current = landed;
        vec![Effect::FocusChanged(landed)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::{Artwork, ItemId, MediaFuture, MediaKind, ViewableItem};
    use crate::domain::platform::Platform;
    use futures_util::FutureExt;
    use iced::widget::image::Handle;
    use iced::Size;
    use std::sync::Arc;

    #[derive(Debug)]
    struct Photo(IndexPath);

    impl ViewableItem for Photo {
        fn id(&self) -> ItemId {
            ItemId::new(self.0.cache_key())
        }

        fn kind(&self) -> MediaKind {
            MediaKind::Image
        }

        fn placeholder(&self) -> Artwork {
            Artwork::new(Handle::from_rgba(1, 1, vec![0; 4]), Size::new(1.0, 1.0))
        }

        fn resolve_media(&self) -> MediaFuture {
            async { Err(crate::domain::item::MediaError::NotFound) }.boxed()
        }
    }

    /// Two sections: three photos, then one.
    struct Albums;

    impl DataSource for Albums {
        fn section_count(&self) -> usize {
            2
        }

        fn item_count(&self, section: usize) -> usize {
            [3, 1].get(section).copied().unwrap_or(0)
        }

        fn item(&self, address: IndexPath) -> Option<Arc<dyn ViewableItem>> {
            (address.row < self.item_count(address.section))
                .then(|| Arc::new(Photo(address)) as Arc<dyn ViewableItem>)
        }
    }

    fn setup(start: IndexPath) -> (PagedPager, ItemCache) {
        let pager = PagedPager::new(IndexPathMap::from_source(&Albums), start).expect("in range");
        (pager, ItemCache::new(8, Platform::Touch.capabilities().into()))
    }

    #[test]
    fn before_first_and_after_last_have_no_controller() {
        let (pager, mut cache) = setup(IndexPath::new(0, 0));
        assert!(pager
            .controller_before(IndexPath::new(0, 0), &mut cache, &Albums)
            .is_none());
        assert!(pager
            .controller_after(IndexPath::new(1, 0), &mut cache, &Albums)
            .is_none());
    }

    #[test]
    fn after_crosses_into_next_section() {
        let (pager, mut cache) = setup(IndexPath::new(0, 2));
        let retrieval = pager
            .controller_after(IndexPath::new(0, 2), &mut cache, &Albums)
            .expect("next section");
        assert_eq!(retrieval.controller.address(), IndexPath::new(1, 0));
        assert!(retrieval.resolve.is_some());
    }

    #[test]
    fn transition_reports_candidates_then_commits() {
        let (mut pager, _) = setup(IndexPath::new(0, 0));

        let optimistic = pager.will_transition_to(&[IndexPath::new(0, 1)]);
        assert!(matches!(
            optimistic.as_slice(),
            [Effect::FocusChanged(a)] if *a == IndexPath::new(0, 1)
        ));
        assert_eq!(pager.pending(), &[IndexPath::new(0, 1)]);

        let committed = pager.did_finish(true, IndexPath::new(0, 1));
        assert!(matches!(
            committed.as_slice(),
            [Effect::FocusChanged(a)] if *a == IndexPath::new(0, 1)
        ));
        assert_eq!(pager.current(), IndexPath::new(0, 1));
        assert!(pager.pending().is_empty());
    }

    #[test]
    fn cancelled_transition_commits_nothing() {
        let (mut pager, _) = setup(IndexPath::new(0, 1));
        pager.will_transition_to(&[IndexPath::new(0, 2)]);

        assert!(pager.did_finish(false, IndexPath::new(0, 2)).is_empty());
        assert_eq!(pager.current(), IndexPath::new(0, 1));
    }

    #[test]
    fn candidates_outside_collection_are_ignored() {
        let (mut pager, _) = setup(IndexPath::new(0, 0));
        assert!(pager.will_transition_to(&[IndexPath::new(4, 0)]).is_empty());
        assert!(pager.did_finish(true, IndexPath::new(4, 0)).is_empty());
        assert_eq!(pager.current(), IndexPath::new(0, 0));
    }

    #[test]
    fn neighbours_follow_section_order() {
        let (pager, _) = setup(IndexPath::new(1, 0));
        assert_eq!(pager.neighbour(Direction::Previous), Some(IndexPath::new(0, 2)));
        assert_eq!(pager.neighbour(Direction::Next), None);
    }
}
