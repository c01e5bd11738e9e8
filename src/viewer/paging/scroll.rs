// SPDX-License-Identifier: MPL-2.0
//! Continuous-scroll paging.
//!
//! Pages sit side by side on one horizontal surface, page `n` at offset
//! `n * width`. When scrolling settles the current page is
//! `round(offset / width)` and the pages around it are loaded; pages leaving
//! that window have their playback paused.

use crate::config::PAGE_LOAD_WINDOW;
use crate::domain::address::IndexPath;
use crate::navigation::IndexPathMap;
use crate::port::DataSource;
use crate::viewer::cache::{ItemCache, Retrieval};
use crate::viewer::effect::{Direction, Effect};

/// Page tracking for a continuous scroll surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollPager {
    map: IndexPathMap,
    current: usize,
    loaded: Vec<usize>,
}

impl ScrollPager {
    /// Starts on `start`. `None` when `start` is not in `map`.
    #[must_use]
    pub fn new(map: IndexPathMap, start: IndexPath) -> Option<Self> {
        let current = map.flat_index_for(start)?;
        Some(Self {
            map,
            current,
            loaded: Vec::new(),
        })
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_address(&self) -> IndexPath {
        self.map
            .address_for(self.current)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn address_for_page(&self, page: usize) -> Option<IndexPath> {
        self.map.address_for(page)
    }

    #[must_use]
    pub fn page_for_address(&self, address: IndexPath) -> Option<usize> {
        self.map.flat_index_for(address)
    }

    #[must_use]
    pub fn neighbour(&self, direction: Direction) -> Option<IndexPath> {
        match direction {
            Direction::Previous => self.current.checked_sub(1),
            Direction::Next => Some(self.current + 1),
        }
        .and_then(|page| self.map.address_for(page))
    }

    /// Scroll offset that shows the current page.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn content_offset(&self, width: f32) -> f32 {
        self.current as f32 * width
    }

    /// Page shown at `offset`, or `None` when it falls outside the surface.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn page_for_offset(&self, offset: f32, width: f32) -> Option<usize> {
        if width <= 0.0 || !offset.is_finite() {
            return None;
        }
        let page = (offset / width).round();
        if page < 0.0 {
            return None;
        }
        let page = page as usize;
        (page < self.map.len()).then_some(page)
    }

    /// Pages currently holding a loaded controller.
    #[must_use]
    pub fn loaded_pages(&self) -> &[usize] {
        &self.loaded
    }

    /// Controller for `page`. Out-of-range pages have none.
    pub fn controller<'c>(
        &self,
        page: usize,
        cache: &'c mut ItemCache,
        source: &dyn DataSource,
    ) -> Option<Retrieval<'c>> {
        let address = self.map.address_for(page)?;
        cache.controller(address, source)
    }

    /// Scrolling stopped at `offset`.
    ///
    /// An offset outside the surface leaves the tracked page unchanged.
    pub fn settle(
        &mut self,
        offset: f32,
        width: f32,
        cache: &mut ItemCache,
        source: &dyn DataSource,
    ) -> Vec<Effect> {
        match self.page_for_offset(offset, width) {
            Some(page) => self.settle_on(page, cache, source),
            None => {
                tracing::debug!(offset, width, "scroll settled outside the page range");
                Vec::new()
            }
        }
    }

    /// Makes `page` current, reporting the move and reloading the window.
    pub fn settle_on(
        &mut self,
        page: usize,
        cache: &mut ItemCache,
        source: &dyn DataSource,
    ) -> Vec<Effect> {
        let (Some(from), Some(to)) = (
            self.map.address_for(self.current),
            self.map.address_for(page),
        ) else {
            return Vec::new();
        };

        let mut effects = Vec::new();
        if page != self.current {
            if let Some(controller) = cache.get_mut(from) {
                controller.pause_playback();
            }
            self.current = page;
            effects.push(Effect::MovedFrom(from));
            effects.push(Effect::MovedTo(to));
            effects.push(Effect::FocusChanged(to));
        }
        effects.extend(self.load_window(cache, source));
        effects
    }

    /// Ensures controllers exist for the pages around the current one.
    pub fn load_window(&mut self, cache: &mut ItemCache, source: &dyn DataSource) -> Vec<Effect> {
        let half = PAGE_LOAD_WINDOW / 2;
        let first = self.current.saturating_sub(half);
        let last = (self.current + half).min(self.map.len().saturating_sub(1));
        let wanted: Vec<usize> = (first..=last).collect();

        for page in self.loaded.iter().filter(|page| !wanted.contains(page)) {
            if let Some(controller) = self.map.address_for(*page).and_then(|a| cache.get_mut(a)) {
                controller.pause_playback();
            }
        }

        // Current page first so it wins the cache's recency order.
        let mut order = vec![self.current];
        order.extend(wanted.iter().copied().filter(|page| *page != self.current));

        let mut effects = Vec::new();
        for page in order {
            if let Some(request) = self
                .controller(page, cache, source)
                .and_then(|retrieval| retrieval.resolve)
            {
                effects.push(Effect::ResolveMedia(request));
            }
        }

        self.loaded = wanted;
        effects
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

    const WIDTH: f32 = 320.0;

    #[derive(Debug)]
    struct Photo(usize);

    impl ViewableItem for Photo {
        fn id(&self) -> ItemId {
            ItemId::new(format!("photo-{}", self.0))
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

    struct Strip(usize);

    impl DataSource for Strip {
        fn item_count(&self, _section: usize) -> usize {
            self.0
        }

        fn item(&self, address: IndexPath) -> Option<Arc<dyn ViewableItem>> {
            (address.section == 0 && address.row < self.0)
                .then(|| Arc::new(Photo(address.row)) as Arc<dyn ViewableItem>)
        }
    }

    fn setup(count: usize) -> (ScrollPager, ItemCache, Strip) {
        let source = Strip(count);
        let pager = ScrollPager::new(IndexPathMap::from_source(&source), IndexPath::new(0, 0))
            .expect("start in range");
        let cache = ItemCache::new(8, Platform::Touch.capabilities().into());
        (pager, cache, source)
    }

    #[test]
    fn scrolling_to_second_page_moves_from_first_to_second() {
        let (mut pager, mut cache, source) = setup(3);

        let effects = pager.settle(WIDTH, WIDTH, &mut cache, &source);

        assert!(matches!(effects[0], Effect::MovedFrom(a) if a == IndexPath::new(0, 0)));
        assert!(matches!(effects[1], Effect::MovedTo(a) if a == IndexPath::new(0, 1)));
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn page_past_the_end_has_no_controller() {
        let (pager, mut cache, source) = setup(3);
        assert!(pager.controller(3, &mut cache, &source).is_none());
        assert!(pager.controller(2, &mut cache, &source).is_some());
    }

    #[test]
    fn offset_outside_surface_keeps_current_page() {
        let (mut pager, mut cache, source) = setup(3);

        assert!(pager.settle(WIDTH * 5.0, WIDTH, &mut cache, &source).is_empty());
        assert!(pager.settle(-WIDTH, WIDTH, &mut cache, &source).is_empty());
        assert_eq!(pager.current_page(), 0);
    }

    #[test]
    fn offsets_round_to_nearest_page() {
        let (pager, _, _) = setup(3);
        assert_eq!(pager.page_for_offset(WIDTH * 0.49, WIDTH), Some(0));
        assert_eq!(pager.page_for_offset(WIDTH * 1.51, WIDTH), Some(2));
        assert_eq!(pager.page_for_offset(10.0, 0.0), None);
    }

    #[test]
    fn settling_on_same_page_reports_no_move() {
        let (mut pager, mut cache, source) = setup(3);
        let effects = pager.settle(WIDTH * 0.2, WIDTH, &mut cache, &source);
        assert!(effects
            .iter()
            .all(|effect| matches!(effect, Effect::ResolveMedia(_))));
    }

    #[test]
    fn load_window_covers_neighbours_only() {
        let (mut pager, mut cache, source) = setup(5);
        pager.settle_on(2, &mut cache, &source);
        assert_eq!(pager.loaded_pages(), &[1, 2, 3]);

        let effects = pager.settle_on(3, &mut cache, &source);
        assert_eq!(pager.loaded_pages(), &[2, 3, 4]);
        // Only page 4 is new.
        let requests = effects
            .iter()
            .filter(|effect| matches!(effect, Effect::ResolveMedia(_)))
            .count();
        assert_eq!(requests, 1);
    }

    #[test]
    fn window_is_clipped_at_edges() {
        let (mut pager, mut cache, source) = setup(3);
        pager.load_window(&mut cache, &source);
        assert_eq!(pager.loaded_pages(), &[0, 1]);
    }

    #[test]
    fn neighbours_stop_at_boundaries() {
        let (pager, _, _) = setup(2);
        assert_eq!(pager.neighbour(Direction::Previous), None);
        assert_eq!(pager.neighbour(Direction::Next), Some(IndexPath::new(0, 1)));
        assert_eq!(pager.content_offset(WIDTH), 0.0);
    }
}
