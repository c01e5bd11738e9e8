// SPDX-License-Identifier: MPL-2.0
//! Horizontal paging between items.
//!
//! Two interchangeable strategies share one interface:
//!
//! - [`ScrollPager`]: continuous scroll surface, settles on `round(offset / width)`
//! - [`PagedPager`]: discrete page container with before/after lookups
//!
//! Both walk addresses in section-major order and never wrap.

mod paged;
mod scroll;

pub use paged::PagedPager;
pub use scroll::ScrollPager;

use crate::config::PagingStrategy;
use crate::domain::address::IndexPath;
use crate::navigation::IndexPathMap;
use crate::port::DataSource;
use crate::viewer::cache::ItemCache;
use crate::viewer::effect::{Direction, Effect};

/// The active paging strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Pager {
    Scroll(ScrollPager),
    Paged(PagedPager),
}

impl Pager {
    /// Starts paging at `start`. `None` when `start` is not in `map`.
    #[must_use]
    pub fn new(strategy: PagingStrategy, map: IndexPathMap, start: IndexPath) -> Option<Self> {
        match strategy {
            PagingStrategy::Scroll => ScrollPager::new(map, start).map(Pager::Scroll),
            PagingStrategy::Page => PagedPager::new(map, start).map(Pager::Paged),
        }
    }

    #[must_use]
    pub fn strategy(&self) -> PagingStrategy {
        match self {
            Pager::Scroll(_) => PagingStrategy::Scroll,
            Pager::Paged(_) => PagingStrategy::Page,
        }
    }

    #[must_use]
    pub fn current(&self) -> IndexPath {
        match self {
            Pager::Scroll(pager) => pager.current_address(),
            Pager::Paged(pager) => pager.current(),
        }
    }

    #[must_use]
    pub fn neighbour(&self, direction: Direction) -> Option<IndexPath> {
        match self {
            Pager::Scroll(pager) => pager.neighbour(direction),
            Pager::Paged(pager) => pager.neighbour(direction),
        }
    }

    /// Ensures controllers for the current page and its neighbours.
    pub fn load(&mut self, cache: &mut ItemCache, source: &dyn DataSource) -> Vec<Effect> {
        match self {
            Pager::Scroll(pager) => pager.load_window(cache, source),
            Pager::Paged(pager) => {
                let current = pager.current();
                let mut requests = Vec::new();
                requests.extend(
                    cache
                        .controller(current, source)
                        .and_then(|retrieval| retrieval.resolve),
                );
                requests.extend(
                    pager
                        .controller_before(current, cache, source)
                        .and_then(|retrieval| retrieval.resolve),
                );
                requests.extend(
                    pager
                        .controller_after(current, cache, source)
                        .and_then(|retrieval| retrieval.resolve),
                );
                requests.into_iter().map(Effect::ResolveMedia).collect()
            }
        }
    }

    /// A swipe toward `direction` started.
    pub fn begin(&mut self, direction: Direction) -> Vec<Effect> {
        match self.neighbour(direction) {
            Some(candidate) => self.will_transition_to(&[candidate]),
            None => Vec::new(),
        }
    }

    /// A page container is about to show `pending`. Continuous scrolling has
    /// no such phase.
    pub fn will_transition_to(&mut self, pending: &[IndexPath]) -> Vec<Effect> {
        match self {
            Pager::Scroll(_) => Vec::new(),
            Pager::Paged(pager) => pager.will_transition_to(pending),
        }
    }

    /// A continuous scroll surface stopped at `offset`. Page containers
    /// ignore offsets.
    pub fn settle(
        &mut self,
        offset: f32,
        width: f32,
        cache: &mut ItemCache,
        source: &dyn DataSource,
    ) -> Vec<Effect> {
        match self {
            Pager::Scroll(pager) => pager.settle(offset, width, cache, source),
            Pager::Paged(_) => Vec::new(),
        }
    }

    /// A swipe ended, landing one page toward `direction` or, with `None`,
    /// back on the current page.
    pub fn finish(
        &mut self,
        direction: Option<Direction>,
        cache: &mut ItemCache,
        source: &dyn DataSource,
    ) -> Vec<Effect> {
        let from = self.current();
        let target = direction.and_then(|direction| self.neighbour(direction));
        self.did_finish(target.is_some(), target.unwrap_or(from), cache, source)
    }

    /// A page transition ended on `landed`. Only a completed transition moves
    /// the current page.
    pub fn did_finish(
        &mut self,
        completed: bool,
        landed: IndexPath,
        cache: &mut ItemCache,
        source: &dyn DataSource,
    ) -> Vec<Effect> {
        match self {
            Pager::Scroll(pager) => {
                let page = if completed {
                    pager.page_for_address(landed)
                } else {
                    Some(pager.current_page())
                };
                match page {
                    Some(page) => pager.settle_on(page, cache, source),
                    None => Vec::new(),
                }
            }
            Pager::Paged(pager) => {
                let from = pager.current();
                let mut effects = pager.did_finish(completed, landed);
                if pager.current() != from {
                    if let Some(controller) = cache.get_mut(from) {
                        controller.pause_playback();
                    }
                    effects.extend(self.load(cache, source));
                }
                effects
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> IndexPathMap {
        IndexPathMap::new(vec![2, 2])
    }

    #[test]
    fn new_rejects_start_outside_map() {
        assert!(Pager::new(PagingStrategy::Scroll, map(), IndexPath::new(2, 0)).is_none());
        assert!(Pager::new(PagingStrategy::Page, map(), IndexPath::new(0, 2)).is_none());
    }

    #[test]
    fn strategies_agree_on_neighbours() {
        let start = IndexPath::new(0, 1);
        for strategy in [PagingStrategy::Scroll, PagingStrategy::Page] {
            let pager = Pager::new(strategy, map(), start).expect("in range");
            assert_eq!(pager.strategy(), strategy);
            assert_eq!(pager.current(), start);
            assert_eq!(pager.neighbour(Direction::Next), Some(IndexPath::new(1, 0)));
            assert_eq!(pager.neighbour(Direction::Previous), Some(IndexPath::new(0, 0)));
        }
    }

    #[test]
    fn begin_reports_candidate_only_for_page_container() {
        let start = IndexPath::new(0, 0);
        let mut scroll = Pager::new(PagingStrategy::Scroll, map(), start).expect("in range");
        let mut paged = Pager::new(PagingStrategy::Page, map(), start).expect("in range");

        assert!(scroll.begin(Direction::Next).is_empty());
        assert_eq!(paged.begin(Direction::Next).len(), 1);
        assert!(paged.begin(Direction::Previous).is_empty());
    }
}
