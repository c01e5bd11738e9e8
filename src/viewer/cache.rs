// SPDX-License-Identifier: MPL-2.0
//! Bounded cache of item controllers keyed by address.
//!
//! Repeated requests for the same address return the same controller
//! instance, rebinding it only when the data source now holds a different
//! item there. When the cache is full the least recently used controller is
//! evicted and its playback torn down.

use super::effect::ResolveRequest;
use super::item::{ItemController, Phase, Wiring};
use crate::domain::address::IndexPath;
use crate::port::DataSource;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Statistics about controller reuse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests served by an existing controller.
    pub hits: u64,
    /// Requests that had to construct a controller.
    pub misses: u64,
    /// Existing controllers bound to a different item.
    pub rebinds: u64,
    pub evictions: u64,
}

impl CacheStats {
    /// Returns the hit rate as a percentage (0.0 - 100.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// A controller handed out by [`ItemCache::controller`], plus the media request
/// its binding produced, if it had to be (re)bound.
#[derive(Debug)]
pub struct Retrieval<'a> {
    pub controller: &'a mut ItemController,
    pub resolve: Option<ResolveRequest>,
}

/// LRU cache of [`ItemController`]s.
pub struct ItemCache {
    entries: LruCache<String, ItemController>,
    wiring: Wiring,
    stats: CacheStats,
}

impl std::fmt::Debug for ItemCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.entries.cap())
            .field("stats", &self.stats)
            .finish()
    }
}

impl ItemCache {
    /// Creates a cache holding at most `capacity` controllers (at least one).
    #[must_use]
    pub fn new(capacity: usize, wiring: Wiring) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            wiring,
            stats: CacheStats::default(),
        }
    }

    /// Returns the controller for `address`, constructing or rebinding it as
    /// needed. `None` when the data source has no item there.
    pub fn controller(
        &mut self,
        address: IndexPath,
        source: &dyn DataSource,
    ) -> Option<Retrieval<'_>> {
        let item = source.item(address)?;
        let key = address.cache_key();

        if self.entries.contains(&key) {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
            tracing::debug!(%address, "constructing item controller");
            let controller = ItemController::new(address, self.wiring);
            if let Some((evicted_key, mut evicted)) = self.entries.push(key.clone(), controller) {
                tracing::debug!(key = %evicted_key, "evicting item controller");
                evicted.unbind();
                self.stats.evictions += 1;
            }
        }

        let controller = self.entries.get_mut(&key)?;
        let resolve = if controller.needs_binding(&item.id()) {
            if controller.phase() != Phase::Unbound {
                self.stats.rebinds += 1;
            }
            Some(controller.bind(item))
        } else {
            None
        };

        Some(Retrieval {
            controller,
            resolve,
        })
    }

    /// Existing controller for `address`, without touching recency.
    #[must_use]
    pub fn get(&self, address: IndexPath) -> Option<&ItemController> {
        self.entries.peek(&address.cache_key())
    }

    /// Existing controller for `address`, without touching recency.
    pub fn get_mut(&mut self, address: IndexPath) -> Option<&mut ItemController> {
        self.entries.peek_mut(&address.cache_key())
    }

    /// Invalidates the controller at `address`. Returns false if none exists.
    pub fn reset(&mut self, address: IndexPath) -> bool {
        match self.get_mut(address) {
            Some(controller) => {
                controller.reset();
                true
            }
            None => false,
        }
    }

    /// Unbinds and drops every controller.
    pub fn clear(&mut self) {
        for (_, controller) in self.entries.iter_mut() {
            controller.unbind();
        }
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
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
    use std::cell::RefCell;
    use std::sync::Arc;

    #[derive(Debug)]
    struct Photo(String);

    impl ViewableItem for Photo {
        fn id(&self) -> ItemId {
            ItemId::new(self.0.clone())
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

    /// One section whose item ids can be swapped between requests.
    struct Album {
        ids: RefCell<Vec<String>>,
    }

    impl Album {
        fn new(count: usize) -> Self {
            Self {
                ids: RefCell::new((0..count).map(|i| format!("photo-{i}")).collect()),
            }
        }
    }

    impl DataSource for Album {
        fn item_count(&self, section: usize) -> usize {
            if section == 0 {
                self.ids.borrow().len()
            } else {
                0
            }
        }

        fn item(&self, address: IndexPath) -> Option<Arc<dyn ViewableItem>> {
            if address.section != 0 {
                return None;
            }
            let id = self.ids.borrow().get(address.row)?.clone();
            Some(Arc::new(Photo(id)))
        }
    }

    fn cache(capacity: usize) -> ItemCache {
        ItemCache::new(capacity, Platform::Touch.capabilities().into())
    }

    #[test]
    fn repeated_requests_return_the_same_controller() {
        let album = Album::new(3);
        let mut cache = cache(4);
        let address = IndexPath::new(0, 1);

        let first = cache.controller(address, &album).expect("controller");
        assert!(first.resolve.is_some());
        let first_ptr: *const ItemController = first.controller;

        let second = cache.controller(address, &album).expect("controller");
        assert!(second.resolve.is_none());
        let second_ptr: *const ItemController = second.controller;

        assert_eq!(first_ptr, second_ptr);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn out_of_range_address_has_no_controller() {
        let album = Album::new(2);
        let mut cache = cache(4);
        assert!(cache.controller(IndexPath::new(0, 2), &album).is_none());
        assert!(cache.controller(IndexPath::new(1, 0), &album).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn changed_item_at_address_rebinds() {
        let album = Album::new(2);
        let mut cache = cache(4);
        let address = IndexPath::new(0, 0);
        cache.controller(address, &album);

        album.ids.borrow_mut()[0] = "replacement".into();
        let retrieval = cache.controller(address, &album).expect("controller");

        let request = retrieval.resolve.expect("rebinding issues a request");
        assert_eq!(request.item_id, ItemId::new("replacement"));
        assert_eq!(cache.stats().rebinds, 1);
    }

    #[test]
    fn reset_controller_comes_back_as_placeholder() {
        let album = Album::new(1);
        let mut cache = cache(4);
        let address = IndexPath::new(0, 0);
        cache.controller(address, &album);

        assert!(cache.reset(address));
        assert_eq!(cache.get(address).map(ItemController::phase), Some(Phase::Unbound));

        let retrieval = cache.controller(address, &album).expect("controller");
        assert!(retrieval.resolve.is_some());
        assert_eq!(retrieval.controller.phase(), Phase::Placeholder);
    }

    #[test]
    fn least_recently_used_controller_is_evicted() {
        let album = Album::new(4);
        let mut cache = cache(3);
        for row in 0..3 {
            cache.controller(IndexPath::new(0, row), &album);
        }
        // Touch row 0 so row 1 becomes the oldest.
        cache.controller(IndexPath::new(0, 0), &album);
        cache.controller(IndexPath::new(0, 3), &album);

        assert_eq!(cache.len(), 3);
        assert!(cache.get(IndexPath::new(0, 1)).is_none());
        assert!(cache.get(IndexPath::new(0, 0)).is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        assert_eq!(cache(0).capacity(), 1);
    }

    #[test]
    fn clear_drops_everything() {
        let album = Album::new(2);
        let mut cache = cache(4);
        cache.controller(IndexPath::new(0, 0), &album);
        cache.controller(IndexPath::new(0, 1), &album);

        cache.clear();

        assert!(cache.is_empty());
        assert!(!cache.reset(IndexPath::new(0, 0)));
    }
}
