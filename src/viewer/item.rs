// SPDX-License-Identifier: MPL-2.0
//! Per-item display controller.
//!
//! A controller shows one item: the placeholder first, the resolved artwork
//! once its request completes, and a playback session for videos with a URL.
//! Controllers are reused across items; binding another item discards
//! everything tied to the previous one.
//!
//! ```text
//! Unbound -> Placeholder -> Resolved
//!    ^            |             |
//!    +--- WillDismiss <---------+
//! ```

use super::effect::ResolveRequest;
use super::zoom::ZoomScale;
use crate::domain::address::IndexPath;
use crate::domain::item::{Artwork, ItemId, MediaError, MediaKind, ViewableItem};
use crate::domain::platform::Capabilities;
use crate::domain::playback::PlaybackSession;
use iced::Vector;
use std::sync::Arc;

/// Lifecycle phase of an [`ItemController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Unbound,
    /// Bound, showing the item's placeholder while media resolves.
    Placeholder,
    /// Bound, showing resolved media.
    Resolved,
    /// Playback torn down; about to be unbound.
    WillDismiss,
}

/// Which gestures the controller forwards to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wiring {
    pub forwards_taps: bool,
    pub forwards_long_press: bool,
    pub dismiss_pan: bool,
}

impl From<Capabilities> for Wiring {
    fn from(caps: Capabilities) -> Self {
        Self {
            forwards_taps: caps.tap_toggles_chrome,
            forwards_long_press: caps.long_press,
            dismiss_pan: caps.interactive_dismiss,
        }
    }
}

/// Result of handing a resolved media result to a controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Applied,
    /// The controller was rebound or unbound since the request was issued.
    Stale,
    Failed(MediaError),
}

/// Displays a single item.
#[derive(Debug)]
pub struct ItemController {
    address: IndexPath,
    wiring: Wiring,
    phase: Phase,
    item: Option<Arc<dyn ViewableItem>>,
    artwork: Option<Artwork>,
    playback: Option<PlaybackSession>,
    zoom: ZoomScale,
    offset: Vector,
}

impl ItemController {
    #[must_use]
    pub fn new(address: IndexPath, wiring: Wiring) -> Self {
        Self {
            address,
            wiring,
            phase: Phase::Unbound,
            item: None,
            artwork: None,
            playback: None,
            zoom: ZoomScale::default(),
            offset: Vector::new(0.0, 0.0),
        }
    }

    /// Binds `item` and returns the request resolving its media.
    ///
    /// Any previous binding is discarded first: its playback is torn down and
    /// its pending result will be rejected as stale.
    pub fn bind(&mut self, item: Arc<dyn ViewableItem>) -> ResolveRequest {
        self.teardown_playback();

        let item_id = item.id();
        self.playback = match (item.kind(), item.url()) {
            (MediaKind::Video, Some(url)) => Some(PlaybackSession::new(url)),
            _ => None,
        };
        self.artwork = Some(item.placeholder());
        self.zoom = ZoomScale::default();
        self.offset = Vector::new(0.0, 0.0);
        self.phase = Phase::Placeholder;

        let future = item.resolve_media();
        self.item = Some(item);

        tracing::debug!(address = %self.address, item = %item_id, "bound item");

        ResolveRequest {
            address: self.address,
            item_id,
            future,
        }
    }

    /// Whether `item_id` differs from the bound item or nothing is bound.
    #[must_use]
    pub fn needs_binding(&self, item_id: &ItemId) -> bool {
        match self.phase {
            Phase::Unbound | Phase::WillDismiss => true,
            Phase::Placeholder | Phase::Resolved => self.item_id().as_ref() != Some(item_id),
        }
    }

    /// Applies a resolution result if it still belongs to the bound item.
    pub fn apply_resolution(
        &mut self,
        item_id: &ItemId,
        result: Result<Artwork, MediaError>,
    ) -> Resolution {
        if self.phase != Phase::Placeholder || self.item_id().as_ref() != Some(item_id) {
            tracing::debug!(address = %self.address, item = %item_id, "discarding stale media");
            return Resolution::Stale;
        }
        match result {
            Ok(artwork) => {
                self.artwork = Some(artwork);
                self.phase = Phase::Resolved;
                Resolution::Applied
            }
            // The placeholder stays on screen.
            Err(error) => Resolution::Failed(error),
        }
    }

    /// Tears down playback ahead of the overlay going away.
    pub fn will_dismiss(&mut self) {
        self.teardown_playback();
        if self.phase != Phase::Unbound {
            self.phase = Phase::WillDismiss;
        }
    }

    /// Drops the bound item and everything derived from it.
    pub fn unbind(&mut self) {
        self.will_dismiss();
        self.item = None;
        self.artwork = None;
        self.playback = None;
        self.zoom = ZoomScale::default();
        self.offset = Vector::new(0.0, 0.0);
        self.phase = Phase::Unbound;
    }

    /// Explicit invalidation; the next request for this address rebinds.
    pub fn reset(&mut self) {
        self.unbind();
    }

    #[must_use]
    pub fn address(&self) -> IndexPath {
        self.address
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn wiring(&self) -> Wiring {
        self.wiring
    }

    #[must_use]
    pub fn item_id(&self) -> Option<ItemId> {
        self.item.as_ref().map(|item| item.id())
    }

    #[must_use]
    pub fn kind(&self) -> Option<MediaKind> {
        self.item.as_ref().map(|item| item.kind())
    }

    #[must_use]
    pub fn artwork(&self) -> Option<&Artwork> {
        self.artwork.as_ref()
    }

    #[must_use]
    pub fn playback(&self) -> Option<&PlaybackSession> {
        self.playback.as_ref()
    }

    pub fn playback_mut(&mut self) -> Option<&mut PlaybackSession> {
        self.playback.as_mut()
    }

    /// Pauses playback when the item leaves the screen.
    pub fn pause_playback(&mut self) {
        if let Some(playback) = self.playback.as_mut() {
            playback.pause();
        }
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomScale {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: ZoomScale) {
        self.zoom = zoom;
    }

    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.zoom.is_zoomed()
    }

    /// Displacement of the display surface from its resting position.
    #[must_use]
    pub fn offset(&self) -> Vector {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Vector) {
        self.offset = offset;
    }

    fn teardown_playback(&mut self) {
        if let Some(playback) = self.playback.as_mut() {
            playback.teardown();
        }
    }
}
