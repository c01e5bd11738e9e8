// SPDX-License-Identifier: MPL-2.0
//! Full-screen media viewer.
//!
//! [`Viewer`] coordinates one presentation at a time: it flies the tapped
//! thumbnail into a full-screen overlay, pages between items, handles drag-to-
//! dismiss and flies the item back into its cell on close.
//!
//! The viewer is driven entirely by the host. Every operation receives the
//! current time and borrows the host's collaborators through a [`Context`];
//! results come back as [`Effect`]s. Animation progress is sampled by calling
//! [`Viewer::tick`] from a frame subscription and drawing [`Viewer::scene`].
//!
//! # Sub-components
//!
//! - [`session`]: presentation state and the hidden host cell
//! - [`transition`]: open/close/snap-back/page-settle animations
//! - [`dismiss`]: drag-to-dismiss decision
//! - [`chrome`]: header/footer visibility
//! - [`gesture`]: pointer gesture recognition
//! - [`item`] and [`cache`]: per-item display controllers
//! - [`paging`]: continuous and discrete paging strategies

pub mod cache;
pub mod chrome;
pub mod dismiss;
pub mod effect;
pub mod gesture;
pub mod item;
pub mod paging;
pub mod session;
pub mod transition;
pub mod zoom;

pub use cache::{CacheStats, ItemCache};
pub use effect::{dispatch, Direction, Effect, ResolveRequest};
pub use transition::Snapshot;

use crate::config::{
    Config, PagingSettings, PresentationSettings, PAGE_EDGE_RESISTANCE, PAGE_FLING_VELOCITY,
    PAGE_SETTLE_DURATION_MS,
};
use crate::domain::address::IndexPath;
use crate::domain::item::{Artwork, ItemId, MediaError, MediaKind};
use crate::domain::platform::{Capabilities, Platform};
use crate::domain::playback::PlaybackState;
use crate::navigation::IndexPathMap;
use crate::port::{DataSource, HostCollection};
use gesture::{Axis, Gesture};
use item::{ItemController, Resolution};
use paging::Pager;
use session::Session;
use transition::{PageSwipe, Transition};
use zoom::ZoomScale;

use iced::{Point, Rectangle, Size, Vector};
use std::time::{Duration, Instant};

const PAGE_SETTLE_DURATION: Duration = Duration::from_millis(PAGE_SETTLE_DURATION_MS);

/// Everything the viewer reads from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerSettings {
    pub presentation: PresentationSettings,
    pub paging: PagingSettings,
    pub cache_capacity: usize,
    pub platform: Platform,
}

impl From<&Config> for ViewerSettings {
    fn from(config: &Config) -> Self {
        Self {
            presentation: config.presentation.resolve(),
            paging: config.paging.resolve(),
            cache_capacity: config.cache.resolved_capacity(),
            platform: config.platform.kind.unwrap_or_default(),
        }
    }
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Host collaborators borrowed for the duration of one viewer operation.
pub struct Context<'a> {
    pub source: &'a dyn DataSource,
    pub host: &'a mut dyn HostCollection,
    pub now: Instant,
}

impl<'a> Context<'a> {
    pub fn new(
        source: &'a dyn DataSource,
        host: &'a mut dyn HostCollection,
        now: Instant,
    ) -> Self {
        Self { source, host, now }
    }
}

/// A live item drawn on the paging surface.
#[derive(Debug, Clone)]
pub struct Layer {
    pub address: IndexPath,
    pub artwork: Artwork,
    pub frame: Rectangle,
    pub kind: MediaKind,
    /// Whether the full-resolution media replaced the placeholder.
    pub resolved: bool,
    pub playback: Option<PlaybackState>,
    pub progress: Option<f32>,
}

/// What to draw for the viewer at one instant.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Opacity of the black backdrop. Not clamped.
    pub background_alpha: f32,
    /// Opacity of header and footer. Not clamped.
    pub chrome_alpha: f32,
    pub focused: Option<IndexPath>,
    /// Item flying between its cell and full screen.
    pub snapshot: Option<Snapshot>,
    pub pages: Vec<Layer>,
}

impl Scene {
    /// True when nothing of the viewer is on screen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.focused.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pan {
    Dismiss,
    Swipe,
}

/// Full-screen viewer coordinator.
#[derive(Debug)]
pub struct Viewer {
    settings: ViewerSettings,
    capabilities: Capabilities,
    viewport: Size,
    session: Session,
    cache: ItemCache,
    pager: Option<Pager>,
    transition: Option<Transition>,
    dismiss: dismiss::State,
    swipe: Option<PageSwipe>,
    pan: Option<Pan>,
    status_bar_visible: bool,
}

impl Viewer {
    #[must_use]
    pub fn new(settings: ViewerSettings, viewport: Size) -> Self {
        let capabilities = settings.platform.capabilities();
        Self {
            settings,
            capabilities,
            viewport,
            session: Session::new(settings.presentation.chrome_fade),
            cache: ItemCache::new(settings.cache_capacity, capabilities.into()),
            pager: None,
            transition: None,
            dismiss: dismiss::State::new(&settings.presentation),
            swipe: None,
            pan: None,
            status_bar_visible: true,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// True from `present` until the close animation finished.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// True while the item is shown full screen and accepts input.
    #[must_use]
    pub fn is_presented(&self) -> bool {
        self.session.is_presented()
    }

    #[must_use]
    pub fn current(&self) -> Option<IndexPath> {
        self.session.current()
    }

    /// Host cell currently hidden behind the overlay.
    #[must_use]
    pub fn hidden_cell(&self) -> Option<IndexPath> {
        self.session.hidden_cell()
    }

    #[must_use]
    pub fn is_chrome_visible(&self) -> bool {
        self.session.chrome().is_visible()
    }

    #[must_use]
    pub fn is_status_bar_visible(&self) -> bool {
        self.status_bar_visible
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    #[must_use]
    pub fn pager(&self) -> Option<&Pager> {
        self.pager.as_ref()
    }

    #[must_use]
    pub fn cache(&self) -> &ItemCache {
        &self.cache
    }

    #[must_use]
    pub fn controller(&self, address: IndexPath) -> Option<&ItemController> {
        self.cache.get(address)
    }

    /// Invalidates the controller at `address` so its next use rebinds.
    pub fn reset_item(&mut self, address: IndexPath) -> bool {
        self.cache.reset(address)
    }

    /// Whether a frame subscription is needed to keep animations moving.
    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.transition.is_some()
            || self.swipe.is_some_and(|swipe| swipe.is_settling())
            || self.session.chrome().is_animating(now)
    }

    // ---------------------------------------------------------------------
    // Presentation
    // ---------------------------------------------------------------------

    /// Opens the viewer on `address`, flying in from its host cell.
    ///
    /// Ignored while a presentation is active, when the cell has no on-screen
    /// frame, or when the data source has no item at `address`.
    pub fn present(&mut self, address: IndexPath, ctx: &mut Context<'_>) -> Vec<Effect> {
        if self.session.is_active() {
            tracing::debug!(%address, "viewer already active, ignoring present");
            return Vec::new();
        }
        let Some(source_frame) = ctx.host.source_frame(address) else {
            tracing::debug!(%address, "source cell not on screen, ignoring present");
            return Vec::new();
        };
        let map = IndexPathMap::from_source(ctx.source);
        let Some(pager) = Pager::new(self.settings.paging.strategy, map, address) else {
            tracing::warn!(%address, "address outside the data source, ignoring present");
            return Vec::new();
        };
        let Some(retrieval) = self.cache.controller(address, ctx.source) else {
            return Vec::new();
        };

        let mut effects: Vec<Effect> = retrieval
            .resolve
            .into_iter()
            .map(Effect::ResolveMedia)
            .collect();

        let controller = retrieval.controller;
        controller.set_offset(Vector::new(0.0, 0.0));
        controller.set_zoom(ZoomScale::default());
        let Some(artwork) = controller.artwork().cloned() else {
            return effects;
        };

        let fitted = artwork.fitted_frame(self.viewport);
        self.session.begin(address, ctx.host);
        self.pager = Some(pager);
        self.transition = Some(Transition::opening(
            address,
            artwork,
            source_frame,
            fitted,
            ctx.now,
            self.settings.presentation.open_duration,
        ));
        self.session
            .chrome_mut()
            .handle(chrome::Message::Show(ctx.now));

        tracing::info!(%address, "presenting viewer");
        effects.extend(self.sync_status_bar());
        effects
    }

    /// Closes the viewer, flying the item back into its host cell.
    ///
    /// Starts from whatever is on screen: a half-finished opening, a drag in
    /// progress or a snap-back all continue from their current state.
    pub fn dismiss(&mut self, ctx: &mut Context<'_>) -> Vec<Effect> {
        let Some(address) = self.session.current() else {
            return Vec::new();
        };
        let now = ctx.now;

        let (artwork, from, background_from) = match self.transition.take() {
            Some(closing @ Transition::Closing { .. }) => {
                self.transition = Some(closing);
                return Vec::new();
            }
            Some(opening @ Transition::Opening { .. }) => {
                let Some(snapshot) = opening.snapshot(now) else {
                    return Vec::new();
                };
                (snapshot.artwork, snapshot.frame, opening.background_alpha(now))
            }
            Some(snap_back @ Transition::SnapBack { .. }) => {
                let offset = Vector::new(0.0, snap_back.offset_y(now).unwrap_or(0.0));
                let Some((artwork, frame)) = self.live_snapshot(address, offset) else {
                    return Vec::new();
                };
                (artwork, frame, snap_back.background_alpha(now))
            }
            None => {
                let background = self.dismiss.current_alpha().unwrap_or(1.0);
                let offset = Vector::new(
                    self.swipe.map_or(0.0, |swipe| swipe.offset(now)),
                    self.cache.get(address).map_or(0.0, |c| c.offset().y),
                );
                let Some((artwork, frame)) = self.live_snapshot(address, offset) else {
                    return Vec::new();
                };
                (artwork, frame, background)
            }
        };

        self.close(address, artwork, from, background_from, ctx)
    }

    /// Tears the viewer down without animation, e.g. when the data source is
    /// reloaded underneath it.
    pub fn abort(&mut self, ctx: &mut Context<'_>) -> Vec<Effect> {
        if !self.session.is_active() {
            return Vec::new();
        }
        for address in self.visible_addresses() {
            if let Some(controller) = self.cache.get_mut(address) {
                controller.will_dismiss();
            }
        }
        self.transition = None;
        self.finish_closing(ctx)
    }

    /// Advances animations to `ctx.now`, finishing those that completed.
    pub fn tick(&mut self, ctx: &mut Context<'_>) -> Vec<Effect> {
        let now = ctx.now;
        let mut effects = Vec::new();

        if self
            .transition
            .as_ref()
            .is_some_and(|transition| transition.is_finished(now))
        {
            match self.transition.take() {
                Some(Transition::Opening { address, .. }) => {
                    effects.extend(self.finish_opening(address, ctx));
                }
                Some(Transition::Closing { .. }) => {
                    effects.extend(self.finish_closing(ctx));
                }
                Some(Transition::SnapBack { address, .. }) => {
                    tracing::trace!(%address, "snap-back finished");
                }
                None => {}
            }
        }

        if let Some(landing) = self.swipe.and_then(|swipe| swipe.landed(now)) {
            self.swipe = None;
            effects.extend(self.finish_swipe(landing, ctx));
        }

        effects.extend(self.sync_status_bar());
        effects
    }

    fn finish_opening(&mut self, address: IndexPath, ctx: &mut Context<'_>) -> Vec<Effect> {
        self.session.mark_presented();
        let focused = self.session.current().unwrap_or(address);
        let mut effects = vec![Effect::FocusChanged(focused)];
        if let Some(pager) = self.pager.as_mut() {
            effects.extend(pager.load(&mut self.cache, ctx.source));
        }
        tracing::debug!(%focused, "viewer presented");
        effects
    }

    fn close(
        &mut self,
        address: IndexPath,
        artwork: Artwork,
        from: Rectangle,
        background_from: f32,
        ctx: &mut Context<'_>,
    ) -> Vec<Effect> {
        let now = ctx.now;
        let target = ctx.host.source_frame(address);
        if target.is_none() {
            tracing::debug!(%address, "source cell not on screen, fading out in place");
        }

        for visible in self.visible_addresses() {
            if let Some(controller) = self.cache.get_mut(visible) {
                controller.will_dismiss();
            }
        }

        self.dismiss.handle(dismiss::Message::Cancelled);
        self.pan = None;
        self.swipe = None;
        self.session.mark_closing();
        self.session.chrome_mut().handle(chrome::Message::Hide(now));
        self.transition = Some(Transition::closing(
            address,
            artwork,
            from,
            target,
            background_from,
            now,
            self.settings.presentation.close_duration,
        ));

        tracing::info!(%address, "dismissing viewer");
        self.sync_status_bar().into_iter().collect()
    }

    fn finish_closing(&mut self, ctx: &mut Context<'_>) -> Vec<Effect> {
        for address in self.visible_addresses() {
            if let Some(controller) = self.cache.get_mut(address) {
                controller.unbind();
            }
        }
        self.session.finish(ctx.host);
        self.dismiss.handle(dismiss::Message::Cancelled);
        self.pager = None;
        self.swipe = None;
        self.pan = None;

        tracing::debug!("viewer dismissed");
        let mut effects = vec![Effect::Dismissed];
        effects.extend(self.sync_status_bar());
        effects
    }

    // ---------------------------------------------------------------------
    // Pointer input
    // ---------------------------------------------------------------------

    /// Routes a recognized gesture to the matching operation.
    pub fn gesture(&mut self, gesture: Gesture, ctx: &mut Context<'_>) -> Vec<Effect> {
        match gesture {
            Gesture::Tap(_) => self.tap(ctx.now),
            Gesture::DoubleTap(_) => {
                self.double_tap();
                Vec::new()
            }
            Gesture::LongPress(_) => self.long_press(),
            Gesture::PanBegan { velocity, .. } => self.pan_began(velocity, ctx),
            Gesture::PanMoved { translation, .. } => self.pan_moved(translation),
            Gesture::PanEnded {
                translation,
                velocity,
                ..
            } => self.pan_ended(translation, velocity, ctx),
            Gesture::PanCancelled { .. } => self.pan_cancelled(ctx),
        }
    }

    /// A pan started. Vertical pans drag toward dismissal, horizontal pans
    /// swipe between pages; the axis is whichever velocity component is larger.
    pub fn pan_began(&mut self, velocity: Vector, ctx: &mut Context<'_>) -> Vec<Effect> {
        if self.pan.is_some() || !self.session.is_presented() {
            return Vec::new();
        }
        let Some(address) = self.session.current() else {
            return Vec::new();
        };
        match Axis::of(velocity) {
            Axis::Vertical => self.begin_dismiss_drag(address, ctx.now),
            Axis::Horizontal => {
                self.begin_swipe(address);
                Vec::new()
            }
        }
    }

    fn begin_dismiss_drag(&mut self, address: IndexPath, now: Instant) -> Vec<Effect> {
        if !self.capabilities.interactive_dismiss || self.swipe.is_some() {
            return Vec::new();
        }
        let Some(controller) = self.cache.get(address) else {
            return Vec::new();
        };
        if controller.is_zoomed() || !controller.wiring().dismiss_pan {
            return Vec::new();
        }

        // A snap-back in flight is picked up where it is.
        let offset_y = match &self.transition {
            None => controller.offset().y,
            Some(snap_back @ Transition::SnapBack { .. }) => snap_back.offset_y(now).unwrap_or(0.0),
            Some(_) => return Vec::new(),
        };
        self.transition = None;

        let center_y = self.viewport.height / 2.0 + offset_y;
        let effect = self.dismiss.handle(dismiss::Message::Began {
            center_y,
            viewport_height: self.viewport.height,
        });
        self.session
            .start_drag(Point::new(self.viewport.width / 2.0, center_y));
        self.pan = Some(Pan::Dismiss);
        self.apply_drag(address, effect);

        self.sync_status_bar().into_iter().collect()
    }

    fn begin_swipe(&mut self, address: IndexPath) {
        if !self.capabilities.swipe_paging || self.transition.is_some() || self.swipe.is_some() {
            return;
        }
        if self.cache.get(address).is_some_and(ItemController::is_zoomed) {
            return;
        }
        self.swipe = Some(PageSwipe::new());
        self.pan = Some(Pan::Swipe);
    }

    /// The pointer moved `translation` since the pan began.
    pub fn pan_moved(&mut self, translation: Vector) -> Vec<Effect> {
        match self.pan {
            Some(Pan::Dismiss) => {
                let effect = self.dismiss.handle(dismiss::Message::Moved(translation.y));
                if let Some(address) = self.session.current() {
                    self.apply_drag(address, effect);
                }
                Vec::new()
            }
            Some(Pan::Swipe) => {
                let offset = self.resisted_offset(translation.x);
                let (Some(swipe), Some(pager)) = (self.swipe.as_mut(), self.pager.as_mut()) else {
                    return Vec::new();
                };
                if swipe.follow(offset) {
                    if let Some(direction) = swipe.direction {
                        return pager.begin(direction);
                    }
                }
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    /// The pointer was released after travelling `translation`.
    pub fn pan_ended(
        &mut self,
        translation: Vector,
        velocity: Vector,
        ctx: &mut Context<'_>,
    ) -> Vec<Effect> {
        match self.pan.take() {
            Some(Pan::Dismiss) => {
                let effect = self.dismiss.handle(dismiss::Message::Ended);
                self.end_dismiss_drag(effect, ctx)
            }
            Some(Pan::Swipe) => {
                let offset = self.resisted_offset(translation.x);
                self.end_swipe(offset, velocity.x, ctx.now);
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    /// The pan was interrupted; nothing is committed.
    pub fn pan_cancelled(&mut self, ctx: &mut Context<'_>) -> Vec<Effect> {
        match self.pan.take() {
            Some(Pan::Dismiss) => {
                let background_alpha = self.dismiss.current_alpha().unwrap_or(1.0);
                let offset_y = self
                    .session
                    .current()
                    .and_then(|address| self.cache.get(address))
                    .map_or(0.0, |controller| controller.offset().y);
                self.dismiss.handle(dismiss::Message::Cancelled);
                self.end_dismiss_drag(
                    dismiss::Effect::SnapBack {
                        offset_y,
                        background_alpha,
                    },
                    ctx,
                )
            }
            Some(Pan::Swipe) => {
                if let Some(swipe) = self.swipe.as_mut() {
                    swipe.settle(None, self.viewport.width, ctx.now, PAGE_SETTLE_DURATION);
                }
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn end_dismiss_drag(&mut self, effect: dismiss::Effect, ctx: &mut Context<'_>) -> Vec<Effect> {
        let now = ctx.now;
        self.session.end_drag();
        let Some(address) = self.session.current() else {
            return Vec::new();
        };

        let mut effects = Vec::new();
        match effect {
            dismiss::Effect::Dismiss {
                offset_y,
                background_alpha,
            } => {
                tracing::debug!(%address, offset_y, "drag released past margin");
                if let Some((artwork, frame)) =
                    self.live_snapshot(address, Vector::new(0.0, offset_y))
                {
                    effects.extend(self.close(address, artwork, frame, background_alpha, ctx));
                }
            }
            dismiss::Effect::SnapBack {
                offset_y,
                background_alpha,
            } => {
                if let Some(controller) = self.cache.get_mut(address) {
                    controller.set_offset(Vector::new(0.0, 0.0));
                }
                self.transition = Some(Transition::snap_back(
                    address,
                    offset_y,
                    background_alpha,
                    now,
                    self.settings.presentation.snap_back_duration,
                ));
                self.session
                    .chrome_mut()
                    .handle(chrome::Message::DragReleased(now));
            }
            dismiss::Effect::Follow { .. } | dismiss::Effect::None => {}
        }

        effects.extend(self.sync_status_bar());
        effects
    }

    fn apply_drag(&mut self, address: IndexPath, effect: dismiss::Effect) {
        if let dismiss::Effect::Follow {
            offset_y,
            background_alpha,
        } = effect
        {
            if let Some(controller) = self.cache.get_mut(address) {
                controller.set_offset(Vector::new(0.0, offset_y));
            }
            self.session
                .chrome_mut()
                .handle(chrome::Message::FollowDrag(background_alpha));
        }
    }

    fn resisted_offset(&self, dx: f32) -> f32 {
        let heading = if dx < 0.0 {
            Direction::Next
        } else {
            Direction::Previous
        };
        let has_neighbour = self
            .pager
            .as_ref()
            .is_some_and(|pager| pager.neighbour(heading).is_some());
        if has_neighbour {
            dx
        } else {
            dx * PAGE_EDGE_RESISTANCE
        }
    }

    fn end_swipe(&mut self, offset: f32, velocity_x: f32, now: Instant) {
        let width = self.viewport.width;
        let commit_distance = width * self.settings.paging.commit_fraction;
        let Some(swipe) = self.swipe.as_mut() else {
            return;
        };
        swipe.follow(offset);

        let landing = swipe.direction.filter(|direction| {
            let has_neighbour = self
                .pager
                .as_ref()
                .is_some_and(|pager| pager.neighbour(*direction).is_some());
            let sign = direction.offset_sign();
            has_neighbour
                && (offset * sign > commit_distance || velocity_x * sign > PAGE_FLING_VELOCITY)
        });

        swipe.settle(landing, width, now, PAGE_SETTLE_DURATION);
    }

    fn finish_swipe(&mut self, landing: Option<Direction>, ctx: &mut Context<'_>) -> Vec<Effect> {
        let Some(pager) = self.pager.as_mut() else {
            return Vec::new();
        };
        let effects = pager.finish(landing, &mut self.cache, ctx.source);
        let current = pager.current();
        self.follow_focus(current, ctx);
        effects
    }

    fn follow_focus(&mut self, current: IndexPath, ctx: &mut Context<'_>) {
        if self.session.current() != Some(current) {
            tracing::debug!(%current, "focus moved");
            self.session.set_current(current, ctx.host);
        }
    }

    /// A tap on the item. Toggles header, footer and status bar together.
    pub fn tap(&mut self, now: Instant) -> Vec<Effect> {
        if !self.capabilities.tap_toggles_chrome {
            return Vec::new();
        }
        self.toggle_chrome(now)
    }

    /// Double tap zooms the focused item in, or back to fit.
    pub fn double_tap(&mut self) -> bool {
        if !self.capabilities.tap_toggles_chrome {
            return false;
        }
        self.update_zoom(ZoomScale::toggled)
    }

    /// Scales the focused item's zoom, e.g. from wheel input.
    pub fn zoom_by(&mut self, factor: f32) -> bool {
        self.update_zoom(|zoom| zoom.scaled_by(factor))
    }

    fn update_zoom(&mut self, f: impl FnOnce(ZoomScale) -> ZoomScale) -> bool {
        if !self.session.is_presented() || self.pan.is_some() || self.swipe.is_some() {
            return false;
        }
        let Some(controller) = self
            .session
            .current()
            .and_then(|address| self.cache.get_mut(address))
        else {
            return false;
        };
        let zoom = f(controller.zoom());
        let changed = zoom != controller.zoom();
        controller.set_zoom(zoom);
        changed
    }

    /// A stationary press held long enough.
    pub fn long_press(&mut self) -> Vec<Effect> {
        if !self.capabilities.long_press || !self.session.is_presented() || self.pan.is_some() {
            return Vec::new();
        }
        let Some(address) = self.session.current() else {
            return Vec::new();
        };
        if !self
            .cache
            .get(address)
            .is_some_and(|controller| controller.wiring().forwards_long_press)
        {
            return Vec::new();
        }
        vec![Effect::LongPressed(address)]
    }

    // ---------------------------------------------------------------------
    // Remote input
    // ---------------------------------------------------------------------

    /// Left/right button: slides to the neighbouring page.
    pub fn directional(&mut self, direction: Direction, ctx: &mut Context<'_>) -> Vec<Effect> {
        if !self.capabilities.directional_input
            || !self.session.is_presented()
            || self.transition.is_some()
            || self.swipe.is_some()
        {
            return Vec::new();
        }
        let Some(pager) = self.pager.as_mut() else {
            return Vec::new();
        };
        if pager.neighbour(direction).is_none() {
            return Vec::new();
        }

        let effects = pager.begin(direction);
        let mut swipe = PageSwipe::new();
        swipe.settle(
            Some(direction),
            self.viewport.width,
            ctx.now,
            PAGE_SETTLE_DURATION,
        );
        self.swipe = Some(swipe);
        effects
    }

    /// Select button: toggles chrome.
    pub fn select(&mut self, now: Instant) -> Vec<Effect> {
        if !self.capabilities.directional_input {
            return Vec::new();
        }
        self.toggle_chrome(now)
    }

    /// Menu button: dismisses.
    pub fn menu(&mut self, ctx: &mut Context<'_>) -> Vec<Effect> {
        if !self.capabilities.menu_dismisses || !self.session.is_presented() {
            return Vec::new();
        }
        self.dismiss(ctx)
    }

    fn toggle_chrome(&mut self, now: Instant) -> Vec<Effect> {
        if !self.session.is_presented() || self.session.is_dragging() || self.pan.is_some() {
            return Vec::new();
        }
        self.session
            .chrome_mut()
            .handle(chrome::Message::Toggle(now));
        self.sync_status_bar().into_iter().collect()
    }

    // ---------------------------------------------------------------------
    // Host-driven paging
    // ---------------------------------------------------------------------

    /// A host-owned continuous scroll surface stopped at `offset`.
    ///
    /// Ignored until the opening animation has finished.
    pub fn scroll_settled(&mut self, offset: f32, ctx: &mut Context<'_>) -> Vec<Effect> {
        if !self.session.is_presented() {
            return Vec::new();
        }
        let width = self.viewport.width;
        let Some(pager) = self.pager.as_mut() else {
            return Vec::new();
        };
        let effects = pager.settle(offset, width, &mut self.cache, ctx.source);
        let current = pager.current();
        self.follow_focus(current, ctx);
        effects
    }

    /// A host-owned page container is about to show `pending`.
    pub fn will_transition_to(&mut self, pending: &[IndexPath]) -> Vec<Effect> {
        if !self.session.is_presented() {
            return Vec::new();
        }
        match self.pager.as_mut() {
            Some(pager) => pager.will_transition_to(pending),
            None => Vec::new(),
        }
    }

    /// A host-owned page container finished a transition on `landed`.
    pub fn did_finish_transition(
        &mut self,
        completed: bool,
        landed: IndexPath,
        ctx: &mut Context<'_>,
    ) -> Vec<Effect> {
        if !self.session.is_presented() {
            return Vec::new();
        }
        let Some(pager) = self.pager.as_mut() else {
            return Vec::new();
        };
        let effects = pager.did_finish(completed, landed, &mut self.cache, ctx.source);
        let current = pager.current();
        self.follow_focus(current, ctx);
        effects
    }

    // ---------------------------------------------------------------------
    // Media and playback
    // ---------------------------------------------------------------------

    /// Hands back the result of a [`ResolveRequest`].
    pub fn media_resolved(
        &mut self,
        address: IndexPath,
        item_id: &ItemId,
        result: Result<Artwork, MediaError>,
    ) -> Vec<Effect> {
        let Some(controller) = self.cache.get_mut(address) else {
            tracing::debug!(%address, "controller evicted before its media resolved");
            return Vec::new();
        };
        match controller.apply_resolution(item_id, result) {
            Resolution::Applied => {
                let artwork = controller.artwork().cloned();
                if let (Some(transition), Some(artwork)) = (self.transition.as_mut(), artwork) {
                    if transition.address() == address {
                        transition.replace_artwork(artwork);
                    }
                }
                Vec::new()
            }
            Resolution::Stale => Vec::new(),
            Resolution::Failed(error) => {
                tracing::warn!(%address, %error, "failed to display media");
                vec![Effect::FailedDisplaying { address, error }]
            }
        }
    }

    /// Plays or pauses the focused video. Returns the new state.
    pub fn toggle_playback(&mut self) -> Option<PlaybackState> {
        let playback = self.current_controller_mut()?.playback_mut()?;
        playback.toggle();
        Some(playback.state())
    }

    /// Seeks the focused video to `fraction` of its duration.
    pub fn seek(&mut self, fraction: f32) -> bool {
        match self
            .current_controller_mut()
            .and_then(ItemController::playback_mut)
        {
            Some(playback) => {
                playback.seek(fraction);
                true
            }
            None => false,
        }
    }

    fn current_controller_mut(&mut self) -> Option<&mut ItemController> {
        if !self.session.is_presented() {
            return None;
        }
        let address = self.session.current()?;
        self.cache.get_mut(address)
    }

    // ---------------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------------

    /// What to draw at `now`.
    #[must_use]
    pub fn scene(&self, now: Instant) -> Scene {
        let Some(focused) = self.session.current() else {
            return Scene::default();
        };

        let background_alpha = match &self.transition {
            Some(transition) => transition.background_alpha(now),
            None => self.dismiss.current_alpha().unwrap_or(1.0),
        };
        let snapshot = self
            .transition
            .as_ref()
            .and_then(|transition| transition.snapshot(now));
        let pages = if snapshot.is_some() {
            Vec::new()
        } else {
            self.page_layers(focused, now)
        };

        Scene {
            background_alpha,
            chrome_alpha: self.session.chrome().alpha(now),
            focused: Some(focused),
            snapshot,
            pages,
        }
    }

    fn page_layers(&self, focused: IndexPath, now: Instant) -> Vec<Layer> {
        let Some(pager) = self.pager.as_ref() else {
            return Vec::new();
        };
        let width = self.viewport.width;
        let swipe_offset = self.swipe.map_or(0.0, |swipe| swipe.offset(now));

        let slots = [
            (pager.neighbour(Direction::Previous), -1.0),
            (Some(focused), 0.0),
            (pager.neighbour(Direction::Next), 1.0),
        ];

        let mut layers = Vec::new();
        for (address, slot) in slots {
            let Some(address) = address else {
                continue;
            };
            let Some(controller) = self.cache.get(address) else {
                continue;
            };
            let Some(artwork) = controller.artwork() else {
                continue;
            };

            let offset_y = if address == focused {
                self.transition
                    .as_ref()
                    .and_then(|transition| transition.offset_y(now))
                    .unwrap_or(controller.offset().y)
            } else {
                0.0
            };
            let frame = self.item_frame(
                artwork,
                controller.zoom(),
                Vector::new(slot * width + swipe_offset, offset_y),
            );
            if frame.x + frame.width <= 0.0 || frame.x >= width {
                continue;
            }

            layers.push(Layer {
                address,
                artwork: artwork.clone(),
                frame,
                kind: controller.kind().unwrap_or_default(),
                resolved: controller.phase() == item::Phase::Resolved,
                playback: controller.playback().map(|playback| playback.state()),
                progress: controller.playback().and_then(|playback| playback.progress()),
            });
        }
        layers
    }

    fn item_frame(&self, artwork: &Artwork, zoom: ZoomScale, offset: Vector) -> Rectangle {
        let fitted = artwork.fitted_frame(self.viewport);
        let size = Size::new(fitted.width * zoom.value(), fitted.height * zoom.value());
        let center = fitted.center() + offset;
        Rectangle::new(
            Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        )
    }

    fn live_snapshot(&self, address: IndexPath, offset: Vector) -> Option<(Artwork, Rectangle)> {
        let controller = self.cache.get(address)?;
        let artwork = controller.artwork()?.clone();
        let frame = self.item_frame(&artwork, controller.zoom(), offset);
        Some((artwork, frame))
    }

    fn visible_addresses(&self) -> Vec<IndexPath> {
        let mut addresses: Vec<IndexPath> = self.session.current().into_iter().collect();
        if let Some(pager) = self.pager.as_ref() {
            addresses.extend(pager.neighbour(Direction::Previous));
            addresses.extend(pager.neighbour(Direction::Next));
        }
        addresses
    }

    fn sync_status_bar(&mut self) -> Option<Effect> {
        let closing = matches!(self.transition, Some(Transition::Closing { .. }));
        let visible = !self.session.is_active()
            || closing
            || (self.session.chrome().is_visible() && !self.session.is_dragging());
        if visible == self.status_bar_visible {
            return None;
        }
        self.status_bar_visible = visible;
        Some(Effect::StatusBarVisibility(visible))
    }
}
