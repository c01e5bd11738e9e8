// SPDX-License-Identifier: MPL-2.0
//! Animated transitions of the overlay.
//!
//! Opening and closing fly a snapshot of the item between the host cell and
//! the fitted frame while the background fades. Snap-back returns a dragged
//! item to rest. Page settles slide the paging surface after a swipe.

use super::effect::Direction;
use crate::animation::{Easing, FrameTween, Tween};
use crate::domain::address::IndexPath;
use crate::domain::item::Artwork;
use iced::Rectangle;
use std::time::{Duration, Instant};

/// A snapshot of an item drawn during opening and closing.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub artwork: Artwork,
    pub frame: Rectangle,
    pub alpha: f32,
}

/// Overlay transition in progress.
#[derive(Debug, Clone)]
pub enum Transition {
    Opening {
        address: IndexPath,
        artwork: Artwork,
        frame: FrameTween,
        background: Tween,
    },
    Closing {
        address: IndexPath,
        artwork: Artwork,
        frame: FrameTween,
        content: Tween,
        background: Tween,
    },
    SnapBack {
        address: IndexPath,
        offset: Tween,
        background: Tween,
    },
}

impl Transition {
    /// Flies `artwork` from the host cell at `from` to `to`, fading the
    /// background in.
    #[must_use]
    pub fn opening(
        address: IndexPath,
        artwork: Artwork,
        from: Rectangle,
        to: Rectangle,
        now: Instant,
        duration: Duration,
    ) -> Self {
        Transition::Opening {
            address,
            artwork,
            frame: FrameTween::new(from, to, now, duration).with_easing(Easing::EaseInOut),
            background: Tween::new(0.0, 1.0, now, duration),
        }
    }

    /// Flies `artwork` from `from` back to the host cell, or fades it in
    /// place when the cell is not on screen.
    #[must_use]
    pub fn closing(
        address: IndexPath,
        artwork: Artwork,
        from: Rectangle,
        to: Option<Rectangle>,
        background_from: f32,
        now: Instant,
        duration: Duration,
    ) -> Self {
        let (target, content_to) = match to {
            Some(frame) => (frame, 1.0),
            None => (from, 0.0),
        };
        Transition::Closing {
            address,
            artwork,
            frame: FrameTween::new(from, target, now, duration).with_easing(Easing::EaseInOut),
            content: Tween::new(1.0, content_to, now, duration),
            background: Tween::new(background_from, 0.0, now, duration),
        }
    }

    /// Returns a dragged item from `offset_y` to rest.
    #[must_use]
    pub fn snap_back(
        address: IndexPath,
        offset_y: f32,
        background_from: f32,
        now: Instant,
        duration: Duration,
    ) -> Self {
        Transition::SnapBack {
            address,
            offset: Tween::new(offset_y, 0.0, now, duration),
            background: Tween::new(background_from, 1.0, now, duration),
        }
    }

    #[must_use]
    pub fn address(&self) -> IndexPath {
        match self {
            Transition::Opening { address, .. }
            | Transition::Closing { address, .. }
            | Transition::SnapBack { address, .. } => *address,
        }
    }

    #[must_use]
    pub fn background_alpha(&self, now: Instant) -> f32 {
        match self {
            Transition::Opening { background, .. }
            | Transition::Closing { background, .. }
            | Transition::SnapBack { background, .. } => background.value_at(now),
        }
    }

    /// Vertical offset of the live item, for snap-back.
    #[must_use]
    pub fn offset_y(&self, now: Instant) -> Option<f32> {
        match self {
            Transition::SnapBack { offset, .. } => Some(offset.value_at(now)),
            _ => None,
        }
    }

    #[must_use]
    pub fn snapshot(&self, now: Instant) -> Option<Snapshot> {
        match self {
            Transition::Opening { artwork, frame, .. } => Some(Snapshot {
                artwork: artwork.clone(),
                frame: frame.value_at(now),
                alpha: 1.0,
            }),
            Transition::Closing {
                artwork,
                frame,
                content,
                ..
            } => Some(Snapshot {
                artwork: artwork.clone(),
                frame: frame.value_at(now),
                alpha: content.value_at(now),
            }),
            Transition::SnapBack { .. } => None,
        }
    }

    /// Current snapshot frame, or `None` for snap-back.
    #[must_use]
    pub fn snapshot_frame(&self, now: Instant) -> Option<Rectangle> {
        match self {
            Transition::Opening { frame, .. } | Transition::Closing { frame, .. } => {
                Some(frame.value_at(now))
            }
            Transition::SnapBack { .. } => None,
        }
    }

    /// Swaps in better artwork that resolved mid-flight.
    pub fn replace_artwork(&mut self, resolved: Artwork) {
        if let Transition::Opening { artwork, .. } | Transition::Closing { artwork, .. } = self {
            *artwork = resolved;
        }
    }

    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        match self {
            Transition::Opening {
                frame, background, ..
            } => frame.is_finished(now) && background.is_finished(now),
            Transition::Closing {
                frame,
                content,
                background,
                ..
            } => frame.is_finished(now) && content.is_finished(now) && background.is_finished(now),
            Transition::SnapBack {
                offset, background, ..
            } => offset.is_finished(now) && background.is_finished(now),
        }
    }
}

/// Horizontal swipe between pages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSwipe {
    /// Page the swipe is heading to, if it has a neighbour that way.
    pub direction: Option<Direction>,
    offset: f32,
    settle: Option<Settle>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Settle {
    tween: Tween,
    landing: Option<Direction>,
}

impl PageSwipe {
    #[must_use]
    pub fn new() -> Self {
        Self {
            direction: None,
            offset: 0.0,
            settle: None,
        }
    }

    /// Follows the pointer. Returns true when the heading direction changed.
    pub fn follow(&mut self, offset: f32) -> bool {
        self.offset = offset;
        let direction = if offset < 0.0 {
            Some(Direction::Next)
        } else if offset > 0.0 {
            Some(Direction::Previous)
        } else {
            None
        };
        let changed = direction.is_some() && direction != self.direction;
        if direction.is_some() {
            self.direction = direction;
        }
        changed
    }

    /// Slides to the page toward `landing`, or back to rest with `None`.
    pub fn settle(
        &mut self,
        landing: Option<Direction>,
        width: f32,
        now: Instant,
        duration: Duration,
    ) {
        let target = landing.map_or(0.0, |direction| direction.offset_sign() * width);
        self.settle = Some(Settle {
            tween: Tween::new(self.offset, target, now, duration),
            landing,
        });
    }

    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// Horizontal offset of the current page.
    #[must_use]
    pub fn offset(&self, now: Instant) -> f32 {
        self.settle
            .map_or(self.offset, |settle| settle.tween.value_at(now))
    }

    /// Landing direction once the settle animation has finished.
    #[must_use]
    pub fn landed(&self, now: Instant) -> Option<Option<Direction>> {
        self.settle
            .filter(|settle| settle.tween.is_finished(now))
            .map(|settle| settle.landing)
    }
}

impl Default for PageSwipe {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::widget::image::Handle;
    use iced::{Point, Size};

    const MS: Duration = Duration::from_millis(1);

    fn artwork() -> Artwork {
        Artwork::new(Handle::from_rgba(1, 1, vec![0; 4]), Size::new(4.0, 3.0))
    }

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rectangle {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn opening_flies_from_cell_to_fitted_frame() {
        let now = Instant::now();
        let cell = rect(10.0, 10.0, 40.0, 30.0);
        let fitted = rect(0.0, 100.0, 400.0, 300.0);
        let transition =
            Transition::opening(IndexPath::new(0, 0), artwork(), cell, fitted, now, MS * 250);

        assert_eq!(transition.snapshot_frame(now), Some(cell));
        assert_eq!(transition.background_alpha(now), 0.0);
        assert!(!transition.is_finished(now + MS * 100));
        assert!(transition.is_finished(now + MS * 250));
        assert_eq!(transition.snapshot_frame(now + MS * 250), Some(fitted));
        assert_eq!(transition.background_alpha(now + MS * 250), 1.0);
    }

    #[test]
    fn closing_starts_from_dragged_state() {
        let now = Instant::now();
        let from = rect(0.0, 160.0, 400.0, 300.0);
        let transition = Transition::closing(
            IndexPath::new(0, 0),
            artwork(),
            from,
            Some(rect(10.0, 10.0, 40.0, 30.0)),
            0.4,
            now,
            MS * 250,
        );

        assert_eq!(transition.background_alpha(now), 0.4);
        assert_eq!(transition.background_alpha(now + MS * 250), 0.0);
        let snapshot = transition.snapshot(now + MS * 250).expect("snapshot");
        assert_eq!(snapshot.alpha, 1.0);
    }

    #[test]
    fn closing_without_cell_fades_in_place() {
        let now = Instant::now();
        let from = rect(0.0, 100.0, 400.0, 300.0);
        let transition =
            Transition::closing(IndexPath::new(0, 0), artwork(), from, None, 1.0, now, MS * 200);

        let snapshot = transition.snapshot(now + MS * 200).expect("snapshot");
        assert_eq!(snapshot.frame, from);
        assert_eq!(snapshot.alpha, 0.0);
    }

    #[test]
    fn snap_back_returns_to_rest() {
        let now = Instant::now();
        let transition = Transition::snap_back(IndexPath::new(0, 0), 45.0, 0.7, now, MS * 200);

        assert_eq!(transition.offset_y(now), Some(45.0));
        assert_eq!(transition.offset_y(now + MS * 200), Some(0.0));
        assert_eq!(transition.background_alpha(now + MS * 200), 1.0);
        assert!(transition.snapshot(now).is_none());
    }

    #[test]
    fn swipe_tracks_direction_and_settles() {
        let now = Instant::now();
        let mut swipe = PageSwipe::new();

        assert!(swipe.follow(-30.0));
        assert_eq!(swipe.direction, Some(Direction::Next));
        assert!(!swipe.follow(-60.0));
        assert!(swipe.follow(20.0));
        assert_eq!(swipe.direction, Some(Direction::Previous));

        swipe.settle(Some(Direction::Previous), 300.0, now, MS * 100);
        assert!(swipe.is_settling());
        assert_eq!(swipe.offset(now), 20.0);
        assert_eq!(swipe.landed(now + MS * 50), None);
        assert_eq!(swipe.landed(now + MS * 100), Some(Some(Direction::Previous)));
        assert_eq!(swipe.offset(now + MS * 100), 300.0);
    }

    #[test]
    fn cancelled_swipe_settles_back_to_rest() {
        let now = Instant::now();
        let mut swipe = PageSwipe::new();
        swipe.follow(-40.0);
        swipe.settle(None, 300.0, now, MS * 100);
        assert_eq!(swipe.offset(now + MS * 100), 0.0);
        assert_eq!(swipe.landed(now + MS * 100), Some(None));
    }
}
