// SPDX-License-Identifier: MPL-2.0
//! Time-based interpolation used by viewer transitions.
//!
//! Tweens never read the clock themselves: callers pass the `Instant` to
//! evaluate at, which keeps transitions deterministic under test and lets the
//! host drive them from its frame subscription.

use iced::{Point, Rectangle, Size};
use std::time::{Duration, Instant};

/// Easing curve applied to linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Maps linear progress `t` in `0.0..=1.0` through the curve.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Scalar animation between two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    #[must_use]
    pub fn new(from: f32, to: f32, start: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing: Easing::default(),
        }
    }

    /// A tween that already sits at `value`.
    #[must_use]
    pub fn settled(value: f32, now: Instant) -> Self {
        Self::new(value, value, now, Duration::ZERO)
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Eased progress in `0.0..=1.0` at `now`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        self.easing
            .apply(elapsed.as_secs_f32() / self.duration.as_secs_f32())
    }

    #[must_use]
    pub fn value_at(&self, now: Instant) -> f32 {
        lerp(self.from, self.to, self.progress(now))
    }

    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    /// Redirects the animation toward `to`, starting from its value at `now`.
    pub fn retarget(&mut self, to: f32, now: Instant, duration: Duration) {
        *self = Self::new(self.value_at(now), to, now, duration).with_easing(self.easing);
    }
}

/// Animation of a rectangle's position and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTween {
    from: Rectangle,
    to: Rectangle,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl FrameTween {
    #[must_use]
    pub fn new(from: Rectangle, to: Rectangle, start: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing: Easing::default(),
        }
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn target(&self) -> Rectangle {
        self.to
    }

    #[must_use]
    pub fn value_at(&self, now: Instant) -> Rectangle {
        let t = Tween::new(0.0, 1.0, self.start, self.duration)
            .with_easing(self.easing)
            .value_at(now);
        Rectangle::new(
            Point::new(lerp(self.from.x, self.to.x, t), lerp(self.from.y, self.to.y, t)),
            Size::new(
                lerp(self.from.width, self.to.width, t),
                lerp(self.from.height, self.to.height, t),
            ),
        )
    }

    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn easing_endpoints_are_fixed() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn linear_tween_interpolates() {
        let start = Instant::now();
        let tween = Tween::new(0.0, 10.0, start, MS * 100).with_easing(Easing::Linear);

        assert_eq!(tween.value_at(start), 0.0);
        assert!((tween.value_at(start + MS * 50) - 5.0).abs() < 1e-4);
        assert_eq!(tween.value_at(start + MS * 500), 10.0);
        assert!(!tween.is_finished(start + MS * 99));
        assert!(tween.is_finished(start + MS * 100));
    }

    #[test]
    fn zero_duration_tween_is_immediately_finished() {
        let now = Instant::now();
        let tween = Tween::settled(0.4, now);
        assert!(tween.is_finished(now));
        assert_eq!(tween.value_at(now), 0.4);
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let start = Instant::now();
        let mut tween = Tween::new(0.0, 1.0, start, MS * 100).with_easing(Easing::Linear);
        let midway = start + MS * 50;

        tween.retarget(0.0, midway, MS * 100);

        assert!((tween.value_at(midway) - 0.5).abs() < 1e-4);
        assert_eq!(tween.target(), 0.0);
    }

    #[test]
    fn frame_tween_moves_and_resizes() {
        let start = Instant::now();
        let from = Rectangle::new(Point::new(10.0, 10.0), Size::new(20.0, 20.0));
        let to = Rectangle::new(Point::ORIGIN, Size::new(200.0, 100.0));
        let tween = FrameTween::new(from, to, start, MS * 10);

        assert_eq!(tween.value_at(start), from);
        assert_eq!(tween.value_at(start + MS * 10), to);
    }
}
