// SPDX-License-Identifier: MPL-2.0
//! Pointer gesture recognition for the viewer surface.
//!
//! Raw press/move/release samples become taps, double taps, long presses and
//! pans. A pan's axis is decided once, when the pointer leaves the slop
//! radius, by comparing vertical and horizontal velocity: vertical pans go to
//! drag-to-dismiss, horizontal ones to paging.

use crate::config::{DOUBLE_TAP_MS, LONG_PRESS_MS, PAN_SLOP};
use iced::{Point, Vector};
use std::time::{Duration, Instant};

const DOUBLE_TAP_THRESHOLD: Duration = Duration::from_millis(DOUBLE_TAP_MS);
const LONG_PRESS_THRESHOLD: Duration = Duration::from_millis(LONG_PRESS_MS);

/// Axis a pan is locked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Vertical only when vertical speed strictly exceeds horizontal speed.
    #[must_use]
    pub fn of(velocity: Vector) -> Self {
        if velocity.y.abs() > velocity.x.abs() {
            Axis::Vertical
        } else {
            Axis::Horizontal
        }
    }
}

/// A recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Tap(Point),
    DoubleTap(Point),
    LongPress(Point),
    PanBegan { axis: Axis, velocity: Vector },
    PanMoved { axis: Axis, translation: Vector },
    PanEnded {
        axis: Axis,
        translation: Vector,
        velocity: Vector,
    },
    /// The system took the pointer away mid-pan; nothing may be committed.
    PanCancelled { axis: Axis },
}

#[derive(Debug, Clone, Copy)]
struct Press {
    origin: Point,
    started: Instant,
    last_position: Point,
    last_sample: Instant,
    velocity: Vector,
    axis: Option<Axis>,
    long_pressed: bool,
}

/// Turns pointer samples into [`Gesture`]s.
#[derive(Debug, Clone, Default)]
pub struct Recognizer {
    press: Option<Press>,
    last_tap: Option<Instant>,
}

impl Recognizer {
    pub fn press(&mut self, position: Point, now: Instant) {
        self.press = Some(Press {
            origin: position,
            started: now,
            last_position: position,
            last_sample: now,
            velocity: Vector::new(0.0, 0.0),
            axis: None,
            long_pressed: false,
        });
    }

    pub fn moved(&mut self, position: Point, now: Instant) -> Option<Gesture> {
        let press = self.press.as_mut()?;

        let dt = now.saturating_duration_since(press.last_sample).as_secs_f32();
        if dt > 0.0 {
            press.velocity = (position - press.last_position) * (1.0 / dt);
        }
        press.last_position = position;
        press.last_sample = now;

        let translation = position - press.origin;

        if let Some(axis) = press.axis {
            return Some(Gesture::PanMoved { axis, translation });
        }

        if press.long_pressed || distance(translation) <= PAN_SLOP {
            return None;
        }

        let elapsed = now.saturating_duration_since(press.started).as_secs_f32();
        let velocity = if elapsed > 0.0 {
            translation * (1.0 / elapsed)
        } else {
            translation
        };
        let axis = Axis::of(velocity);
        press.axis = Some(axis);
        Some(Gesture::PanBegan { axis, velocity })
    }

    pub fn release(&mut self, position: Point, now: Instant) -> Option<Gesture> {
        let press = self.press.take()?;

        if let Some(axis) = press.axis {
            return Some(Gesture::PanEnded {
                axis,
                translation: position - press.origin,
                velocity: press.velocity,
            });
        }

        if press.long_pressed {
            return None;
        }

        if now.saturating_duration_since(press.started) >= LONG_PRESS_THRESHOLD {
            return Some(Gesture::LongPress(position));
        }

        let is_double = self
            .last_tap
            .is_some_and(|t| now.saturating_duration_since(t) < DOUBLE_TAP_THRESHOLD);

        if is_double {
            // Reset to avoid triple-tap
            self.last_tap = None;
            Some(Gesture::DoubleTap(position))
        } else {
            self.last_tap = Some(now);
            Some(Gesture::Tap(position))
        }
    }

    /// Fires a long press for a stationary press held past the threshold.
    pub fn tick(&mut self, now: Instant) -> Option<Gesture> {
        let press = self.press.as_mut()?;
        if press.axis.is_some()
            || press.long_pressed
            || now.saturating_duration_since(press.started) < LONG_PRESS_THRESHOLD
        {
            return None;
        }
        press.long_pressed = true;
        Some(Gesture::LongPress(press.last_position))
    }

    /// Abandons the current press, e.g. when the pointer leaves the surface.
    pub fn cancel(&mut self) -> Option<Gesture> {
        let press = self.press.take()?;
        press.axis.map(|axis| Gesture::PanCancelled { axis })
    }

    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.press.is_some_and(|p| p.axis.is_some())
    }
}

fn distance(v: Vector) -> f32 {
    (v.x * v.x + v.y * v.y).sqrt()
}
