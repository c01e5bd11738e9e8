// SPDX-License-Identifier: MPL-2.0
//! Header/footer visibility sub-component.
//!
//! Chrome fades in and out on toggles and follows the background while the
//! item is dragged toward dismissal.

use crate::animation::Tween;
use std::time::{Duration, Instant};

/// Chrome visibility state.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    visible: bool,
    fade: Option<Tween>,
    fade_duration: Duration,
    drag_factor: Option<f32>,
}

/// Messages for the chrome sub-component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    Show(Instant),
    Hide(Instant),
    Toggle(Instant),
    /// Scale chrome opacity while a dismiss drag is in progress.
    FollowDrag(f32),
    /// The dismiss drag ended; fade back from wherever the drag left off.
    DragReleased(Instant),
    /// The overlay went away; chrome is hidden without animation.
    Reset,
}

/// Effects produced by chrome changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    VisibilityChanged(bool),
}

impl State {
    #[must_use]
    pub fn new(fade_duration: Duration) -> Self {
        Self {
            visible: false,
            fade: None,
            fade_duration,
            drag_factor: None,
        }
    }

    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Show(now) => self.set_visible(true, now),
            Message::Hide(now) => self.set_visible(false, now),
            Message::Toggle(now) => self.set_visible(!self.visible, now),
            Message::FollowDrag(factor) => {
                self.drag_factor = Some(factor);
                Effect::None
            }
            Message::DragReleased(now) => {
                if self.drag_factor.is_some() {
                    let from = self.alpha(now);
                    self.drag_factor = None;
                    self.fade = Some(Tween::new(from, self.target(), now, self.fade_duration));
                }
                Effect::None
            }
            Message::Reset => {
                self.fade = None;
                self.drag_factor = None;
                if self.visible {
                    self.visible = false;
                    Effect::VisibilityChanged(false)
                } else {
                    Effect::None
                }
            }
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current opacity. May leave `0.0..=1.0` while following a drag.
    #[must_use]
    pub fn alpha(&self, now: Instant) -> f32 {
        let base = self
            .fade
            .map_or(self.target(), |fade| fade.value_at(now));
        base * self.drag_factor.unwrap_or(1.0)
    }

    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.fade.is_some_and(|fade| !fade.is_finished(now))
    }

    fn target(&self) -> f32 {
        if self.visible {
            1.0
        } else {
            0.0
        }
    }

    fn set_visible(&mut self, visible: bool, now: Instant) -> Effect {
        if self.visible == visible {
            return Effect::None;
        }
        let from = self.alpha(now);
        self.visible = visible;
        self.drag_factor = None;
        self.fade = Some(Tween::new(from, self.target(), now, self.fade_duration));
        Effect::VisibilityChanged(visible)
    }
}
