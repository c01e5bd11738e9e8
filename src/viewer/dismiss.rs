// SPDX-License-Identifier: MPL-2.0
//! Drag-to-dismiss sub-component.
//!
//! Tracks a vertical drag of the focused item. While the drag moves, the
//! background fades by `1 - coefficient * |dy| / half_height`; the value is not
//! clamped here, only the renderer clamps it. On release the drag dismisses
//! when the item's center travelled strictly more than the margin away from
//! the vertical middle, and snaps back otherwise.

use crate::config::PresentationSettings;

/// Background alpha for a surface displaced `offset_y` from its resting center.
#[must_use]
pub fn background_alpha(offset_y: f32, half_height: f32, coefficient: f32) -> f32 {
    if half_height <= 0.0 {
        return 1.0;
    }
    1.0 - coefficient * offset_y.abs() / half_height
}

/// Whether a surface centered at `center_y` has left the snap-back band.
#[must_use]
pub fn should_dismiss(center_y: f32, half_height: f32, margin: f32) -> bool {
    center_y > half_height + margin || center_y < half_height - margin
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    origin_y: f32,
    half_height: f32,
    translation: f32,
}

impl Drag {
    fn center_y(&self) -> f32 {
        self.origin_y + self.translation
    }

    fn offset_y(&self) -> f32 {
        self.center_y() - self.half_height
    }
}

/// Drag-to-dismiss state.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    margin: f32,
    coefficient: f32,
    drag: Option<Drag>,
}

/// Messages for the drag-to-dismiss sub-component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    /// A vertical drag started with the item's center at `center_y`.
    Began { center_y: f32, viewport_height: f32 },
    /// The pointer moved `translation_y` since the drag began.
    Moved(f32),
    /// The pointer was released.
    Ended,
    /// The drag was taken over by something else; nothing is decided.
    Cancelled,
}

/// Effects produced by drag-to-dismiss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    /// Move the item to `offset_y` and fade the background to `background_alpha`.
    Follow { offset_y: f32, background_alpha: f32 },
    /// Release past the margin: dismiss from the current position.
    Dismiss { offset_y: f32, background_alpha: f32 },
    /// Release inside the margin: animate back to rest.
    SnapBack { offset_y: f32, background_alpha: f32 },
}

impl Default for State {
    fn default() -> Self {
        Self::new(&PresentationSettings::default())
    }
}

impl State {
    #[must_use]
    pub fn new(settings: &PresentationSettings) -> Self {
        Self {
            margin: settings.dismiss_margin,
            coefficient: settings.drag_alpha_coefficient,
            drag: None,
        }
    }

    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Began {
                center_y,
                viewport_height,
            } => {
                let drag = Drag {
                    origin_y: center_y,
                    half_height: viewport_height / 2.0,
                    translation: 0.0,
                };
                self.drag = Some(drag);
                self.follow(drag)
            }
            Message::Moved(translation) => match self.drag.as_mut() {
                Some(drag) => {
                    drag.translation = translation;
                    let drag = *drag;
                    self.follow(drag)
                }
                None => Effect::None,
            },
            Message::Ended => {
                let Some(drag) = self.drag.take() else {
                    return Effect::None;
                };
                let offset_y = drag.offset_y();
                let background_alpha = self.alpha(drag);
                if should_dismiss(drag.center_y(), drag.half_height, self.margin) {
                    Effect::Dismiss {
                        offset_y,
                        background_alpha,
                    }
                } else {
                    Effect::SnapBack {
                        offset_y,
                        background_alpha,
                    }
                }
            }
            Message::Cancelled => {
                self.drag = None;
                Effect::None
            }
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Background alpha of the drag in progress.
    #[must_use]
    pub fn current_alpha(&self) -> Option<f32> {
        self.drag.map(|drag| self.alpha(drag))
    }

    fn alpha(&self, drag: Drag) -> f32 {
        background_alpha(drag.offset_y(), drag.half_height, self.coefficient)
    }

    fn follow(&self, drag: Drag) -> Effect {
        Effect::Follow {
            offset_y: drag.offset_y(),
            background_alpha: self.alpha(drag),
        }
    }
}
