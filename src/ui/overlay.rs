// SPDX-License-Identifier: MPL-2.0
//! Canvas program drawing the viewer scene.
//!
//! The program owns a [`Recognizer`] in its widget state and publishes the
//! gestures it recognizes; it never mutates the viewer itself.

use crate::domain::item::MediaKind;
use crate::viewer::gesture::{Gesture, Recognizer};
use crate::viewer::{Layer, Scene};
use iced::mouse;
use iced::touch;
use iced::widget::canvas::{self, Frame, Geometry, Path};
use iced::widget::Action;
use iced::{Color, Event, Point, Rectangle, Renderer, Size, Theme};
use std::time::Instant;

/// Input published by the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Gesture(Gesture),
    /// Wheel zoom by a multiplicative factor.
    Zoom(f32),
}

/// Pixels of wheel travel that double the zoom.
const WHEEL_PIXELS_PER_DOUBLING: f32 = 240.0;
const BADGE_RADIUS: f32 = 28.0;
const PROGRESS_HEIGHT: f32 = 3.0;

/// Clamps an opacity to the drawable range.
///
/// Viewer alphas may leave `0.0..=1.0` while a drag is in progress; only the
/// renderer clamps them.
#[must_use]
pub fn opacity(alpha: f32) -> f32 {
    if alpha.is_nan() {
        return 0.0;
    }
    alpha.clamp(0.0, 1.0)
}

/// Draws one [`Scene`] and turns pointer input into [`Input`].
pub struct Overlay<Message> {
    scene: Scene,
    on_input: fn(Input) -> Message,
}

impl<Message> Overlay<Message> {
    pub fn new(scene: Scene, on_input: fn(Input) -> Message) -> Self {
        Self { scene, on_input }
    }

    fn publish(&self, input: Input) -> Action<Message> {
        Action::publish((self.on_input)(input)).and_capture()
    }

    fn publish_gesture(&self, gesture: Option<Gesture>) -> Option<Action<Message>> {
        gesture.map(|gesture| self.publish(Input::Gesture(gesture)))
    }
}

impl<Message> canvas::Program<Message> for Overlay<Message> {
    type State = Recognizer;

    fn update(
        &self,
        recognizer: &mut Recognizer,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        if self.scene.is_empty() {
            let _ = recognizer.cancel();
            return None;
        }
        let now = Instant::now();

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                recognizer.press(position, now);
                Some(Action::request_redraw().and_capture())
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let position = cursor.position_in(bounds)?;
                self.publish_gesture(recognizer.moved(position, now))
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds).unwrap_or(Point::ORIGIN);
                self.publish_gesture(recognizer.release(position, now))
            }
            Event::Mouse(mouse::Event::CursorLeft) => self.publish_gesture(recognizer.cancel()),
            Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                cursor.position_in(bounds)?;
                let y = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => y * 40.0,
                    mouse::ScrollDelta::Pixels { y, .. } => *y,
                };
                let factor = 2.0_f32.powf(y / WHEEL_PIXELS_PER_DOUBLING);
                Some(self.publish(Input::Zoom(factor)))
            }
            Event::Touch(touch::Event::FingerPressed { position, .. }) => {
                recognizer.press(local(*position, bounds), now);
                Some(Action::request_redraw().and_capture())
            }
            Event::Touch(touch::Event::FingerMoved { position, .. }) => {
                self.publish_gesture(recognizer.moved(local(*position, bounds), now))
            }
            Event::Touch(touch::Event::FingerLifted { position, .. }) => {
                self.publish_gesture(recognizer.release(local(*position, bounds), now))
            }
            Event::Touch(touch::Event::FingerLost { .. }) => {
                self.publish_gesture(recognizer.cancel())
            }
            Event::Window(iced::window::Event::RedrawRequested(at)) => {
                if let Some(gesture) = recognizer.tick(*at) {
                    return Some(self.publish(Input::Gesture(gesture)));
                }
                // Keep sampling until a long press fires or the press ends.
                (recognizer.is_pressed() && !recognizer.is_panning())
                    .then(Action::request_redraw)
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _recognizer: &Recognizer,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        if self.scene.is_empty() {
            return vec![frame.into_geometry()];
        }

        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color {
                a: opacity(self.scene.background_alpha),
                ..Color::BLACK
            },
        );

        if let Some(snapshot) = &self.scene.snapshot {
            frame.draw_image(
                snapshot.frame,
                canvas::Image::new(snapshot.artwork.handle.clone())
                    .opacity(opacity(snapshot.alpha)),
            );
        }

        for layer in &self.scene.pages {
            frame.draw_image(layer.frame, canvas::Image::new(layer.artwork.handle.clone()));
            if layer.kind == MediaKind::Video {
                draw_video_badge(&mut frame, layer);
            }
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        recognizer: &Recognizer,
        _bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if recognizer.is_panning() {
            mouse::Interaction::Grabbing
        } else {
            mouse::Interaction::default()
        }
    }
}

fn local(position: Point, bounds: Rectangle) -> Point {
    Point::new(position.x - bounds.x, position.y - bounds.y)
}

fn draw_video_badge(frame: &mut Frame, layer: &Layer) {
    let center = layer.frame.center();
    let playing = layer.playback.is_some_and(|state| state.is_playing());

    if !playing {
        frame.fill(
            &Path::circle(center, BADGE_RADIUS),
            Color::from_rgba(0.0, 0.0, 0.0, 0.55),
        );
        let r = BADGE_RADIUS * 0.45;
        let triangle = Path::new(|builder| {
            builder.move_to(Point::new(center.x - r * 0.6, center.y - r));
            builder.line_to(Point::new(center.x + r, center.y));
            builder.line_to(Point::new(center.x - r * 0.6, center.y + r));
            builder.close();
        });
        frame.fill(&triangle, Color::WHITE);
    }

    if let Some(progress) = layer.progress {
        let bottom = layer.frame.y + layer.frame.height - PROGRESS_HEIGHT;
        frame.fill_rectangle(
            Point::new(layer.frame.x, bottom),
            Size::new(layer.frame.width, PROGRESS_HEIGHT),
            Color::from_rgba(1.0, 1.0, 1.0, 0.3),
        );
        frame.fill_rectangle(
            Point::new(layer.frame.x, bottom),
            Size::new(layer.frame.width * progress.clamp(0.0, 1.0), PROGRESS_HEIGHT),
            Color::WHITE,
        );
    }
}
