// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Window resizes and keyboard input are always listened to; the frame clock
//! only runs while the viewer has an animation in flight.

use super::{Message, RemoteButton};
use iced::keyboard::{self, key::Named, Key};
use iced::{event, time, window, Event, Subscription};
use std::time::Duration;

/// Roughly one frame at 60 Hz.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Routes native events the overlay does not capture.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, _window| match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
        Event::Keyboard(keyboard::Event::KeyPressed { key, .. })
            if matches!(status, event::Status::Ignored) =>
        {
            remote_button(&key).map(Message::Remote)
        }
        _ => None,
    })
}

/// Drives viewer animations.
pub fn create_frame_subscription(animating: bool) -> Subscription<Message> {
    if animating {
        time::every(FRAME_INTERVAL).map(Message::Frame)
    } else {
        Subscription::none()
    }
}

/// Keyboard stand-ins for the remote's buttons.
fn remote_button(key: &Key) -> Option<RemoteButton> {
    match key {
        Key::Named(Named::ArrowLeft) => Some(RemoteButton::Left),
        Key::Named(Named::ArrowRight) => Some(RemoteButton::Right),
        Key::Named(Named::Enter) => Some(RemoteButton::Select),
        Key::Named(Named::Escape | Named::Backspace) => Some(RemoteButton::Menu),
        Key::Named(Named::Space) => Some(RemoteButton::PlayPause),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_escape_map_to_remote_buttons() {
        assert_eq!(
            remote_button(&Key::Named(Named::ArrowLeft)),
            Some(RemoteButton::Left)
        );
        assert_eq!(
            remote_button(&Key::Named(Named::Escape)),
            Some(RemoteButton::Menu)
        );
        assert_eq!(remote_button(&Key::Character("a".into())), None);
    }
}
