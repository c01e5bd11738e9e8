// SPDX-License-Identifier: MPL-2.0
use crate::domain::address::IndexPath;
use iced::Element;

/// Header and footer widgets drawn above the viewer.
///
/// The viewer decides where the widgets sit and how opaque they are; it never
/// inspects what they contain. `alpha` is the current chrome opacity, which
/// implementations apply to their own colours.
pub trait ChromeOverlay<Message> {
    fn header(&self, address: IndexPath, alpha: f32) -> Option<Element<'_, Message>>;

    fn footer(&self, address: IndexPath, alpha: f32) -> Option<Element<'_, Message>>;
}
