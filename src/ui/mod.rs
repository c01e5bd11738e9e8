// SPDX-License-Identifier: MPL-2.0
//! Rendering of the viewer overlay.
//!
//! [`view`] stacks the canvas drawing the current [`Scene`] under the host's
//! header and footer. Positions and opacities come from the scene; the
//! widgets themselves come from a [`ChromeOverlay`].

pub mod overlay;

pub use overlay::{opacity, Input, Overlay};

use crate::port::ChromeOverlay;
use crate::viewer::Scene;
use iced::widget::{canvas, column, container, Space, Stack};
use iced::{Element, Length};

/// Builds the overlay for `scene`. Returns an empty space when the viewer is
/// not active so the host can always place it above its content.
pub fn view<'a, Message: 'a>(
    scene: Scene,
    chrome: &'a dyn ChromeOverlay<Message>,
    on_input: fn(Input) -> Message,
) -> Element<'a, Message> {
    let Some(focused) = scene.focused else {
        return Space::new().width(Length::Shrink).height(Length::Shrink).into();
    };
    let chrome_alpha = opacity(scene.chrome_alpha);

    let surface = canvas(Overlay::new(scene, on_input))
        .width(Length::Fill)
        .height(Length::Fill);

    if chrome_alpha <= 0.0 {
        return surface.into();
    }

    let mut bars = column![].width(Length::Fill).height(Length::Fill);
    if let Some(header) = chrome.header(focused, chrome_alpha) {
        bars = bars.push(container(header).width(Length::Fill));
    }
    bars = bars.push(Space::new().height(Length::Fill));
    if let Some(footer) = chrome.footer(focused, chrome_alpha) {
        bars = bars.push(container(footer).width(Length::Fill));
    }

    Stack::new().push(surface).push(bars).into()
}
