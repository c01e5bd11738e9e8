// SPDX-License-Identifier: MPL-2.0
//! Header and footer shown above the viewer.

use super::{App, Message};
use crate::domain::address::IndexPath;
use crate::domain::item::{MediaKind, ViewableItem};
use crate::navigation::IndexPathMap;
use crate::port::ChromeOverlay;
use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Border, Color, Element, Length, Theme};

const BAR_PADDING: [u16; 2] = [8, 16];
const BAR_SPACING: f32 = 12.0;
const BACKDROP: f32 = 0.55;

impl ChromeOverlay<Message> for App {
    fn header(&self, address: IndexPath, alpha: f32) -> Option<Element<'_, Message>> {
        let item = self.library.get(address)?;
        let section = self.library.sections().get(address.section)?;

        let titles = column![
            text(item.name()).size(16).color(tint(Color::WHITE, alpha)),
            text(section.title.clone())
                .size(12)
                .color(tint(Color::from_rgb(0.75, 0.75, 0.78), alpha)),
        ];
        let content = row![
            titles,
            Space::new().width(Length::Fill),
            bar_button("Close", alpha).on_press(Message::CloseViewer),
        ]
        .spacing(BAR_SPACING)
        .align_y(Alignment::Center);

        Some(bar(content.into(), alpha))
    }

    fn footer(&self, address: IndexPath, alpha: f32) -> Option<Element<'_, Message>> {
        let item = self.library.get(address)?;
        let map = IndexPathMap::from_source(&self.library);
        let position = map
            .flat_index_for(address)
            .map(|index| format!("{} of {}", index + 1, map.len()))
            .unwrap_or_default();

        let mut content = row![text(position).size(13).color(tint(Color::WHITE, alpha))]
            .spacing(BAR_SPACING)
            .align_y(Alignment::Center);

        if item.kind() == MediaKind::Video {
            let playing = self
                .viewer
                .controller(address)
                .and_then(|controller| controller.playback())
                .is_some_and(|playback| playback.state().is_playing());
            let label = if playing { "Pause" } else { "Play" };
            content = content.push(bar_button(label, alpha).on_press(Message::TogglePlayback));
        }

        if let Some(error) = self.presentation.failure(address) {
            content = content.push(
                text(error.to_string())
                    .size(13)
                    .color(tint(Color::from_rgb(1.0, 0.45, 0.4), alpha)),
            );
        }

        content = content.push(Space::new().width(Length::Fill));

        if self.presentation.actions() == Some(address) {
            content = content
                .push(bar_button("Copy path", alpha).on_press(Message::CopyPath(address)))
                .push(bar_button("Remove", alpha).on_press(Message::RemoveItem(address)))
                .push(bar_button("Cancel", alpha).on_press(Message::DismissActions));
        } else {
            let favourite = self.favourites.contains(&item.id());
            let label = if favourite { "★ Favourite" } else { "☆ Favourite" };
            content = content
                .push(bar_button(label, alpha).on_press(Message::ToggleFavourite(address)));
        }

        Some(bar(content.into(), alpha))
    }
}

fn tint(color: Color, alpha: f32) -> Color {
    Color {
        a: color.a * alpha,
        ..color
    }
}

fn bar(content: Element<'_, Message>, alpha: f32) -> Element<'_, Message> {
    container(content)
        .padding(BAR_PADDING)
        .width(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(tint(Color::BLACK, BACKDROP * alpha).into()),
            ..Default::default()
        })
        .into()
}

fn bar_button(label: &str, alpha: f32) -> button::Button<'_, Message> {
    button(text(label).size(13))
        .padding([4, 10])
        .style(move |_theme: &Theme, status| {
            let fill = match status {
                button::Status::Hovered | button::Status::Pressed => 0.25,
                _ => 0.12,
            };
            button::Style {
                background: Some(tint(Color::WHITE, fill * alpha).into()),
                text_color: tint(Color::WHITE, alpha),
                border: Border {
                    radius: 6.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            }
        })
}
