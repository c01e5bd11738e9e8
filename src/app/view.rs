// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The grid sits under a status strip; the viewer overlay is stacked above
//! both and covers the whole window while a presentation is active.

use super::{App, Message, STATUS_BAR_HEIGHT};
use crate::port::DataSource;
use crate::ui;
use iced::widget::{column, container, row, text, Space, Stack};
use iced::{Alignment, Element, Length};
use std::time::Instant;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let base = column![self.status_bar(), self.body()]
            .width(Length::Fill)
            .height(Length::Fill);

        let overlay = ui::view(self.viewer.scene(Instant::now()), self, Message::Overlay);

        Stack::new()
            .push(base)
            .push(overlay)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Keeps its height while hidden so grid cell frames never move.
    fn status_bar(&self) -> Element<'_, Message> {
        let strip = container(if self.presentation.is_status_bar_visible() {
            let location = self
                .root
                .as_ref()
                .map(|root| root.display().to_string())
                .unwrap_or_default();
            row![
                text(location).size(12),
                Space::new().width(Length::Fill),
                text(format!("{} items", self.library.total_count())).size(12),
            ]
            .align_y(Alignment::Center)
        } else {
            row![]
        });

        strip
            .padding([4, 8])
            .width(Length::Fill)
            .height(Length::Fixed(STATUS_BAR_HEIGHT))
            .into()
    }

    fn body(&self) -> Element<'_, Message> {
        let notice = if self.loading {
            Some("Scanning…".to_string())
        } else if let Some(error) = &self.error {
            Some(error.clone())
        } else if self.root.is_none() {
            Some("Pass a directory to browse.".to_string())
        } else if self.library.is_empty() {
            Some("No images or videos found.".to_string())
        } else {
            None
        };

        match notice {
            Some(notice) => container(text(notice))
                .center(Length::Fill)
                .into(),
            None => self.grid.view(&self.library),
        }
    }
}
