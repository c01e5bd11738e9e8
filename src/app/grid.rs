// SPDX-License-Identifier: MPL-2.0
//! Scrollable thumbnail grid the viewer opens from and closes back into.
//!
//! Layout is computed here rather than read back from iced so the grid can
//! answer [`HostCollection::source_frame`] synchronously.

use super::library::Library;
use super::Message;
use crate::domain::address::IndexPath;
use crate::port::{DataSource, HostCollection};
use iced::widget::scrollable::{AbsoluteOffset, Viewport};
use iced::widget::{button, column, container, image, operation, row, text, Id, Scrollable};
use iced::{ContentFit, Element, Length, Point, Rectangle, Size, Task};
use std::collections::HashMap;

/// Identifier of the grid's scrollable.
pub const GRID_ID: &str = "thumbnail-grid";

const CELL: f32 = 120.0;
const SPACING: f32 = 8.0;
const PADDING: f32 = 8.0;
const HEADER: f32 = 28.0;
const SECTION_GAP: f32 = 2.0 * SPACING;

/// Grid geometry and per-cell opacity.
#[derive(Debug, Clone)]
pub struct Grid {
    viewport: Size,
    /// Top of the grid inside the window.
    origin_y: f32,
    scroll_y: f32,
    counts: Vec<usize>,
    alphas: HashMap<IndexPath, f32>,
    pending_scroll: Option<f32>,
}

impl Grid {
    #[must_use]
    pub fn new(viewport: Size, origin_y: f32) -> Self {
        Self {
            viewport,
            origin_y,
            scroll_y: 0.0,
            counts: Vec::new(),
            alphas: HashMap::new(),
            pending_scroll: None,
        }
    }

    /// Rebuilds the layout after the library changed.
    pub fn sync(&mut self, library: &Library) {
        self.counts = (0..library.section_count())
            .map(|section| library.item_count(section))
            .collect();
        self.alphas.clear();
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn scrolled(&mut self, viewport: &Viewport) {
        self.scroll_y = viewport.absolute_offset().y;
    }

    /// Scroll requested by [`HostCollection::reveal`], as an iced task.
    pub fn take_scroll(&mut self) -> Task<Message> {
        match self.pending_scroll.take() {
            Some(y) => operation::scroll_to(Id::new(GRID_ID), AbsoluteOffset { x: 0.0, y }),
            None => Task::none(),
        }
    }

    #[must_use]
    pub fn alpha(&self, address: IndexPath) -> f32 {
        self.alphas.get(&address).copied().unwrap_or(1.0)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn columns(&self) -> usize {
        let usable = self.viewport.width - 2.0 * PADDING + SPACING;
        ((usable / (CELL + SPACING)).floor() as usize).max(1)
    }

    #[allow(clippy::cast_precision_loss)]
    fn section_height(&self, count: usize) -> f32 {
        let rows = count.div_ceil(self.columns());
        HEADER + rows as f32 * CELL + rows.saturating_sub(1) as f32 * SPACING
    }

    /// Frame of a cell in content coordinates.
    #[allow(clippy::cast_precision_loss)]
    fn content_frame(&self, address: IndexPath) -> Option<Rectangle> {
        let count = *self.counts.get(address.section)?;
        if address.row >= count {
            return None;
        }
        let top: f32 = PADDING
            + self.counts[..address.section]
                .iter()
                .map(|count| self.section_height(*count) + SECTION_GAP)
                .sum::<f32>();

        let columns = self.columns();
        let (line, column) = (address.row / columns, address.row % columns);
        Some(Rectangle::new(
            Point::new(
                PADDING + column as f32 * (CELL + SPACING),
                top + HEADER + line as f32 * (CELL + SPACING),
            ),
            Size::new(CELL, CELL),
        ))
    }

    fn visible_height(&self) -> f32 {
        self.viewport.height - self.origin_y
    }

    pub fn view<'a>(&self, library: &'a Library) -> Element<'a, Message> {
        let columns = self.columns();
        let mut content = column![].spacing(SECTION_GAP).padding(PADDING);

        for (s, section) in library.sections().iter().enumerate() {
            let mut lines = column![].spacing(SPACING);
            for (l, chunk) in section.items.chunks(columns).enumerate() {
                let mut line = row![].spacing(SPACING);
                for (c, item) in chunk.iter().enumerate() {
                    let address = IndexPath::new(s, l * columns + c);
                    let thumbnail = image(item.thumbnail().handle.clone())
                        .width(Length::Fixed(CELL))
                        .height(Length::Fixed(CELL))
                        .content_fit(ContentFit::Cover)
                        .opacity(self.alpha(address));
                    line = line.push(
                        button(thumbnail)
                            .padding(0)
                            .style(button::text)
                            .on_press(Message::ThumbnailPressed(address)),
                    );
                }
                lines = lines.push(line);
            }

            content = content.push(
                column![
                    container(text(section.title.clone()).size(16))
                        .height(Length::Fixed(HEADER)),
                    lines,
                ]
                .spacing(0),
            );
        }

        Scrollable::new(content)
            .id(Id::new(GRID_ID))
            .width(Length::Fill)
            .height(Length::Fill)
            .on_scroll(Message::GridScrolled)
            .into()
    }
}

impl HostCollection for Grid {
    fn source_frame(&self, address: IndexPath) -> Option<Rectangle> {
        let frame = self.content_frame(address)?;
        let y = frame.y - self.scroll_y;
        if y + frame.height <= 0.0 || y >= self.visible_height() {
            return None;
        }
        Some(Rectangle::new(
            Point::new(frame.x, self.origin_y + y),
            frame.size(),
        ))
    }

    fn set_cell_alpha(&mut self, address: IndexPath, alpha: f32) {
        if alpha >= 1.0 {
            self.alphas.remove(&address);
        } else {
            self.alphas.insert(address, alpha);
        }
    }

    fn reveal(&mut self, address: IndexPath) {
        let Some(frame) = self.content_frame(address) else {
            return;
        };
        let target = if frame.y < self.scroll_y {
            frame.y - PADDING
        } else if frame.y + frame.height > self.scroll_y + self.visible_height() {
            frame.y + frame.height + PADDING - self.visible_height()
        } else {
            return;
        };
        let target = target.max(0.0);
        self.scroll_y = target;
        self.pending_scroll = Some(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(counts: Vec<usize>) -> Grid {
        let mut grid = Grid::new(Size::new(400.0, 500.0), 0.0);
        grid.counts = counts;
        grid
    }

    #[test]
    fn cells_flow_into_rows() {
        let grid = grid(vec![5]);
        assert_eq!(grid.columns(), 3);

        let first = grid.source_frame(IndexPath::new(0, 0)).expect("visible");
        assert_eq!(first.position(), Point::new(PADDING, PADDING + HEADER));

        let fourth = grid.source_frame(IndexPath::new(0, 3)).expect("visible");
        assert_eq!(fourth.x, PADDING);
        assert_eq!(fourth.y, PADDING + HEADER + CELL + SPACING);
    }

    #[test]
    fn later_sections_start_below_earlier_ones() {
        let grid = grid(vec![2, 1]);
        let frame = grid.source_frame(IndexPath::new(1, 0)).expect("visible");
        let expected = PADDING + HEADER + CELL + SECTION_GAP + HEADER;
        assert_eq!(frame.y, expected);
    }

    #[test]
    fn scrolled_out_cells_have_no_frame() {
        let mut grid = grid(vec![30]);
        assert!(grid.source_frame(IndexPath::new(0, 29)).is_none());

        grid.reveal(IndexPath::new(0, 29));
        assert!(grid.source_frame(IndexPath::new(0, 29)).is_some());
        assert!(grid.source_frame(IndexPath::new(0, 0)).is_none());
        assert!(grid.pending_scroll.is_some());
    }

    #[test]
    fn alpha_defaults_to_opaque() {
        let mut grid = grid(vec![1]);
        let address = IndexPath::new(0, 0);
        grid.set_cell_alpha(address, 0.0);
        assert_eq!(grid.alpha(address), 0.0);
        grid.set_cell_alpha(address, 1.0);
        assert_eq!(grid.alpha(address), 1.0);
    }

    #[test]
    fn out_of_range_address_has_no_frame() {
        let grid = grid(vec![2]);
        assert!(grid.source_frame(IndexPath::new(0, 2)).is_none());
        assert!(grid.source_frame(IndexPath::new(1, 0)).is_none());
    }
}
