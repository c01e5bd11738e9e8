// SPDX-License-Identifier: MPL-2.0
use crate::domain::address::IndexPath;
use crate::domain::item::ViewableItem;
use iced::Rectangle;
use std::sync::Arc;

/// Supplies viewable items to the viewer.
pub trait DataSource {
    fn section_count(&self) -> usize {
        1
    }

    fn item_count(&self, section: usize) -> usize;

    fn total_count(&self) -> usize {
        (0..self.section_count())
            .map(|section| self.item_count(section))
            .sum()
    }

    /// Item at `address`, or `None` when the address is out of range.
    fn item(&self, address: IndexPath) -> Option<Arc<dyn ViewableItem>>;
}

/// The thumbnail collection the viewer opens from and closes back into.
pub trait HostCollection {
    /// On-screen frame of the cell at `address`, or `None` when the cell is
    /// not currently visible.
    fn source_frame(&self, address: IndexPath) -> Option<Rectangle>;

    /// Sets the opacity of the cell at `address`. The viewer hides the cell it
    /// animates from and restores it when the overlay goes away.
    fn set_cell_alpha(&mut self, address: IndexPath, alpha: f32);

    /// Asks the host to scroll so the cell at `address` becomes visible.
    fn reveal(&mut self, _address: IndexPath) {}
}
