// SPDX-License-Identifier: MPL-2.0
//! State of one presentation, from `present` until the close animation ends.

use super::chrome;
use crate::domain::address::IndexPath;
use crate::port::HostCollection;
use iced::Point;
use std::time::Duration;

/// Per-presentation state.
///
/// The host cell hidden behind the overlay is tracked here and restored
/// exactly once: [`Session::restore_cell`] takes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    current: Option<IndexPath>,
    presented: bool,
    hidden_cell: Option<IndexPath>,
    drag_origin: Option<Point>,
    chrome: chrome::State,
}

impl Session {
    #[must_use]
    pub fn new(chrome_fade: Duration) -> Self {
        Self {
            current: None,
            presented: false,
            hidden_cell: None,
            drag_origin: None,
            chrome: chrome::State::new(chrome_fade),
        }
    }

    /// Starts a presentation of `address`, hiding its host cell.
    pub fn begin(&mut self, address: IndexPath, host: &mut dyn HostCollection) {
        self.current = Some(address);
        self.presented = false;
        self.drag_origin = None;
        self.hide_cell(address, host);
    }

    /// True from `begin` until `finish`, including both transitions.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// True once the opening transition completed.
    #[must_use]
    pub fn is_presented(&self) -> bool {
        self.presented
    }

    pub fn mark_presented(&mut self) {
        self.presented = true;
    }

    pub fn mark_closing(&mut self) {
        self.presented = false;
        self.drag_origin = None;
    }

    #[must_use]
    pub fn current(&self) -> Option<IndexPath> {
        self.current
    }

    /// Moves focus to `address`; the hidden host cell follows it.
    pub fn set_current(&mut self, address: IndexPath, host: &mut dyn HostCollection) {
        self.current = Some(address);
        if self.hidden_cell != Some(address) {
            self.restore_cell(host);
            host.reveal(address);
            self.hide_cell(address, host);
        }
    }

    #[must_use]
    pub fn hidden_cell(&self) -> Option<IndexPath> {
        self.hidden_cell
    }

    /// Makes the hidden host cell visible again. Returns false when no cell
    /// was hidden, so repeated calls restore at most once.
    pub fn restore_cell(&mut self, host: &mut dyn HostCollection) -> bool {
        match self.hidden_cell.take() {
            Some(address) => {
                host.set_cell_alpha(address, 1.0);
                true
            }
            None => false,
        }
    }

    pub fn start_drag(&mut self, origin: Point) {
        self.drag_origin = Some(origin);
    }

    pub fn end_drag(&mut self) {
        self.drag_origin = None;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    #[must_use]
    pub fn drag_origin(&self) -> Option<Point> {
        self.drag_origin
    }

    #[must_use]
    pub fn chrome(&self) -> &chrome::State {
        &self.chrome
    }

    pub fn chrome_mut(&mut self) -> &mut chrome::State {
        &mut self.chrome
    }

    /// Ends the presentation: restores the host cell and clears all state.
    pub fn finish(&mut self, host: &mut dyn HostCollection) {
        self.restore_cell(host);
        self.current = None;
        self.presented = false;
        self.drag_origin = None;
        self.chrome.handle(chrome::Message::Reset);
    }

    fn hide_cell(&mut self, address: IndexPath, host: &mut dyn HostCollection) {
        host.set_cell_alpha(address, 0.0);
        self.hidden_cell = Some(address);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Rectangle;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Grid {
        alphas: HashMap<IndexPath, f32>,
        restores: usize,
        revealed: Vec<IndexPath>,
    }

    impl HostCollection for Grid {
        fn source_frame(&self, _address: IndexPath) -> Option<Rectangle> {
            None
        }

        fn set_cell_alpha(&mut self, address: IndexPath, alpha: f32) {
            if alpha == 1.0 {
                self.restores += 1;
            }
            self.alphas.insert(address, alpha);
        }

        fn reveal(&mut self, address: IndexPath) {
            self.revealed.push(address);
        }
    }

    fn session() -> Session {
        Session::new(Duration::from_millis(300))
    }

    #[test]
    fn begin_hides_cell_and_finish_restores_it_once() {
        let mut grid = Grid::default();
        let mut session = session();
        let address = IndexPath::new(0, 3);

        session.begin(address, &mut grid);
        assert!(session.is_active());
        assert_eq!(grid.alphas[&address], 0.0);

        session.finish(&mut grid);
        assert!(!session.is_active());
        assert_eq!(grid.alphas[&address], 1.0);
        assert!(!session.restore_cell(&mut grid));
        assert_eq!(grid.restores, 1);
    }

    #[test]
    fn hidden_cell_follows_focus() {
        let mut grid = Grid::default();
        let mut session = session();
        session.begin(IndexPath::new(0, 0), &mut grid);

        session.set_current(IndexPath::new(0, 1), &mut grid);

        assert_eq!(grid.alphas[&IndexPath::new(0, 0)], 1.0);
        assert_eq!(grid.alphas[&IndexPath::new(0, 1)], 0.0);
        assert_eq!(session.hidden_cell(), Some(IndexPath::new(0, 1)));
        assert_eq!(grid.revealed, vec![IndexPath::new(0, 1)]);
    }

    #[test]
    fn same_focus_leaves_cells_alone() {
        let mut grid = Grid::default();
        let mut session = session();
        session.begin(IndexPath::new(0, 0), &mut grid);

        session.set_current(IndexPath::new(0, 0), &mut grid);

        assert_eq!(grid.restores, 0);
        assert!(grid.revealed.is_empty());
    }

    #[test]
    fn drag_state() {
        let mut session = session();
        assert!(!session.is_dragging());
        session.start_drag(Point::new(0.0, 400.0));
        assert_eq!(session.drag_origin(), Some(Point::new(0.0, 400.0)));
        session.mark_closing();
        assert!(!session.is_dragging());
    }
}
