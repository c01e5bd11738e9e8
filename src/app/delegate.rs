// SPDX-License-Identifier: MPL-2.0
//! Host-side record of what the viewer reported.

use crate::domain::address::IndexPath;
use crate::domain::item::MediaError;
use crate::port::ViewerDelegate;
use std::collections::HashMap;

/// Receives viewer notifications and keeps what the chrome needs to render.
#[derive(Debug)]
pub struct Presentation {
    focused: Option<IndexPath>,
    failures: HashMap<IndexPath, MediaError>,
    actions: Option<IndexPath>,
    status_bar_visible: bool,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            focused: None,
            failures: HashMap::new(),
            actions: None,
            status_bar_visible: true,
        }
    }
}

impl Presentation {
    #[must_use]
    pub fn focused(&self) -> Option<IndexPath> {
        self.focused
    }

    #[must_use]
    pub fn failure(&self, address: IndexPath) -> Option<&MediaError> {
        self.failures.get(&address)
    }

    /// Item whose long-press actions are showing.
    #[must_use]
    pub fn actions(&self) -> Option<IndexPath> {
        self.actions
    }

    pub fn close_actions(&mut self) {
        self.actions = None;
    }

    #[must_use]
    pub fn is_status_bar_visible(&self) -> bool {
        self.status_bar_visible
    }

    /// Drops everything keyed by address after the library changed shape.
    pub fn forget_addresses(&mut self) {
        self.failures.clear();
        self.actions = None;
    }
}

impl ViewerDelegate for Presentation {
    fn focus_changed(&mut self, address: IndexPath) {
        tracing::debug!(%address, "focus changed");
        self.focused = Some(address);
        if self.actions.is_some_and(|open| open != address) {
            self.actions = None;
        }
    }

    fn dismissed(&mut self) {
        tracing::debug!("viewer dismissed");
        self.focused = None;
        self.actions = None;
    }

    fn failed_displaying(&mut self, address: IndexPath, error: &MediaError) {
        self.failures.insert(address, error.clone());
    }

    fn long_pressed(&mut self, address: IndexPath) {
        self.actions = Some(address);
    }

    fn moved_from(&mut self, address: IndexPath) {
        tracing::trace!(%address, "moved from");
    }

    fn moved_to(&mut self, address: IndexPath) {
        tracing::trace!(%address, "moved to");
    }

    fn status_bar_visibility_changed(&mut self, visible: bool) {
        self.status_bar_visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::{dispatch, Effect};

    #[test]
    fn records_failures_and_long_press_actions() {
        let mut presentation = Presentation::default();
        let address = IndexPath::new(0, 1);

        let requests = dispatch(
            vec![
                Effect::FocusChanged(address),
                Effect::FailedDisplaying {
                    address,
                    error: MediaError::NotFound,
                },
                Effect::LongPressed(address),
                Effect::StatusBarVisibility(false),
            ],
            &mut presentation,
        );

        assert!(requests.is_empty());
        assert_eq!(presentation.focused(), Some(address));
        assert_eq!(presentation.failure(address), Some(&MediaError::NotFound));
        assert_eq!(presentation.actions(), Some(address));
        assert!(!presentation.is_status_bar_visible());
    }

    #[test]
    fn focus_elsewhere_closes_actions() {
        let mut presentation = Presentation::default();
        presentation.long_pressed(IndexPath::new(0, 0));
        presentation.focus_changed(IndexPath::new(0, 1));
        assert_eq!(presentation.actions(), None);

        presentation.long_pressed(IndexPath::new(0, 1));
        presentation.dismissed();
        assert_eq!(presentation.actions(), None);
        assert_eq!(presentation.focused(), None);
    }
}
