// SPDX-License-Identifier: MPL-2.0
use crate::domain::address::IndexPath;
use crate::domain::item::MediaError;

/// Receives notifications emitted by the viewer.
///
/// Only focus changes and dismissal are mandatory; the remaining callbacks
/// default to doing nothing.
pub trait ViewerDelegate {
    fn focus_changed(&mut self, address: IndexPath);

    fn dismissed(&mut self);

    fn failed_displaying(&mut self, _address: IndexPath, _error: &MediaError) {}

    fn long_pressed(&mut self, _address: IndexPath) {}

    fn moved_from(&mut self, _address: IndexPath) {}

    fn moved_to(&mut self, _address: IndexPath) {}

    fn status_bar_visibility_changed(&mut self, _visible: bool) {}
}
