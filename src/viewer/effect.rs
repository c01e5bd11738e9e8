// SPDX-License-Identifier: MPL-2.0
//! Outcomes of viewer operations.
//!
//! Viewer operations never call back into the host directly. They return
//! [`Effect`]s, which the host forwards to its [`ViewerDelegate`] with
//! [`dispatch`] and whose media requests it runs on its executor.

use crate::domain::address::IndexPath;
use crate::domain::item::{ItemId, MediaError, MediaFuture};
use crate::port::ViewerDelegate;
use std::fmt;

/// A media resolution the host must run and report back with
/// [`Viewer::media_resolved`](super::Viewer::media_resolved).
pub struct ResolveRequest {
    pub address: IndexPath,
    /// Identity of the item bound when the request was issued. A result whose
    /// id no longer matches the controller's item is discarded.
    pub item_id: ItemId,
    pub future: MediaFuture,
}

impl fmt::Debug for ResolveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveRequest")
            .field("address", &self.address)
            .field("item_id", &self.item_id)
            .finish_non_exhaustive()
    }
}

/// Something the host must act on after a viewer operation.
#[derive(Debug)]
pub enum Effect {
    FocusChanged(IndexPath),
    MovedFrom(IndexPath),
    MovedTo(IndexPath),
    Dismissed,
    FailedDisplaying { address: IndexPath, error: MediaError },
    LongPressed(IndexPath),
    StatusBarVisibility(bool),
    ResolveMedia(ResolveRequest),
}

/// Paging direction for swipes and remote buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Sign of the content offset that reveals the page in this direction.
    #[must_use]
    pub fn offset_sign(self) -> f32 {
        match self {
            Direction::Previous => 1.0,
            Direction::Next => -1.0,
        }
    }
}

/// Forwards delegate notifications and returns the media requests to run.
pub fn dispatch(effects: Vec<Effect>, delegate: &mut dyn ViewerDelegate) -> Vec<ResolveRequest> {
    let mut requests = Vec::new();
    for effect in effects {
        match effect {
            Effect::FocusChanged(address) => delegate.focus_changed(address),
            Effect::MovedFrom(address) => delegate.moved_from(address),
            Effect::MovedTo(address) => delegate.moved_to(address),
            Effect::Dismissed => delegate.dismissed(),
            Effect::FailedDisplaying { address, error } => {
                delegate.failed_displaying(address, &error);
            }
            Effect::LongPressed(address) => delegate.long_pressed(address),
            Effect::StatusBarVisibility(visible) => {
                delegate.status_bar_visibility_changed(visible);
            }
            Effect::ResolveMedia(request) => requests.push(request),
        }
    }
    requests
}
