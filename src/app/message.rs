// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use super::library::Library;
use crate::config::{Config, PagingStrategy};
use crate::domain::address::IndexPath;
use crate::domain::item::{Artwork, ItemId, MediaError};
use crate::domain::platform::Platform;
use crate::error::Error;
use crate::ui::Input;
use iced::widget::scrollable::Viewport;
use iced::Size;
use std::path::PathBuf;
use std::time::Instant;

/// Buttons of a directional remote, mapped from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteButton {
    Left,
    Right,
    Select,
    Menu,
    PlayPause,
}

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    LibraryLoaded(Result<Library, Error>),
    GridScrolled(Viewport),
    ThumbnailPressed(IndexPath),
    /// Pointer input recognized by the viewer overlay.
    Overlay(Input),
    Remote(RemoteButton),
    /// Animation frame while the viewer is animating.
    Frame(Instant),
    MediaResolved {
        address: IndexPath,
        item_id: ItemId,
        result: Result<Artwork, MediaError>,
    },
    WindowResized(Size),
    CloseViewer,
    TogglePlayback,
    ToggleFavourite(IndexPath),
    RemoveItem(IndexPath),
    CopyPath(IndexPath),
    DismissActions,
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Directory to browse.
    pub root: Option<PathBuf>,
    /// Overrides the configured input platform.
    pub platform: Option<Platform>,
    /// Overrides the configured paging strategy.
    pub strategy: Option<PagingStrategy>,
    pub config: Config,
}
