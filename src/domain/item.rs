// SPDX-License-Identifier: MPL-2.0
//! Viewable media items supplied by the host's data source.
//!
//! An item always carries a low-resolution [`Artwork`] placeholder that can be
//! shown immediately, plus an asynchronous resolution yielding the final
//! artwork. The viewer never owns items beyond the time they are displayed.

use futures_util::future::BoxFuture;
use iced::widget::image::Handle;
use iced::{Point, Rectangle, Size};
use std::fmt;

/// Stable identity of an item, independent of where it sits in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl ItemId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of media an item represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

/// A displayable image together with its pixel dimensions.
#[derive(Debug, Clone)]
pub struct Artwork {
    pub handle: Handle,
    pub size: Size,
}

impl Artwork {
    #[must_use]
    pub fn new(handle: Handle, size: Size) -> Self {
        Self { handle, size }
    }

    /// Frame of this artwork scaled to fit inside `viewport` and centered in it.
    ///
    /// Degenerate sizes fill the whole viewport.
    #[must_use]
    pub fn fitted_frame(&self, viewport: Size) -> Rectangle {
        if self.size.width <= 0.0 || self.size.height <= 0.0 {
            return Rectangle::new(Point::ORIGIN, viewport);
        }

        let scale = (viewport.width / self.size.width).min(viewport.height / self.size.height);
        let size = Size::new(self.size.width * scale, self.size.height * scale);

        Rectangle::new(
            Point::new(
                (viewport.width - size.width) / 2.0,
                (viewport.height - size.height) / 2.0,
            ),
            size,
        )
    }
}

/// Errors that can occur while resolving an item's full content.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaError {
    /// The underlying asset no longer exists.
    NotFound,

    /// The asset's format cannot be displayed.
    UnsupportedFormat,

    /// The data was read but could not be decoded.
    Decode(String),

    /// The asset could not be read.
    Io(String),
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::NotFound => write!(f, "Media not found"),
            MediaError::UnsupportedFormat => write!(f, "Unsupported media format"),
            MediaError::Decode(msg) => write!(f, "Failed to decode media: {msg}"),
            MediaError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for MediaError {}

/// Pending resolution of an item's full content.
pub type MediaFuture = BoxFuture<'static, Result<Artwork, MediaError>>;

/// A unit of media the viewer can display.
///
/// Implementations are owned by the host's data source. The resolution future
/// may complete on any thread; the viewer only applies its result once the
/// host hands it back on the UI thread.
pub trait ViewableItem: Send + Sync + fmt::Debug {
    /// Stable identifier used to detect that an address now holds another item.
    fn id(&self) -> ItemId;

    fn kind(&self) -> MediaKind;

    /// Remote location of the media, if any. Video playback requires one.
    fn url(&self) -> Option<String> {
        None
    }

    /// Identifier of the asset in a local library, if any.
    fn local_identifier(&self) -> Option<String> {
        None
    }

    /// Low-resolution artwork shown until full content resolves.
    fn placeholder(&self) -> Artwork;

    /// Starts resolving the full-resolution artwork.
    fn resolve_media(&self) -> MediaFuture;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artwork(width: f32, height: f32) -> Artwork {
        Artwork::new(Handle::from_rgba(1, 1, vec![0; 4]), Size::new(width, height))
    }

    #[test]
    fn fitted_frame_letterboxes_wide_artwork() {
        let frame = artwork(400.0, 200.0).fitted_frame(Size::new(200.0, 400.0));
        assert_eq!(frame.width, 200.0);
        assert_eq!(frame.height, 100.0);
        assert_eq!(frame.x, 0.0);
        assert_eq!(frame.y, 150.0);
    }

    #[test]
    fn fitted_frame_pillarboxes_tall_artwork() {
        let frame = artwork(100.0, 400.0).fitted_frame(Size::new(400.0, 400.0));
        assert_eq!(frame.width, 100.0);
        assert_eq!(frame.height, 400.0);
        assert_eq!(frame.x, 150.0);
        assert_eq!(frame.y, 0.0);
    }

    #[test]
    fn fitted_frame_with_empty_artwork_fills_viewport() {
        let viewport = Size::new(320.0, 480.0);
        let frame = artwork(0.0, 10.0).fitted_frame(viewport);
        assert_eq!(frame, Rectangle::new(Point::ORIGIN, viewport));
    }

    #[test]
    fn media_error_display() {
        assert_eq!(
            MediaError::Decode("truncated".into()).to_string(),
            "Failed to decode media: truncated"
        );
    }
}
