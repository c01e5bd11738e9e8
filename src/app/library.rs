// SPDX-License-Identifier: MPL-2.0
//! Filesystem-backed media library used by the demo host.
//!
//! The root directory becomes the first section and every immediate
//! sub-directory with media becomes one more section, in alphabetical order.
//! Thumbnails are decoded once at scan time; full-resolution artwork is only
//! decoded when the viewer asks an item to resolve.

use crate::domain::address::IndexPath;
use crate::domain::item::{Artwork, ItemId, MediaError, MediaFuture, MediaKind, ViewableItem};
use crate::error::Result;
use crate::port::DataSource;
use futures_util::FutureExt;
use iced::widget::image::Handle;
use iced::Size;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Longest edge of scan-time thumbnails, in pixels.
pub const THUMBNAIL_SIZE: u32 = 256;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "tiff", "tif", "webp", "bmp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "avi", "mov", "mkv", "webm"];

/// A media file on disk.
#[derive(Debug)]
pub struct FsItem {
    path: PathBuf,
    kind: MediaKind,
    thumbnail: Artwork,
}

impl FsItem {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn thumbnail(&self) -> &Artwork {
        &self.thumbnail
    }
}

impl ViewableItem for FsItem {
    fn id(&self) -> ItemId {
        ItemId::new(self.path.to_string_lossy())
    }

    fn kind(&self) -> MediaKind {
        self.kind
    }

    fn url(&self) -> Option<String> {
        match self.kind {
            MediaKind::Video => Some(format!("file://{}", self.path.display())),
            MediaKind::Image => None,
        }
    }

    fn local_identifier(&self) -> Option<String> {
        Some(self.path.to_string_lossy().into_owned())
    }

    fn placeholder(&self) -> Artwork {
        self.thumbnail.clone()
    }

    fn resolve_media(&self) -> MediaFuture {
        let path = self.path.clone();
        match self.kind {
            MediaKind::Image => async move {
                tokio::task::spawn_blocking(move || load_artwork(&path, None))
                    .await
                    .map_err(|e| MediaError::Io(e.to_string()))?
            }
            .boxed(),
            // No decoder for video frames; the placeholder stays up.
            MediaKind::Video => async { Err(MediaError::UnsupportedFormat) }.boxed(),
        }
    }
}

/// One titled group of items.
#[derive(Debug, Clone)]
pub struct Section {
    pub title: String,
    pub items: Vec<Arc<FsItem>>,
}

/// Items grouped into sections.
#[derive(Debug, Clone, Default)]
pub struct Library {
    sections: Vec<Section>,
}

impl Library {
    /// Scans `root` on the blocking pool.
    pub async fn scan(root: PathBuf) -> Result<Self> {
        tokio::task::spawn_blocking(move || Self::scan_blocking(&root))
            .await
            .map_err(|e| crate::error::Error::Io(e.to_string()))?
    }

    /// Scans `root` and its immediate sub-directories.
    pub fn scan_blocking(root: &Path) -> Result<Self> {
        let mut sections = Vec::new();

        let root_title = root
            .file_name()
            .map_or_else(|| root.display().to_string(), |n| n.to_string_lossy().into_owned());
        let root_items = scan_directory(root)?;
        if !root_items.is_empty() {
            sections.push(Section {
                title: root_title,
                items: root_items,
            });
        }

        let mut subdirectories: Vec<PathBuf> = std::fs::read_dir(root)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_dir())
            .collect();
        subdirectories.sort();

        for directory in subdirectories {
            let items = match scan_directory(&directory) {
                Ok(items) => items,
                Err(error) => {
                    tracing::warn!(path = %directory.display(), %error, "skipping directory");
                    continue;
                }
            };
            if items.is_empty() {
                continue;
            }
            let title = directory
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            sections.push(Section { title, items });
        }

        let library = Self { sections };
        tracing::info!(
            root = %root.display(),
            sections = library.sections.len(),
            items = library.total_count(),
            "library scanned"
        );
        Ok(library)
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn get(&self, address: IndexPath) -> Option<&Arc<FsItem>> {
        self.sections.get(address.section)?.items.get(address.row)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|section| section.items.is_empty())
    }

    /// Drops the item at `address` from the library. Files on disk are kept.
    pub fn remove(&mut self, address: IndexPath) -> Option<Arc<FsItem>> {
        let section = self.sections.get_mut(address.section)?;
        if address.row >= section.items.len() {
            return None;
        }
        let removed = section.items.remove(address.row);
        if section.items.is_empty() {
            self.sections.remove(address.section);
        }
        Some(removed)
    }
}

impl DataSource for Library {
    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, |s| s.items.len())
    }

    fn item(&self, address: IndexPath) -> Option<Arc<dyn ViewableItem>> {
        self.get(address)
            .map(|item| Arc::clone(item) as Arc<dyn ViewableItem>)
    }
}

fn scan_directory(directory: &Path) -> Result<Vec<Arc<FsItem>>> {
    let mut paths: Vec<(PathBuf, MediaKind)> = Vec::new();
    for entry in std::fs::read_dir(directory)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(kind) = media_kind(&path) {
            paths.push((path, kind));
        }
    }
    paths.sort_by(|a, b| a.0.cmp(&b.0));

    let mut items = Vec::with_capacity(paths.len());
    for (path, kind) in paths {
        let thumbnail = match kind {
            MediaKind::Image => match load_artwork(&path, Some(THUMBNAIL_SIZE)) {
                Ok(artwork) => artwork,
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "skipping unreadable image");
                    continue;
                }
            },
            MediaKind::Video => video_placeholder(),
        };
        items.push(Arc::new(FsItem {
            path,
            kind,
            thumbnail,
        }));
    }
    Ok(items)
}

fn media_kind(path: &Path) -> Option<MediaKind> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        Some(MediaKind::Image)
    } else if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// Decodes the image at `path`, downscaled to fit `max_edge` when given.
pub fn load_artwork(
    path: &Path,
    max_edge: Option<u32>,
) -> std::result::Result<Artwork, MediaError> {
    let image = image_rs::open(path).map_err(media_error)?;
    let image = match max_edge {
        Some(edge) if image.width() > edge || image.height() > edge => image.thumbnail(edge, edge),
        _ => image,
    };
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    #[allow(clippy::cast_precision_loss)]
    let size = Size::new(width as f32, height as f32);
    Ok(Artwork::new(
        Handle::from_rgba(width, height, rgba.into_raw()),
        size,
    ))
}

fn media_error(error: image_rs::ImageError) -> MediaError {
    match error {
        image_rs::ImageError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
            MediaError::NotFound
        }
        image_rs::ImageError::IoError(e) => MediaError::Io(e.to_string()),
        image_rs::ImageError::Unsupported(_) => MediaError::UnsupportedFormat,
        other => MediaError::Decode(other.to_string()),
    }
}

/// Dark 16:9 frame shown for videos.
fn video_placeholder() -> Artwork {
    const WIDTH: u32 = 16;
    const HEIGHT: u32 = 9;
    let pixels = [40_u8, 40, 46, 255].repeat((WIDTH * HEIGHT) as usize);
    Artwork::new(
        Handle::from_rgba(WIDTH, HEIGHT, pixels),
        Size::new(16.0, 9.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_png(path: &Path, width: u32, height: u32) {
        image_rs::RgbaImage::new(width, height)
            .save(path)
            .expect("write png");
    }

    #[test]
    fn scan_groups_root_and_subdirectories() {
        let dir = tempdir().expect("tempdir");
        write_png(&dir.path().join("b.png"), 4, 4);
        write_png(&dir.path().join("a.png"), 4, 4);
        std::fs::write(dir.path().join("notes.txt"), "not media").expect("write txt");
        std::fs::create_dir(dir.path().join("trip")).expect("mkdir");
        write_png(&dir.path().join("trip").join("c.png"), 4, 4);
        std::fs::write(dir.path().join("trip").join("clip.mp4"), b"").expect("write mp4");
        std::fs::create_dir(dir.path().join("empty")).expect("mkdir");

        let library = Library::scan_blocking(dir.path()).expect("scan");

        assert_eq!(library.section_count(), 2);
        assert_eq!(library.item_count(0), 2);
        assert_eq!(library.sections()[1].title, "trip");
        assert_eq!(library.get(IndexPath::new(0, 0)).map(|i| i.name()), Some("a.png".into()));
        let clip = library.get(IndexPath::new(1, 1)).expect("video item");
        assert_eq!(clip.kind(), MediaKind::Video);
        assert!(clip.url().is_some());
        assert!(library.item(IndexPath::new(2, 0)).is_none());
    }

    #[test]
    fn thumbnails_are_downscaled() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("wide.png");
        write_png(&path, 600, 300);

        let artwork = load_artwork(&path, Some(THUMBNAIL_SIZE)).expect("thumbnail");
        assert_eq!(artwork.size, Size::new(256.0, 128.0));

        let full = load_artwork(&path, None).expect("full");
        assert_eq!(full.size, Size::new(600.0, 300.0));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().expect("tempdir");
        let result = load_artwork(&dir.path().join("gone.png"), None);
        assert_eq!(result.err(), Some(MediaError::NotFound));
    }

    #[test]
    fn remove_drops_empty_sections() {
        let dir = tempdir().expect("tempdir");
        write_png(&dir.path().join("only.png"), 2, 2);
        let mut library = Library::scan_blocking(dir.path()).expect("scan");

        assert!(library.remove(IndexPath::new(0, 0)).is_some());
        assert!(library.is_empty());
        assert_eq!(library.section_count(), 0);
        assert!(library.remove(IndexPath::new(0, 0)).is_none());
    }

    #[tokio::test]
    async fn images_resolve_and_videos_report_unsupported() {
        let dir = tempdir().expect("tempdir");
        write_png(&dir.path().join("still.png"), 8, 6);
        std::fs::write(dir.path().join("movie.mov"), b"").expect("write mov");
        let library = Library::scan(dir.path().to_path_buf()).await.expect("scan");

        let movie = library.item(IndexPath::new(0, 0)).expect("movie");
        let still = library.item(IndexPath::new(0, 1)).expect("still");

        assert_eq!(movie.resolve_media().await.err(), Some(MediaError::UnsupportedFormat));
        let artwork = still.resolve_media().await.expect("decoded");
        assert_eq!(artwork.size, Size::new(8.0, 6.0));
    }
}
