// SPDX-License-Identifier: MPL-2.0
//! Demo host: a thumbnail grid over a directory that opens the viewer.
//!
//! `App` owns the library, the grid and the viewer and lends the first two
//! to the viewer on every operation. It implements the viewer's header and
//! footer itself, while the notifications it receives are recorded by a
//! separate delegate so they can be borrowed mutably alongside the viewer.

pub mod chrome;
mod delegate;
pub mod grid;
pub mod library;
mod message;
mod subscription;
mod update;
mod view;

pub use delegate::Presentation;
pub use message::{Flags, Message, RemoteButton};

use crate::domain::item::ItemId;
use crate::viewer::{Viewer, ViewerSettings};
use grid::Grid;
use iced::{window, Size, Subscription, Task, Theme};
use library::Library;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

pub const WINDOW_DEFAULT_WIDTH: f32 = 1024.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 768.0;
pub const MIN_WINDOW_WIDTH: f32 = 480.0;
pub const MIN_WINDOW_HEIGHT: f32 = 360.0;

/// Height of the strip above the grid.
pub const STATUS_BAR_HEIGHT: f32 = 24.0;

/// Root application state.
pub struct App {
    viewer: Viewer,
    library: Library,
    grid: Grid,
    presentation: Presentation,
    favourites: HashSet<ItemId>,
    root: Option<PathBuf>,
    loading: bool,
    error: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("root", &self.root)
            .field("viewer_active", &self.viewer.is_active())
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 wants an `Fn` boot closure; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Builds the initial state and starts scanning the library.
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let mut settings = ViewerSettings::from(&flags.config);
        if let Some(platform) = flags.platform {
            settings.platform = platform;
        }
        if let Some(strategy) = flags.strategy {
            settings.paging.strategy = strategy;
        }
        tracing::info!(
            platform = ?settings.platform,
            strategy = ?settings.paging.strategy,
            cache = settings.cache_capacity,
            "viewer configured"
        );

        let window = Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT);
        let app = Self {
            viewer: Viewer::new(settings, window),
            library: Library::default(),
            grid: Grid::new(window, STATUS_BAR_HEIGHT),
            presentation: Presentation::default(),
            favourites: HashSet::new(),
            loading: flags.root.is_some(),
            root: flags.root.clone(),
            error: None,
        };

        let task = match flags.root {
            Some(root) => Task::perform(Library::scan(root), Message::LibraryLoaded),
            None => Task::none(),
        };
        (app, task)
    }

    pub fn title(&self) -> String {
        let focused = self
            .presentation
            .focused()
            .and_then(|address| self.library.get(address));
        match focused {
            Some(item) => format!("{} - Lightbox", item.name()),
            None => "Lightbox".to_string(),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_frame_subscription(self.viewer.is_animating(Instant::now())),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, PresentationConfig};
    use crate::domain::address::IndexPath;
    use crate::port::DataSource;
    use std::path::Path;
    use tempfile::tempdir;

    fn instant_config() -> Config {
        Config {
            presentation: PresentationConfig {
                open_duration_ms: Some(0),
                close_duration_ms: Some(0),
                snap_back_duration_ms: Some(0),
                chrome_fade_ms: Some(0),
                ..PresentationConfig::default()
            },
            ..Config::default()
        }
    }

    fn loaded(root: &Path) -> App {
        for name in ["a.png", "b.png", "c.png"] {
            image_rs::RgbaImage::new(6, 4)
                .save(root.join(name))
                .expect("write png");
        }
        let (mut app, _) = App::new(Flags {
            root: Some(root.to_path_buf()),
            config: instant_config(),
            ..Flags::default()
        });
        assert!(app.loading);
        let library = Library::scan_blocking(root).expect("scan");
        let _ = app.update(Message::LibraryLoaded(Ok(library)));
        app
    }

    #[test]
    fn title_shows_app_name_without_focus() {
        let (app, _) = App::new(Flags::default());
        assert!(!app.loading);
        assert_eq!(app.title(), "Lightbox");
    }

    #[test]
    fn thumbnail_press_presents_and_close_restores_the_cell() {
        let dir = tempdir().expect("tempdir");
        let mut app = loaded(dir.path());
        let address = IndexPath::new(0, 1);

        let _ = app.update(Message::ThumbnailPressed(address));
        assert!(app.viewer.is_active());
        assert_eq!(app.grid.alpha(address), 0.0);

        let _ = app.update(Message::Frame(Instant::now()));
        assert_eq!(app.presentation.focused(), Some(address));
        assert_eq!(app.title(), "b.png - Lightbox");

        let _ = app.update(Message::CloseViewer);
        let _ = app.update(Message::Frame(Instant::now()));
        assert!(!app.viewer.is_active());
        assert_eq!(app.grid.alpha(address), 1.0);
        assert_eq!(app.presentation.focused(), None);
    }

    #[test]
    fn removing_the_focused_item_closes_the_viewer() {
        let dir = tempdir().expect("tempdir");
        let mut app = loaded(dir.path());
        let address = IndexPath::new(0, 0);

        let _ = app.update(Message::ThumbnailPressed(address));
        let _ = app.update(Message::Frame(Instant::now()));
        let _ = app.update(Message::RemoveItem(address));

        assert!(!app.viewer.is_active());
        assert_eq!(app.library.total_count(), 2);
        assert_eq!(app.grid.alpha(address), 1.0);
    }

    #[test]
    fn favourites_toggle_by_item() {
        let dir = tempdir().expect("tempdir");
        let mut app = loaded(dir.path());
        let address = IndexPath::new(0, 2);

        let _ = app.update(Message::ToggleFavourite(address));
        assert_eq!(app.favourites.len(), 1);
        let _ = app.update(Message::ToggleFavourite(address));
        assert!(app.favourites.is_empty());
    }

    #[test]
    fn scan_failure_is_shown() {
        let (mut app, _) = App::new(Flags {
            root: Some(PathBuf::from("/nonexistent")),
            ..Flags::default()
        });
        let _ = app.update(Message::LibraryLoaded(Err(crate::error::Error::Io(
            "no such directory".into(),
        ))));
        assert!(!app.loading);
        assert!(app.error.is_some());
    }
}
