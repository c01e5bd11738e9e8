// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Every viewer operation runs through [`App::drive`], which lends the viewer
//! the library and the grid, forwards the resulting effects to the
//! [`Presentation`](super::delegate::Presentation) delegate and turns media
//! requests into tasks.

use super::{App, Message, RemoteButton};
use crate::domain::address::IndexPath;
use crate::domain::item::ViewableItem;
use crate::ui::Input;
use crate::viewer::{dispatch, Context, Direction, Effect, ResolveRequest, Viewer};
use iced::Task;
use std::time::Instant;

impl App {
    /// Applies `message` and returns the follow-up work.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::LibraryLoaded(Ok(library)) => {
                self.library = library;
                self.loading = false;
                self.grid.sync(&self.library);
                Task::none()
            }
            Message::LibraryLoaded(Err(error)) => {
                tracing::error!(%error, "failed to scan library");
                self.loading = false;
                self.error = Some(error.to_string());
                Task::none()
            }
            Message::GridScrolled(viewport) => {
                self.grid.scrolled(&viewport);
                Task::none()
            }
            Message::ThumbnailPressed(address) => {
                self.drive(|viewer, ctx| viewer.present(address, ctx))
            }
            Message::Overlay(Input::Gesture(gesture)) => {
                self.drive(|viewer, ctx| viewer.gesture(gesture, ctx))
            }
            Message::Overlay(Input::Zoom(factor)) => {
                self.viewer.zoom_by(factor);
                Task::none()
            }
            Message::Remote(button) => self.remote(button),
            Message::Frame(_) => self.drive(Viewer::tick),
            Message::MediaResolved {
                address,
                item_id,
                result,
            } => {
                let effects = self.viewer.media_resolved(address, &item_id, result);
                self.apply(effects)
            }
            Message::WindowResized(size) => {
                self.viewer.set_viewport(size);
                self.grid.set_viewport(size);
                Task::none()
            }
            Message::CloseViewer => self.drive(Viewer::dismiss),
            Message::TogglePlayback => {
                if let Some(state) = self.viewer.toggle_playback() {
                    tracing::debug!(?state, "playback toggled");
                }
                Task::none()
            }
            Message::ToggleFavourite(address) => {
                self.toggle_favourite(address);
                Task::none()
            }
            Message::RemoveItem(address) => self.remove(address),
            Message::CopyPath(address) => {
                self.presentation.close_actions();
                match self.library.get(address) {
                    Some(item) => iced::clipboard::write(item.path().display().to_string()),
                    None => Task::none(),
                }
            }
            Message::DismissActions => {
                self.presentation.close_actions();
                Task::none()
            }
        }
    }

    /// Runs one viewer operation against the library and the grid.
    fn drive(
        &mut self,
        operation: impl FnOnce(&mut Viewer, &mut Context<'_>) -> Vec<Effect>,
    ) -> Task<Message> {
        let mut ctx = Context::new(&self.library, &mut self.grid, Instant::now());
        let effects = operation(&mut self.viewer, &mut ctx);
        self.apply(effects)
    }

    fn apply(&mut self, effects: Vec<Effect>) -> Task<Message> {
        let requests = dispatch(effects, &mut self.presentation);
        let resolutions = requests.into_iter().map(resolve);
        Task::batch(resolutions.chain(std::iter::once(self.grid.take_scroll())))
    }

    fn remote(&mut self, button: RemoteButton) -> Task<Message> {
        if !self.viewer.is_active() {
            return Task::none();
        }
        match button {
            RemoteButton::Left => {
                self.drive(|viewer, ctx| viewer.directional(Direction::Previous, ctx))
            }
            RemoteButton::Right => {
                self.drive(|viewer, ctx| viewer.directional(Direction::Next, ctx))
            }
            RemoteButton::Select => {
                let effects = self.viewer.select(Instant::now());
                self.apply(effects)
            }
            // Escape still closes the viewer on pointer platforms.
            RemoteButton::Menu if self.viewer.capabilities().menu_dismisses => {
                self.drive(Viewer::menu)
            }
            RemoteButton::Menu => self.drive(Viewer::dismiss),
            RemoteButton::PlayPause => {
                self.viewer.toggle_playback();
                Task::none()
            }
        }
    }

    fn toggle_favourite(&mut self, address: IndexPath) {
        let Some(item) = self.library.get(address) else {
            return;
        };
        let id = item.id();
        if !self.favourites.remove(&id) {
            tracing::info!(item = %id, "marked favourite");
            self.favourites.insert(id);
        }
    }

    /// Drops `address` from the library. The viewer is torn down first so
    /// the cell it hid is restored against the old layout.
    fn remove(&mut self, address: IndexPath) -> Task<Message> {
        let task = self.drive(Viewer::abort);
        if let Some(item) = self.library.remove(address) {
            tracing::info!(path = %item.path().display(), "removed from library");
        }
        self.presentation.forget_addresses();
        self.grid.sync(&self.library);
        task
    }
}

fn resolve(request: ResolveRequest) -> Task<Message> {
    let ResolveRequest {
        address,
        item_id,
        future,
    } = request;
    Task::perform(future, move |result| Message::MediaResolved {
        address,
        item_id: item_id.clone(),
        result,
    })
}
