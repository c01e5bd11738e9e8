// SPDX-License-Identifier: MPL-2.0
//! `iced_lightbox` is a full-screen photo and video viewer for Iced.
//!
//! A host application shows its media as a grid of thumbnails. Tapping one
//! flies it into a full-screen [`viewer::Viewer`] where the user pages
//! between items, zooms, and drags the item away to close it again. The
//! viewer talks to the host only through the traits in [`port`], so any
//! collection widget and any item type can drive it.
//!
//! The [`app`] module is a small demo host that browses a directory.

#![doc(html_root_url = "https://docs.rs/iced_lightbox/0.1.0")]

pub mod animation;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod navigation;
pub mod port;
pub mod ui;
pub mod viewer;
