// SPDX-License-Identifier: MPL-2.0
//! Interfaces between the viewer and the host application.
//!
//! The viewer borrows its collaborators per call instead of storing them, so
//! the host keeps sole ownership of its items, its collection view and its
//! chrome widgets.
//!
//! - [`DataSource`]: items by address (consumed)
//! - [`HostCollection`]: thumbnail frames and cell visibility (consumed)
//! - [`ViewerDelegate`]: focus/dismiss/failure notifications (exposed)
//! - [`ChromeOverlay`]: header and footer widgets (consumed)

mod chrome;
mod collection;
mod delegate;

pub use chrome::ChromeOverlay;
pub use collection::{DataSource, HostCollection};
pub use delegate::ViewerDelegate;
