// SPDX-License-Identifier: MPL-2.0
//! Domain layer - viewer value types with no presentation logic.
//!
//! # Modules
//!
//! - [`address`]: Two-level item address ([`IndexPath`](address::IndexPath))
//! - [`item`]: Viewable media ([`ViewableItem`](item::ViewableItem),
//!   [`Artwork`](item::Artwork), [`MediaError`](item::MediaError))
//! - [`platform`]: Input capability sets ([`Platform`](platform::Platform),
//!   [`Capabilities`](platform::Capabilities))
//! - [`playback`]: Video playback state machine and subscriptions
//!   ([`PlaybackSession`](playback::PlaybackSession))

pub mod address;
pub mod item;
pub mod platform;
pub mod playback;
