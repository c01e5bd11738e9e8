// SPDX-License-Identifier: MPL-2.0
//! Navigation across the host collection's two-level addresses.

pub mod addressing;

pub use addressing::IndexPathMap;
