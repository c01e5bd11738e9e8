// SPDX-License-Identifier: MPL-2.0
//! Zoom scale of a single item.

use crate::config::{DOUBLE_TAP_ZOOM_SCALE, MAX_ZOOM_SCALE, MIN_ZOOM_SCALE};

/// Zoom scale, guaranteed to be within the valid range (1x–4x).
///
/// At 1x the item is fitted to the viewport. Anything above it counts as
/// zoomed, which blocks paging and drag-to-dismiss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomScale(f32);

impl ZoomScale {
    /// Creates a new scale, clamping the value to the valid range.
    #[must_use]
    pub fn new(scale: f32) -> Self {
        Self(scale.clamp(MIN_ZOOM_SCALE, MAX_ZOOM_SCALE))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    #[must_use]
    pub fn is_zoomed(self) -> bool {
        self.0 > MIN_ZOOM_SCALE
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_ZOOM_SCALE
    }

    /// Double-tap behaviour: zoom in when fitted, back to fit otherwise.
    #[must_use]
    pub fn toggled(self) -> Self {
        if self.is_zoomed() {
            Self::default()
        } else {
            Self::new(DOUBLE_TAP_ZOOM_SCALE)
        }
    }

    /// Multiplies the scale, e.g. for wheel or pinch input.
    #[must_use]
    pub fn scaled_by(self, factor: f32) -> Self {
        Self::new(self.0 * factor)
    }
}

impl Default for ZoomScale {
    fn default() -> Self {
        Self(MIN_ZOOM_SCALE)
    }
}
