// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the viewer. Constants are organized by category.
//!
//! # Categories
//!
//! - **Presentation**: Open/close/snap-back animation timings
//! - **Dismissal**: Drag-to-dismiss thresholds
//! - **Paging**: Swipe commit thresholds and load window
//! - **Cache**: Item controller cache capacity
//! - **Zoom**: Per-item zoom bounds

// ==========================================================================
// Presentation Defaults
// ==========================================================================

/// Duration of the open transition (thumbnail to full screen), in milliseconds.
pub const DEFAULT_OPEN_DURATION_MS: u64 = 250;

/// Duration of the close transition (full screen back to thumbnail), in milliseconds.
pub const DEFAULT_CLOSE_DURATION_MS: u64 = 250;

/// Duration of the snap-back animation after a cancelled drag, in milliseconds.
pub const DEFAULT_SNAP_BACK_DURATION_MS: u64 = 200;

/// Duration of the header/footer fade, in milliseconds.
pub const DEFAULT_CHROME_FADE_MS: u64 = 300;

/// Upper bound for any configurable animation duration, in milliseconds.
pub const MAX_ANIMATION_DURATION_MS: u64 = 2_000;

// ==========================================================================
// Dismissal Defaults
// ==========================================================================

/// Distance (points) the item center must travel past the vertical middle
/// before releasing a drag dismisses the viewer.
pub const DEFAULT_DISMISS_MARGIN: f32 = 60.0;

/// Background alpha lost per half-height of vertical drag.
pub const DEFAULT_DRAG_ALPHA_COEFFICIENT: f32 = 2.5;

// ==========================================================================
// Paging Defaults
// ==========================================================================

/// Fraction of the page width a swipe must cover to commit to the neighbour.
pub const DEFAULT_PAGE_COMMIT_FRACTION: f32 = 0.3;

/// Minimum allowed commit fraction.
pub const MIN_PAGE_COMMIT_FRACTION: f32 = 0.05;

/// Maximum allowed commit fraction.
pub const MAX_PAGE_COMMIT_FRACTION: f32 = 0.9;

/// Release velocity (points per second) that commits a swipe regardless of distance.
pub const PAGE_FLING_VELOCITY: f32 = 500.0;

/// Number of pages kept loaded by the continuous strategy (current plus neighbours).
pub const PAGE_LOAD_WINDOW: usize = 3;

/// Duration of the page settle animation, in milliseconds.
pub const PAGE_SETTLE_DURATION_MS: u64 = 220;

/// Fraction of the pointer travel applied when swiping past the first or last page.
pub const PAGE_EDGE_RESISTANCE: f32 = 0.3;

// ==========================================================================
// Cache Defaults
// ==========================================================================

/// Default number of item controllers kept alive.
pub const DEFAULT_CACHE_CAPACITY: usize = 16;

/// Minimum controller cache capacity; must cover the paging window.
pub const MIN_CACHE_CAPACITY: usize = PAGE_LOAD_WINDOW;

/// Maximum controller cache capacity.
pub const MAX_CACHE_CAPACITY: usize = 256;

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Zoom scale of an unzoomed item.
pub const MIN_ZOOM_SCALE: f32 = 1.0;

/// Maximum zoom scale.
pub const MAX_ZOOM_SCALE: f32 = 4.0;

/// Zoom scale reached by a double tap on an unzoomed item.
pub const DOUBLE_TAP_ZOOM_SCALE: f32 = 2.5;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Pointer travel (points) before a press becomes a pan.
pub const PAN_SLOP: f32 = 8.0;

/// Press duration after which a stationary press is a long press, in milliseconds.
pub const LONG_PRESS_MS: u64 = 500;

/// Maximum delay between two taps forming a double tap, in milliseconds.
pub const DOUBLE_TAP_MS: u64 = 350;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_DISMISS_MARGIN > 0.0);
    assert!(DEFAULT_DRAG_ALPHA_COEFFICIENT > 0.0);

    assert!(MIN_PAGE_COMMIT_FRACTION > 0.0);
    assert!(MAX_PAGE_COMMIT_FRACTION < 1.0);
    assert!(DEFAULT_PAGE_COMMIT_FRACTION >= MIN_PAGE_COMMIT_FRACTION);
    assert!(DEFAULT_PAGE_COMMIT_FRACTION <= MAX_PAGE_COMMIT_FRACTION);

    assert!(MIN_CACHE_CAPACITY > 0);
    assert!(DEFAULT_CACHE_CAPACITY >= MIN_CACHE_CAPACITY);
    assert!(DEFAULT_CACHE_CAPACITY <= MAX_CACHE_CAPACITY);

    assert!(MIN_ZOOM_SCALE < DOUBLE_TAP_ZOOM_SCALE);
    assert!(DOUBLE_TAP_ZOOM_SCALE <= MAX_ZOOM_SCALE);

    assert!(DEFAULT_OPEN_DURATION_MS <= MAX_ANIMATION_DURATION_MS);
    assert!(DEFAULT_CLOSE_DURATION_MS <= MAX_ANIMATION_DURATION_MS);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismissal_defaults_match_reference_behavior() {
        assert_eq!(DEFAULT_DISMISS_MARGIN, 60.0);
        assert_eq!(DEFAULT_DRAG_ALPHA_COEFFICIENT, 2.5);
    }

    #[test]
    fn cache_capacity_covers_load_window() {
        assert!(MIN_CACHE_CAPACITY >= PAGE_LOAD_WINDOW);
        assert!(DEFAULT_CACHE_CAPACITY >= PAGE_LOAD_WINDOW);
    }

    #[test]
    fn commit_fraction_defaults_are_valid() {
        assert!(DEFAULT_PAGE_COMMIT_FRACTION >= MIN_PAGE_COMMIT_FRACTION);
        assert!(DEFAULT_PAGE_COMMIT_FRACTION <= MAX_PAGE_COMMIT_FRACTION);
    }
}
