// SPDX-License-Identifier: MPL-2.0
//! Input platforms and the capability sets they enable.
//!
//! Input handling checks [`Capabilities`] instead of branching on the target
//! operating system, so the same viewer runs with pointer/touch input or with
//! a directional remote.

use serde::{Deserialize, Serialize};

/// Input platform selected once at startup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    /// Pointer or touch input: drags, taps and long presses.
    #[default]
    Touch,
    /// Directional remote: left/right paging, select and menu buttons.
    Remote,
}

impl Platform {
    #[must_use]
    pub fn capabilities(self) -> Capabilities {
        match self {
            Platform::Touch => Capabilities {
                interactive_dismiss: true,
                tap_toggles_chrome: true,
                long_press: true,
                swipe_paging: true,
                directional_input: false,
                menu_dismisses: false,
            },
            Platform::Remote => Capabilities {
                interactive_dismiss: false,
                tap_toggles_chrome: false,
                long_press: false,
                swipe_paging: false,
                directional_input: true,
                menu_dismisses: true,
            },
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "touch" => Ok(Self::Touch),
            "remote" => Ok(Self::Remote),
            other => Err(format!("unknown platform: {other}")),
        }
    }
}

/// What the viewer may do with the input it receives.
// Orthogonal feature flags; an enum would not express combinations.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Vertical drags on the focused item can dismiss the viewer.
    pub interactive_dismiss: bool,
    /// Tapping the item toggles header/footer visibility.
    pub tap_toggles_chrome: bool,
    /// Holding a press reports a long press to the delegate.
    pub long_press: bool,
    /// Horizontal drags page between items.
    pub swipe_paging: bool,
    /// Left/right buttons page between items; select toggles chrome.
    pub directional_input: bool,
    /// The menu button dismisses the viewer.
    pub menu_dismisses: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Platform::default().capabilities()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_supports_gestures_but_not_directional_input() {
        let caps = Platform::Touch.capabilities();
        assert!(caps.interactive_dismiss);
        assert!(caps.swipe_paging);
        assert!(!caps.directional_input);
    }

    #[test]
    fn remote_supports_directional_input_only() {
        let caps = Platform::Remote.capabilities();
        assert!(caps.directional_input);
        assert!(caps.menu_dismisses);
        assert!(!caps.interactive_dismiss);
        assert!(!caps.long_press);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Remote".parse::<Platform>(), Ok(Platform::Remote));
        assert!("watch".parse::<Platform>().is_err());
    }
}
