//! On-canvas overlays: loading indicator and debug panel.
//!
//! When the host page already provides the loading bar and marker elements
//! the canvas overlays are skipped and `crate::web::dom_overlay` mirrors the
//! same state into the page instead.

use bevy::prelude::*;

/// Canvas loading bar, percentage label and background.
pub mod loading_indicator;

/// Coordinate panel and keyboard controls behind the debug switch.
pub mod debug_panel;

/// Selector whose presence means the host page draws the overlays.
pub const DOM_LOADING_BAR_SELECTOR: &str = ".loading-bar";

/// Where the loading indicator and markers are presented. Decided once at
/// startup.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlayTarget {
    #[default]
    Canvas,
    Dom,
}

impl OverlayTarget {
    pub fn detect() -> Self {
        if crate::web::dom::element_exists(DOM_LOADING_BAR_SELECTOR) {
            info!("Host page provides overlays, mirroring state to the DOM");
            Self::Dom
        } else {
            Self::Canvas
        }
    }

    pub fn is_canvas(&self) -> bool {
        *self == Self::Canvas
    }
}
