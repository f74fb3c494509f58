//! Core application setup and state management.
//!
//! Handles the scene lifecycle, window configuration, per-frame ordering
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with asset loading, lifecycle, camera, marker
/// and overlay systems plus platform-specific configuration.
pub mod app_setup;

/// Scene lifecycle state machine and the timers that drive it.
///
/// Moves from loading through the delayed transition to the ready state.
pub mod app_state;

/// Runtime debug toggles derived from the URL fragment or command line.
pub mod debug_settings;

/// Ordered per-frame stages shared by every plugin.
pub mod frame_driver;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets, vsync and pixel ratio.
pub mod window_config;
