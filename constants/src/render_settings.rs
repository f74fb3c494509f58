/// Diameter of a canvas marker in logical pixels.
pub const MARKER_SIZE: f32 = 40.0;

pub const MARKER_FONT_SIZE: f32 = 14.0;

/// Height of the canvas loading bar in logical pixels.
pub const LOADING_BAR_HEIGHT: f32 = 2.0;

pub const LOADING_PERCENTAGE_FONT_SIZE: f32 = 16.0;

pub const DEBUG_PANEL_FONT_SIZE: f32 = 14.0;

pub const MUSIC_VOLUME: f32 = 0.5;
