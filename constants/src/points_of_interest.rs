use bevy::math::Vec3;

/// Anchor positions of the scene markers, indexed by marker id.
pub const POINT_ANCHORS: [Vec3; 4] = [
    Vec3::new(-3.98, 1.69, -3.66),
    Vec3::new(2.8, 2.28, -2.87),
    Vec3::new(3.9, 0.78, 4.56),
    Vec3::new(-3.8, 1.69, 3.66),
];

/// Inclusive bounds for every anchor axis when edited at runtime.
pub const ANCHOR_AXIS_MIN: f32 = -5.0;
pub const ANCHOR_AXIS_MAX: f32 = 5.0;

/// Granularity of runtime anchor edits.
pub const ANCHOR_STEP: f32 = 0.01;

/// Markers are shown unless turned off from the debug surface.
pub const SHOW_POINTS_BY_DEFAULT: bool = true;
