use bevy::math::Vec3;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8};

/// Vertical field of view in degrees.
pub const FIELD_OF_VIEW_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

pub const INITIAL_POSITION: Vec3 = Vec3::new(4.0, 5.0, 4.0);
pub const ORBIT_TARGET: Vec3 = Vec3::ZERO;

/// Polar angle is measured from +Y.
pub const MIN_POLAR_ANGLE: f32 = FRAC_PI_4;
pub const MAX_POLAR_ANGLE: f32 = FRAC_PI_2;

/// Azimuth is measured around +Y starting at +Z.
pub const MIN_AZIMUTH_ANGLE: f32 = -FRAC_PI_8;
pub const MAX_AZIMUTH_ANGLE: f32 = FRAC_PI_2;

pub const MIN_DISTANCE: f32 = 7.0;
pub const MAX_DISTANCE: f32 = 30.0;

/// Fraction of the pending orbit motion applied each frame.
pub const DAMPING_FACTOR: f32 = 0.05;

/// Radians of orbit per pixel of drag, relative to the viewport height.
pub const ROTATE_SPEED: f32 = 1.0;

/// Distance scale applied per wheel line.
pub const ZOOM_STEP: f32 = 0.95;

/// Upper bound for the device pixel ratio used by the renderer.
pub const MAX_PIXEL_RATIO: f32 = 2.0;
