//! Orbit camera around the crime scene.
//!
//! Left drag rotates, the wheel zooms. Motion is damped and held inside
//! fixed polar, azimuth and distance limits.

/// Orbit camera resource, camera spawn and the input controller system.
pub mod orbit_camera;
