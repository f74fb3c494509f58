//! Compile-time tunables shared by the scene viewer.

pub mod camera;
pub mod materials;
pub mod path;
pub mod points_of_interest;
pub mod render_settings;
pub mod timing;
