pub mod camera;
pub mod core;
pub mod loading;
pub mod poi;
pub mod scene;
pub mod ui;
