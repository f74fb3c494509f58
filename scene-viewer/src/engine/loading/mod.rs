//! Asset loading and progress tracking for the scene.
//!
//! Issues every load at startup, aggregates their state into a single
//! progress value and signals completion exactly once.

/// Polls tracked handles and emits progress and completion events.
pub mod asset_tracker;

/// Progress value, label formatting and the loading events.
pub mod progress;

/// Startup loads for the model and textures, and the scene root spawn.
pub mod scene_loader;
