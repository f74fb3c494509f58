/// Unlit material replacement for the loaded model, including the guarded
/// prop batch.
pub mod materials;

/// Plays the model's embedded clips once the scene is ready.
pub mod animation;

/// Looping background music.
pub mod audio;
