//! Points of interest: anchors in the scene that are projected onto the
//! screen every frame and shown only while nothing occludes them.

/// Fixed point list, clamped anchor edits and the global show flag.
pub mod registry;

/// Per-frame projection snapshot, occlusion ray casts and the decision table.
pub mod visibility;

/// Marker entities, their per-frame state and canvas presentation.
pub mod markers;
