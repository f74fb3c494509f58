//! Browser page integration.
//!
//! Everything here compiles on every target; outside wasm the DOM calls are
//! no-ops and no element ever exists, so the canvas overlays are used.

/// Thin helpers over `web-sys` for querying and mutating page elements.
pub mod dom;

/// Systems mirroring loading progress and marker state into the host page.
pub mod dom_overlay;
