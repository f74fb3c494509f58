//! JSON-RPC 2.0 bridge to a page embedding the viewer.
//!
//! Requests and notifications travel over `postMessage`:
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Viewer (iframe)
//!        │                                          │
//!        ├─ Request (with ID) ────────────────────> │
//!        │ <─────────────────── Response (with ID) ─┤
//!        │ <──────────── Notification (no ID) ──────┤
//! ```
//!
//! ## Methods
//!
//! - `get_points_of_interest`: `{ show_points, points: [{ id, position }] }`
//! - `set_points_of_interest_visible` `{ visible }`: `{ show_points }`
//! - `set_point_position` `{ id, x?, y?, z? }`: `{ id, position }`, clamped
//!   and snapped like any other anchor edit
//! - `get_load_progress`: `{ items_loaded, items_total, ratio, percentage, state }`
//!
//! ## Notifications
//!
//! - `loading_progress`: one per finished tracked asset
//! - `scene_ready`: once, when the scene starts accepting interaction
//!
//! Errors use `-32601` (method not found) and `-32602` (invalid params).
//! Outside wasm no listener is installed and nothing is posted.

/// Request handling, notification queue and the `postMessage` transport.
pub mod web_rpc;
