use bevy::prelude::*;

use crate::engine::poi::registry::Axis;

/// URL fragment (wasm) that reveals the debug surface.
pub const DEBUG_FRAGMENT: &str = "#debug";

/// Command line flag (native) that reveals the debug surface.
pub const DEBUG_FLAG: &str = "--debug";

/// Debug surface state. The surface is hidden unless requested at startup.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct DebugSettings {
    pub enabled: bool,
    pub selected_point: usize,
    pub selected_axis: Axis,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            selected_point: 0,
            selected_axis: Axis::X,
        }
    }
}

impl DebugSettings {
    pub fn detect() -> Self {
        let enabled = debug_requested();
        if enabled {
            info!("Debug surface enabled");
        }
        Self {
            enabled,
            ..default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn debug_requested() -> bool {
    crate::web::dom::location_hash().as_deref() == Some(DEBUG_FRAGMENT)
}

#[cfg(not(target_arch = "wasm32"))]
fn debug_requested() -> bool {
    args_request_debug(std::env::args().skip(1))
}

#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn args_request_debug<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .any(|arg| arg.as_ref() == DEBUG_FLAG || arg.as_ref() == DEBUG_FRAGMENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_is_recognised() {
        assert!(args_request_debug(["--debug"]));
        assert!(args_request_debug(["--windowed", "#debug"]));
        assert!(!args_request_debug(["--verbose"]));
        assert!(!args_request_debug(Vec::<String>::new()));
    }

    #[test]
    fn defaults_select_first_point_x_axis() {
        let settings = DebugSettings::default();
        assert!(!settings.enabled);
        assert_eq!(settings.selected_point, 0);
        assert_eq!(settings.selected_axis, Axis::X);
    }
}
