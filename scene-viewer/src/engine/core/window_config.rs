use bevy::prelude::*;
use bevy::window::{PresentMode, PrimaryWindow};

use constants::camera::MAX_PIXEL_RATIO;

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some(constants::path::CANVAS_SELECTOR.into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Scene Viewer".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}

pub fn capped_pixel_ratio(device_pixel_ratio: f32) -> f32 {
    device_pixel_ratio.min(MAX_PIXEL_RATIO)
}

/// Keeps the render scale at or below the pixel ratio cap, including after
/// the window moves to a denser display.
pub fn cap_pixel_ratio(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    let base = window.resolution.base_scale_factor();
    let wanted = if base > MAX_PIXEL_RATIO {
        Some(capped_pixel_ratio(base))
    } else {
        None
    };

    if window.resolution.scale_factor_override() != wanted {
        debug!("Pixel ratio {base} capped to {wanted:?}");
        window.resolution.set_scale_factor_override(wanted);
    }
}
