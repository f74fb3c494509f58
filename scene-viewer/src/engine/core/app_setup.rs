use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;

// Core
use crate::engine::core::app_state::{
    LifecycleState, LoadingIndicatorEvent, SceneLifecycle, advance_lifecycle, begin_transition,
};
use crate::engine::core::debug_settings::DebugSettings;
use crate::engine::core::frame_driver::{FrameDriverPlugin, FrameSet};
use crate::engine::core::window_config::{cap_pixel_ratio, create_window_config};

// Loading and scene
use crate::engine::loading::asset_tracker::{AssetLoadTracker, track_asset_loading};
use crate::engine::loading::progress::{LoadCompleteEvent, LoadProgressEvent};
use crate::engine::loading::scene_loader::start_loading;
use crate::engine::scene::animation::start_scene_clips;
use crate::engine::scene::audio::spawn_ambient_music;

// Camera and points of interest
use crate::engine::camera::orbit_camera::{
    OrbitCamera, orbit_camera_controller, spawn_scene_camera,
};
use crate::engine::poi::markers::{apply_marker_state, enforce_show_points_flag, spawn_poi_markers};
use crate::engine::poi::registry::PointOfInterestRegistry;
use crate::engine::poi::visibility::resolve_points_of_interest;

// Overlays
use crate::engine::ui::OverlayTarget;
use crate::engine::ui::debug_panel::{
    debug_keyboard_controls, spawn_debug_panel, update_debug_panel,
};
use crate::engine::ui::loading_indicator::{
    fade_loading_indicator, handle_loading_indicator_events, spawn_loading_indicator,
    update_loading_indicator,
};
use crate::web::dom_overlay::{
    mirror_loading_indicator_events, mirror_loading_progress, mirror_markers,
};

// Web RPC
use crate::rpc::web_rpc::WebRpcPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<LifecycleState>()
        .add_plugins(FrameDriverPlugin)
        .add_plugins(WebRpcPlugin);

    // Session resources, decided once at startup
    app.init_resource::<SceneLifecycle>()
        .init_resource::<AssetLoadTracker>()
        .init_resource::<PointOfInterestRegistry>()
        .init_resource::<OrbitCamera>()
        .insert_resource(DebugSettings::detect())
        .insert_resource(OverlayTarget::detect())
        .add_event::<LoadProgressEvent>()
        .add_event::<LoadCompleteEvent>()
        .add_event::<LoadingIndicatorEvent>();

    app.add_systems(
        Startup,
        (
            start_loading,
            spawn_scene_camera,
            spawn_ambient_music,
            spawn_poi_markers,
            spawn_loading_indicator,
            spawn_debug_panel,
        ),
    );

    app.add_systems(
        Update,
        (advance_lifecycle, track_asset_loading, begin_transition)
            .chain()
            .in_set(FrameSet::Lifecycle),
    )
    .add_systems(
        Update,
        (
            orbit_camera_controller,
            cap_pixel_ratio,
            debug_keyboard_controls,
        )
            .in_set(FrameSet::Controls),
    )
    // Gated on Ready by the set itself
    .add_systems(
        Update,
        (start_scene_clips, resolve_points_of_interest).in_set(FrameSet::Interaction),
    )
    .add_systems(
        Update,
        (
            enforce_show_points_flag,
            (
                apply_marker_state,
                update_loading_indicator,
                handle_loading_indicator_events,
                fade_loading_indicator,
            )
                .run_if(resource_equals(OverlayTarget::Canvas)),
            (
                mirror_loading_progress,
                mirror_loading_indicator_events,
                mirror_markers,
            )
                .run_if(resource_equals(OverlayTarget::Dom)),
            update_debug_panel,
        )
            .chain()
            .in_set(FrameSet::Presentation),
    );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
