use bevy::gltf::Gltf;
use bevy::prelude::*;

use constants::path::{
    BAKED_TEXTURE_PATH, BLANKET_TEXTURE_PATH, BLOODSTAIN_TEXTURE_PATH, MODEL_PATH,
    OUTLINE_TEXTURE_PATH,
};

use crate::engine::loading::asset_tracker::AssetLoadTracker;
use crate::engine::scene::materials::{SceneMaterials, apply_scene_materials};

/// Handles for everything the scene needs, kept for the whole session.
#[derive(Resource, Debug, Clone)]
pub struct SceneAssets {
    pub model: Handle<Gltf>,
    pub baked_texture: Handle<Image>,
    pub outline_texture: Handle<Image>,
    pub bloodstain_texture: Handle<Image>,
    pub blanket_texture: Handle<Image>,
}

impl SceneAssets {
    /// Registers every handle with the tracker, textures first.
    pub fn track(&self, tracker: &mut AssetLoadTracker) {
        tracker.track(BAKED_TEXTURE_PATH, &self.baked_texture);
        tracker.track(OUTLINE_TEXTURE_PATH, &self.outline_texture);
        tracker.track(BLOODSTAIN_TEXTURE_PATH, &self.bloodstain_texture);
        tracker.track(BLANKET_TEXTURE_PATH, &self.blanket_texture);
        tracker.track(MODEL_PATH, &self.model);
    }
}

/// Root of the spawned model hierarchy.
#[derive(Component)]
pub struct LoadedScene;

// Issue every tracked load, build materials and spawn the model root.
pub fn start_loading(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut tracker: ResMut<AssetLoadTracker>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let assets = SceneAssets {
        model: asset_server.load(MODEL_PATH),
        baked_texture: asset_server.load(BAKED_TEXTURE_PATH),
        outline_texture: asset_server.load(OUTLINE_TEXTURE_PATH),
        bloodstain_texture: asset_server.load(BLOODSTAIN_TEXTURE_PATH),
        blanket_texture: asset_server.load(BLANKET_TEXTURE_PATH),
    };

    assets.track(&mut tracker);

    info!("Loading scene assets:");
    info!("  Model: {}", MODEL_PATH);
    info!("  Baked: {}", BAKED_TEXTURE_PATH);
    info!("  Outline: {}", OUTLINE_TEXTURE_PATH);
    info!("  Bloodstain: {}", BLOODSTAIN_TEXTURE_PATH);
    info!("  Blanket: {}", BLANKET_TEXTURE_PATH);

    commands.insert_resource(SceneMaterials::new(&mut materials, &assets));

    commands
        .spawn((
            SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(MODEL_PATH))),
            LoadedScene,
        ))
        .observe(apply_scene_materials);

    commands.insert_resource(assets);
}
