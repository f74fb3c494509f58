use bevy::gltf::Gltf;
use bevy::prelude::*;

use crate::engine::loading::scene_loader::{LoadedScene, SceneAssets};
use crate::engine::scene::materials::collect_descendants;

/// Marks a scene root whose clips have been started.
#[derive(Component)]
pub struct ClipsStarted;

/// One graph node per clip, in clip order.
pub fn build_clip_graph(
    clips: &[Handle<AnimationClip>],
) -> (AnimationGraph, Vec<AnimationNodeIndex>) {
    AnimationGraph::from_clips(clips.iter().cloned())
}

/// Starts every clip in the model on a loop. Retries each frame until the
/// scene instance has spawned its players.
pub fn start_scene_clips(
    mut commands: Commands,
    scene_assets: Option<Res<SceneAssets>>,
    gltfs: Res<Assets<Gltf>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    scenes: Query<Entity, (With<LoadedScene>, Without<ClipsStarted>)>,
    children: Query<&Children>,
    mut players: Query<&mut AnimationPlayer>,
) {
    let Some(scene_assets) = scene_assets else {
        return;
    };

    for scene in &scenes {
        let Some(gltf) = gltfs.get(&scene_assets.model) else {
            // Model failed to load; nothing will ever play.
            commands.entity(scene).insert(ClipsStarted);
            continue;
        };

        if gltf.animations.is_empty() {
            info!("Scene has no animation clips");
            commands.entity(scene).insert(ClipsStarted);
            continue;
        }

        let player_entities: Vec<Entity> = collect_descendants(scene, &children)
            .into_iter()
            .filter(|entity| players.contains(*entity))
            .collect();
        if player_entities.is_empty() {
            continue;
        }

        let (graph, nodes) = build_clip_graph(&gltf.animations);
        let graph = graphs.add(graph);

        for entity in player_entities {
            let Ok(mut player) = players.get_mut(entity) else {
                continue;
            };
            for node in &nodes {
                player.play(*node).repeat();
            }
            commands
                .entity(entity)
                .insert(AnimationGraphHandle(graph.clone()));
        }

        commands.entity(scene).insert(ClipsStarted);
        info!("→ Playing {} animation clips", nodes.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_has_a_node_per_clip() {
        let clips = vec![
            Handle::<AnimationClip>::weak_from_u128(1),
            Handle::<AnimationClip>::weak_from_u128(2),
            Handle::<AnimationClip>::weak_from_u128(3),
        ];
        let (graph, nodes) = build_clip_graph(&clips);

        assert_eq!(nodes.len(), 3);
        for node in nodes {
            assert!(graph.get(node).is_some());
        }
    }

    #[test]
    fn no_clips_means_no_nodes() {
        let (_, nodes) = build_clip_graph(&[]);
        assert!(nodes.is_empty());
    }
}
