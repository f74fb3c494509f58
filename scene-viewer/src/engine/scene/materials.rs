use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use thiserror::Error;

use constants::materials::*;

use crate::engine::loading::scene_loader::SceneAssets;

/// Unlit materials assigned to the model once its instance is spawned.
#[derive(Resource, Debug, Clone)]
pub struct SceneMaterials {
    pub baked: Handle<StandardMaterial>,
    pub outline: Handle<StandardMaterial>,
    pub bloodstain: Handle<StandardMaterial>,
    pub black: Handle<StandardMaterial>,
    pub grey: Handle<StandardMaterial>,
    pub red: Handle<StandardMaterial>,
    pub blue: Handle<StandardMaterial>,
    pub white: Handle<StandardMaterial>,
    pub yellow: Handle<StandardMaterial>,
}

fn unlit_colour([r, g, b]: [u8; 3]) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgb_u8(r, g, b),
        unlit: true,
        ..default()
    }
}

fn unlit_texture(texture: Handle<Image>, transparent: bool) -> StandardMaterial {
    StandardMaterial {
        base_color_texture: Some(texture),
        unlit: true,
        alpha_mode: if transparent {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        },
        ..default()
    }
}

impl SceneMaterials {
    pub fn new(materials: &mut Assets<StandardMaterial>, assets: &SceneAssets) -> Self {
        Self {
            baked: materials.add(unlit_texture(assets.baked_texture.clone(), false)),
            outline: materials.add(unlit_texture(assets.outline_texture.clone(), true)),
            bloodstain: materials.add(unlit_texture(assets.bloodstain_texture.clone(), true)),
            black: materials.add(unlit_colour(BLACK)),
            grey: materials.add(unlit_colour(GREY)),
            red: materials.add(unlit_colour(RED)),
            blue: materials.add(unlit_colour(BLUE)),
            white: materials.add(unlit_colour(WHITE)),
            yellow: materials.add(unlit_colour(YELLOW)),
        }
    }

    /// Props and light emitters. Applied only when every mesh resolves.
    pub fn prop_batch(&self) -> Vec<(&'static str, Handle<StandardMaterial>)> {
        vec![
            (PROOF_CARD_ONE_MESH, self.black.clone()),
            (QUEENS_MESH, self.black.clone()),
            (BRIDGE_MESH, self.black.clone()),
            (MURDERERS_MESH, self.black.clone()),
            (PROOF_CARD_TWO_MESH, self.black.clone()),
            (NEON_SIGN_MESH, self.red.clone()),
            (COP_LIGHT_CENTER_MESH, self.grey.clone()),
            (COP_LIGHT_BLUE_MESH, self.blue.clone()),
            (COP_LIGHT_RED_MESH, self.red.clone()),
            (DINER_LIGHT_MESH, self.yellow.clone()),
            (LANTERN_MESH, self.white.clone()),
        ]
    }

    /// Meshes assigned one by one; each is skipped when absent.
    pub fn individual_assignments(&self) -> Vec<(&'static str, Handle<StandardMaterial>)> {
        vec![
            (CHALK_LINE_MESH, self.outline.clone()),
            (BLOOD_MESH, self.bloodstain.clone()),
            (BLANKET_MESH, self.grey.clone()),
        ]
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("material batch skipped, unresolved meshes: {missing:?}")]
pub struct MissingMeshes {
    pub missing: Vec<&'static str>,
}

/// `root` and all of its descendants, depth first.
pub fn collect_descendants(root: Entity, children: &Query<&Children>) -> Vec<Entity> {
    let mut found = Vec::new();
    let mut stack = vec![root];
    while let Some(entity) = stack.pop() {
        found.push(entity);
        if let Ok(entity_children) = children.get(entity) {
            stack.extend_from_slice(entity_children);
        }
    }
    found
}

/// Finds the node called `name` in the hierarchy under `scene`.
pub fn find_named_mesh(
    scene: Entity,
    name: &str,
    names: &Query<&Name>,
    children: &Query<&Children>,
) -> Option<Entity> {
    collect_descendants(scene, children)
        .into_iter()
        .find(|entity| {
            names
                .get(*entity)
                .is_ok_and(|entity_name| entity_name.as_str() == name)
        })
}

/// Resolves every name in `batch` or none of them.
pub fn resolve_batch(
    batch: &[&'static str],
    mut lookup: impl FnMut(&str) -> Option<Entity>,
) -> Result<Vec<Entity>, MissingMeshes> {
    let resolved: Vec<Option<Entity>> = batch.iter().map(|name| lookup(name)).collect();

    let missing: Vec<&'static str> = batch
        .iter()
        .zip(&resolved)
        .filter(|(_, entity)| entity.is_none())
        .map(|(name, _)| *name)
        .collect();

    if !missing.is_empty() {
        return Err(MissingMeshes { missing });
    }

    Ok(resolved.into_iter().flatten().collect())
}

/// Replaces the material of every mesh at or below `node`.
pub fn assign_material(
    commands: &mut Commands,
    node: Entity,
    material: &Handle<StandardMaterial>,
    children: &Query<&Children>,
    meshes: &Query<(), With<Mesh3d>>,
) {
    for entity in collect_descendants(node, children) {
        if meshes.contains(entity) {
            commands
                .entity(entity)
                .insert(MeshMaterial3d(material.clone()));
        }
    }
}

pub fn apply_scene_materials(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    materials: Option<Res<SceneMaterials>>,
    names: Query<&Name>,
    children: Query<&Children>,
    meshes: Query<(), With<Mesh3d>>,
) {
    let Some(materials) = materials else {
        warn!("Scene spawned before its materials were created");
        return;
    };
    let scene = trigger.target();

    assign_material(&mut commands, scene, &materials.baked, &children, &meshes);

    let batch = materials.prop_batch();
    let batch_names: Vec<&'static str> = batch.iter().map(|(name, _)| *name).collect();
    match resolve_batch(&batch_names, |name| {
        find_named_mesh(scene, name, &names, &children)
    }) {
        Ok(entities) => {
            for (entity, (_, material)) in entities.into_iter().zip(&batch) {
                assign_material(&mut commands, entity, material, &children, &meshes);
            }
        }
        Err(err) => warn!("{err}"),
    }

    for (name, material) in materials.individual_assignments() {
        if let Some(entity) = find_named_mesh(scene, name, &names, &children) {
            assign_material(&mut commands, entity, &material, &children, &meshes);
        }
    }

    info!("✓ Scene materials applied");
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use std::collections::HashMap;

    fn spawn_hierarchy(world: &mut World) -> Entity {
        world
            .spawn(Name::new("Scene"))
            .with_children(|scene| {
                scene
                    .spawn(Name::new("root"))
                    .with_children(|root| {
                        root.spawn(Name::new(BRIDGE_MESH)).with_children(|bridge| {
                            bridge.spawn((
                                Name::new("bridge.primitive0"),
                                Mesh3d(Handle::default()),
                                MeshMaterial3d::<StandardMaterial>(Handle::default()),
                            ));
                        });
                        root.spawn(Name::new(LANTERN_MESH));
                    });
            })
            .id()
    }

    #[test]
    fn batch_resolves_when_all_present() {
        let mut lookup = HashMap::new();
        lookup.insert("queens", Entity::from_raw(1));
        lookup.insert("bridge", Entity::from_raw(2));

        let resolved = resolve_batch(&["queens", "bridge"], |name| lookup.get(name).copied());
        assert_eq!(
            resolved,
            Ok(vec![Entity::from_raw(1), Entity::from_raw(2)])
        );
    }

    #[test]
    fn batch_is_all_or_nothing() {
        let mut lookup = HashMap::new();
        lookup.insert("queens", Entity::from_raw(1));
        lookup.insert("lanternlight", Entity::from_raw(3));

        let resolved = resolve_batch(&["queens", "bridge", "lanternlight", "murderers"], |name| {
            lookup.get(name).copied()
        });
        assert_eq!(
            resolved,
            Err(MissingMeshes {
                missing: vec!["bridge", "murderers"]
            })
        );
    }

    #[test]
    fn prop_batch_covers_eleven_meshes() {
        let mut materials = Assets::<StandardMaterial>::default();
        let assets = SceneAssets {
            model: Handle::default(),
            baked_texture: Handle::default(),
            outline_texture: Handle::default(),
            bloodstain_texture: Handle::default(),
            blanket_texture: Handle::default(),
        };
        let scene_materials = SceneMaterials::new(&mut materials, &assets);

        let batch = scene_materials.prop_batch();
        assert_eq!(batch.len(), 11);
        let neon = batch
            .iter()
            .find(|(name, _)| *name == NEON_SIGN_MESH)
            .map(|(_, material)| material.clone());
        assert_eq!(neon, Some(scene_materials.red.clone()));

        let red = materials.get(&scene_materials.red).expect("red material");
        assert!(red.unlit);
        let outline = materials.get(&scene_materials.outline).expect("outline material");
        assert!(matches!(outline.alpha_mode, AlphaMode::Blend));
    }

    #[test]
    fn named_mesh_is_found_at_any_depth() {
        let mut world = World::new();
        let scene = spawn_hierarchy(&mut world);

        let found = world
            .run_system_once(move |names: Query<&Name>, children: Query<&Children>| {
                (
                    find_named_mesh(scene, BRIDGE_MESH, &names, &children),
                    find_named_mesh(scene, "queens", &names, &children),
                )
            })
            .expect("lookup system runs");

        let bridge = found.0.expect("bridge found");
        assert_eq!(
            world.get::<Name>(bridge).map(|name| name.as_str()),
            Some(BRIDGE_MESH)
        );
        assert_eq!(found.1, None);
    }

    #[test]
    fn assignment_reaches_child_primitives() {
        let mut world = World::new();
        let scene = spawn_hierarchy(&mut world);
        let material = Handle::<StandardMaterial>::weak_from_u128(7);
        let assigned = material.clone();

        world
            .run_system_once(
                move |mut commands: Commands,
                      names: Query<&Name>,
                      children: Query<&Children>,
                      meshes: Query<(), With<Mesh3d>>| {
                    if let Some(bridge) = find_named_mesh(scene, BRIDGE_MESH, &names, &children) {
                        assign_material(&mut commands, bridge, &assigned, &children, &meshes);
                    }
                },
            )
            .expect("assignment system runs");

        let mut primitives = world.query::<(&Name, &MeshMaterial3d<StandardMaterial>)>();
        let (_, applied) = primitives
            .iter(&world)
            .find(|(name, _)| name.as_str() == "bridge.primitive0")
            .expect("primitive exists");
        assert_eq!(applied.0, material);
    }
}
