use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings, RayCastVisibility};
use bevy::prelude::*;
use bevy::render::camera::CameraProjection;
use bevy::window::PrimaryWindow;

use crate::engine::camera::orbit_camera::SceneCamera;
use crate::engine::poi::markers::{MarkerState, PoiMarker};
use crate::engine::poi::registry::PointOfInterestRegistry;
use crate::engine::ui::OverlayTarget;

const MIN_CLIP_W: f32 = 1e-6;

/// Camera and viewport captured once per frame. Every marker in a frame is
/// resolved against the same snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionSnapshot {
    pub clip_from_world: Mat4,
    pub camera_position: Vec3,
    pub viewport: Vec2,
}

/// An anchor in normalized device coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub ndc: Vec3,
    /// False when the anchor lies behind the camera plane.
    pub in_front: bool,
}

impl ProjectionSnapshot {
    pub fn new(camera_transform: &Transform, clip_from_view: Mat4, viewport: Vec2) -> Self {
        Self {
            clip_from_world: clip_from_view * camera_transform.compute_matrix().inverse(),
            camera_position: camera_transform.translation,
            viewport,
        }
    }

    /// Snapshot whose projection aspect is taken from `viewport` rather than
    /// the aspect stored on the camera, which lags a resize by one frame.
    /// `None` for an empty viewport.
    pub fn from_perspective(
        camera_transform: &Transform,
        perspective: &PerspectiveProjection,
        viewport: Vec2,
    ) -> Option<Self> {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return None;
        }
        let perspective = PerspectiveProjection {
            aspect_ratio: viewport.x / viewport.y,
            ..perspective.clone()
        };
        Some(Self::new(
            camera_transform,
            perspective.get_clip_from_view(),
            viewport,
        ))
    }

    /// `None` when the anchor sits on the camera plane and has no NDC.
    pub fn project(&self, point: Vec3) -> Option<Projected> {
        let clip = self.clip_from_world * point.extend(1.0);
        if clip.w.abs() <= MIN_CLIP_W {
            return None;
        }
        Some(Projected {
            ndc: clip.truncate() / clip.w,
            in_front: clip.w > 0.0,
        })
    }

    /// Ray from the camera through `ndc`. `None` for a degenerate direction.
    pub fn ray_through(&self, ndc: Vec2) -> Option<Ray3d> {
        let through = self
            .clip_from_world
            .inverse()
            .project_point3(ndc.extend(0.5));
        let direction = Dir3::new(through - self.camera_position).ok()?;
        Some(Ray3d::new(self.camera_position, direction))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityOutcome {
    Show,
    Hide,
    Unchanged,
}

/// Occlusion decision for one marker from the nearest hit along its ray.
pub fn resolve_visibility(
    nearest_hit: Option<f32>,
    point_distance: f32,
    show_points: bool,
) -> VisibilityOutcome {
    let Some(hit_distance) = nearest_hit else {
        return VisibilityOutcome::Show;
    };

    if hit_distance < point_distance {
        VisibilityOutcome::Hide
    } else if show_points {
        VisibilityOutcome::Show
    } else {
        VisibilityOutcome::Unchanged
    }
}

/// Size of the surface marker offsets are measured on. Canvas markers are UI
/// nodes in logical pixels, which follow any scale factor override. Page
/// markers are CSS pixels, which only follow the device pixel ratio.
pub fn marker_viewport(window: &Window, overlay: OverlayTarget) -> Vec2 {
    match overlay {
        OverlayTarget::Canvas => Vec2::new(window.width(), window.height()),
        OverlayTarget::Dom => {
            let css_scale = window.resolution.base_scale_factor();
            Vec2::new(
                window.resolution.physical_width() as f32,
                window.resolution.physical_height() as f32,
            ) / css_scale
        }
    }
}

/// Pixel offset of an NDC position from the viewport centre, y down.
pub fn screen_offset(ndc: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(ndc.x * viewport.x * 0.5, -ndc.y * viewport.y * 0.5)
}

impl MarkerState {
    pub fn apply(&mut self, outcome: VisibilityOutcome) {
        match outcome {
            VisibilityOutcome::Show => self.visible = true,
            VisibilityOutcome::Hide => self.visible = false,
            VisibilityOutcome::Unchanged => {}
        }
    }
}

pub fn resolve_points_of_interest(
    registry: Res<PointOfInterestRegistry>,
    overlay: Res<OverlayTarget>,
    camera_query: Query<(&Projection, &Transform), With<SceneCamera>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut ray_cast: MeshRayCast,
    mut markers: Query<(&PoiMarker, &mut MarkerState)>,
) {
    let Ok((projection, camera_transform)) = camera_query.single() else {
        return;
    };
    let Projection::Perspective(perspective) = projection else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };

    let viewport = marker_viewport(window, *overlay);
    let Some(snapshot) = ProjectionSnapshot::from_perspective(camera_transform, perspective, viewport)
    else {
        return;
    };
    let settings = MeshRayCastSettings::default()
        .with_visibility(RayCastVisibility::Any)
        .never_early_exit();

    for (marker, mut state) in &mut markers {
        let Some(point) = registry.get(marker.id) else {
            continue;
        };
        let Some(projected) = snapshot.project(point.anchor) else {
            state.visible = false;
            continue;
        };

        state.offset = screen_offset(projected.ndc.truncate(), snapshot.viewport);

        if !projected.in_front {
            state.visible = false;
            continue;
        }

        let nearest_hit = snapshot
            .ray_through(projected.ndc.truncate())
            .and_then(|ray| {
                ray_cast
                    .cast_ray(ray, &settings)
                    .iter()
                    .map(|(_, hit)| hit.distance)
                    .reduce(f32::min)
            });
        let point_distance = snapshot.camera_position.distance(point.anchor);

        state.apply(resolve_visibility(
            nearest_hit,
            point_distance,
            registry.show_points(),
        ));
    }
}
