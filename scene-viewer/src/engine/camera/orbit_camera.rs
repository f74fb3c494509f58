use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::f32::consts::TAU;

use constants::camera::*;

/// Marks the one camera that renders the scene and casts visibility rays.
#[derive(Component)]
pub struct SceneCamera;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_polar: MIN_POLAR_ANGLE,
            max_polar: MAX_POLAR_ANGLE,
            min_azimuth: MIN_AZIMUTH_ANGLE,
            max_azimuth: MAX_AZIMUTH_ANGLE,
            min_distance: MIN_DISTANCE,
            max_distance: MAX_DISTANCE,
        }
    }
}

/// Spherical orbit state. Polar angle is measured from +Y, azimuth around
/// +Y starting at +Z.
#[derive(Resource, Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    pub polar: f32,
    pub azimuth: f32,
    pub limits: OrbitLimits,
    pending_polar: f32,
    pending_azimuth: f32,
    pending_scale: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_position(INITIAL_POSITION, ORBIT_TARGET, OrbitLimits::default())
    }
}

impl OrbitCamera {
    pub fn from_position(position: Vec3, target: Vec3, limits: OrbitLimits) -> Self {
        let offset = position - target;
        let radius = offset.length();
        let polar = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        Self {
            target,
            radius,
            polar,
            azimuth: offset.x.atan2(offset.z),
            limits,
            pending_polar: 0.0,
            pending_azimuth: 0.0,
            pending_scale: 1.0,
        }
    }

    /// Queues a rotation from a pointer drag of `delta` pixels over a
    /// viewport `viewport_height` pixels tall.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.pending_azimuth -= TAU * delta.x / viewport_height * ROTATE_SPEED;
        self.pending_polar -= TAU * delta.y / viewport_height * ROTATE_SPEED;
    }

    /// Queues one zoom step. Positive `direction` moves closer.
    pub fn zoom(&mut self, direction: f32) {
        if direction > 0.0 {
            self.pending_scale *= ZOOM_STEP;
        } else if direction < 0.0 {
            self.pending_scale /= ZOOM_STEP;
        }
    }

    /// Applies a damped share of the queued rotation and the queued zoom,
    /// then clamps to the limits.
    pub fn update(&mut self) {
        self.azimuth += self.pending_azimuth * DAMPING_FACTOR;
        self.polar += self.pending_polar * DAMPING_FACTOR;

        self.azimuth = self
            .azimuth
            .clamp(self.limits.min_azimuth, self.limits.max_azimuth);
        self.polar = self
            .polar
            .clamp(self.limits.min_polar, self.limits.max_polar);
        self.radius = (self.radius * self.pending_scale)
            .clamp(self.limits.min_distance, self.limits.max_distance);

        self.pending_azimuth *= 1.0 - DAMPING_FACTOR;
        self.pending_polar *= 1.0 - DAMPING_FACTOR;
        self.pending_scale = 1.0;
    }

    pub fn position(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + Vec3::new(
                self.radius * sin_polar * self.azimuth.sin(),
                self.radius * self.polar.cos(),
                self.radius * sin_polar * self.azimuth.cos(),
            )
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
    }
}

pub fn spawn_scene_camera(mut commands: Commands, orbit: Res<OrbitCamera>) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FIELD_OF_VIEW_DEGREES.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        orbit.transform(),
        SceneCamera,
    ));
    info!("✓ Camera spawned at {:?}", orbit.position());
}

pub fn orbit_camera_controller(
    mut orbit: ResMut<OrbitCamera>,
    mut camera_query: Query<&mut Transform, With<SceneCamera>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        if let Ok(window) = windows.single() {
            orbit.rotate(mouse_delta, window.height());
        }
    }

    // Only the wheel direction counts, for both line and pixel units.
    for event in scroll_events.read() {
        orbit.zoom(event.y);
    }

    orbit.update();
    *camera_transform = orbit.transform();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    const EPS: f32 = 1e-4;

    #[test]
    fn initial_position_round_trips_through_spherical() {
        let orbit = OrbitCamera::default();
        assert!((orbit.radius - 57.0_f32.sqrt()).abs() < EPS);
        assert!((orbit.azimuth - FRAC_PI_4).abs() < EPS);
        assert!(orbit.position().distance(INITIAL_POSITION) < EPS);
    }

    #[test]
    fn initial_position_is_inside_limits() {
        let mut orbit = OrbitCamera::default();
        orbit.update();
        assert!(orbit.position().distance(INITIAL_POSITION) < EPS);
    }

    #[test]
    fn rotation_is_damped() {
        let mut orbit = OrbitCamera::default();
        let start = orbit.azimuth;
        // A drag of a tenth of the viewport height queues TAU / 10.
        orbit.rotate(Vec2::new(-100.0, 0.0), 1000.0);

        orbit.update();
        let first_step = orbit.azimuth - start;
        assert!((first_step - TAU / 10.0 * DAMPING_FACTOR).abs() < EPS);

        orbit.update();
        let second_step = orbit.azimuth - start - first_step;
        assert!((second_step - first_step * (1.0 - DAMPING_FACTOR)).abs() < EPS);
    }

    #[test]
    fn angles_stay_within_limits() {
        let mut orbit = OrbitCamera::default();
        orbit.rotate(Vec2::new(-50_000.0, 50_000.0), 800.0);
        for _ in 0..200 {
            orbit.update();
        }
        assert!((orbit.azimuth - MAX_AZIMUTH_ANGLE).abs() < EPS);
        assert!((orbit.polar - MIN_POLAR_ANGLE).abs() < EPS);

        orbit.rotate(Vec2::new(100_000.0, -100_000.0), 800.0);
        for _ in 0..200 {
            orbit.update();
        }
        assert!((orbit.azimuth - MIN_AZIMUTH_ANGLE).abs() < EPS);
        assert!((orbit.polar - MAX_POLAR_ANGLE).abs() < EPS);
    }

    #[test]
    fn zoom_is_bounded() {
        let mut orbit = OrbitCamera::default();
        for _ in 0..100 {
            orbit.zoom(-1.0);
            orbit.update();
        }
        assert!((orbit.radius - MAX_DISTANCE).abs() < EPS);

        for _ in 0..200 {
            orbit.zoom(1.0);
            orbit.update();
        }
        assert!((orbit.radius - MIN_DISTANCE).abs() < EPS);
    }

    #[test]
    fn single_zoom_step_scales_radius() {
        let mut orbit = OrbitCamera::default();
        orbit.zoom(-1.0);
        orbit.update();
        assert!((orbit.radius - 57.0_f32.sqrt() / ZOOM_STEP).abs() < EPS);

        // The queued scale is consumed.
        let radius = orbit.radius;
        orbit.update();
        assert!((orbit.radius - radius).abs() < EPS);
    }
}
