use glam::{Mat4, Vec3, vec3};

use super::scene::NODE_RADIUS;
use super::spatial::Ray;

pub(in crate::app) const FOV_Y_DEGREES: f32 = 60.0;
pub(in crate::app) const NEAR_PLANE: f32 = 1.0;
pub(in crate::app) const FAR_PLANE: f32 = 1000.0;

/// Virtual pointer offset fed by the rotation keys.
const ROTATE_STEP: f32 = 375.0;
const LAT_LIMIT_DEGREES: f32 = 85.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(in crate::app) struct MoveState {
    pub(in crate::app) forward: bool,
    pub(in crate::app) backward: bool,
    pub(in crate::app) left: bool,
    pub(in crate::app) right: bool,
    pub(in crate::app) up: bool,
    pub(in crate::app) down: bool,
    pub(in crate::app) rotate_left: bool,
    pub(in crate::app) rotate_right: bool,
    pub(in crate::app) rotate_up: bool,
    pub(in crate::app) rotate_down: bool,
}

/// Free-flying viewer camera: WASD strafing, vertical strafing, and
/// keyboard-driven look, with the frame's translation kept around so the
/// collision controller can undo it.
pub(in crate::app) struct FirstPersonCamera {
    pub(in crate::app) position: Vec3,
    lat: f32,
    lon: f32,
    pub(in crate::app) movement_speed: f32,
    pub(in crate::app) look_speed: f32,
    pub(in crate::app) moves: MoveState,
    last_step: Vec3,
}

impl FirstPersonCamera {
    const INITIAL_POSITION: Vec3 = vec3(-0.25, 1.75, 3.5);

    pub(in crate::app) fn new() -> Self {
        Self {
            position: Self::INITIAL_POSITION,
            lat: 0.0,
            // Facing -Z.
            lon: 180.0,
            movement_speed: 3.0,
            look_speed: 0.15,
            moves: MoveState::default(),
            last_step: Vec3::ZERO,
        }
    }

    pub(in crate::app) fn reset(&mut self) {
        let moves = self.moves;
        *self = Self::new();
        self.moves = moves;
    }

    pub(in crate::app) fn direction(&self) -> Vec3 {
        let phi = (90.0 - self.lat).to_radians();
        let theta = self.lon.to_radians();
        vec3(
            phi.sin() * theta.sin(),
            phi.cos(),
            phi.sin() * theta.cos(),
        )
    }

    fn axes(&self) -> (Vec3, Vec3, Vec3) {
        let forward = self.direction();
        // The latitude clamp keeps `forward` away from the poles.
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        (forward, right, up)
    }

    /// Applies one frame of movement and look.
    pub(in crate::app) fn update(&mut self, delta: f32) {
        let speed = delta * self.movement_speed;
        let (forward, right, up) = self.axes();

        let mut step = Vec3::ZERO;
        if self.moves.forward {
            step += forward * speed;
        }
        if self.moves.backward {
            step -= forward * speed;
        }
        if self.moves.left {
            step -= right * speed;
        }
        if self.moves.right {
            step += right * speed;
        }
        if self.moves.up {
            step += up * speed;
        }
        if self.moves.down {
            step -= up * speed;
        }
        self.position += step;
        self.last_step = step;

        let virtual_x = if self.moves.rotate_right {
            ROTATE_STEP
        } else if self.moves.rotate_left {
            -ROTATE_STEP
        } else {
            0.0
        };
        let virtual_y = if self.moves.rotate_up {
            -ROTATE_STEP
        } else if self.moves.rotate_down {
            ROTATE_STEP
        } else {
            0.0
        };

        let look = delta * self.look_speed;
        self.lon -= virtual_x * look;
        self.lat = (self.lat - (virtual_y * look)).clamp(-LAT_LIMIT_DEGREES, LAT_LIMIT_DEGREES);
    }

    /// Undoes the translation recorded by the latest `update` call. The
    /// recorded displacement vector is reverted, not a re-derivation from
    /// whichever keys are still held, so a mid-frame speed change cannot
    /// leave drift behind.
    pub(in crate::app) fn revert_step(&mut self) {
        self.position -= self.last_step;
        self.last_step = Vec3::ZERO;
    }

    pub(in crate::app) fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.direction(), Vec3::Y)
    }
}

/// Top-down orbit camera around the network center.
pub(in crate::app) struct OrbitCamera {
    pub(in crate::app) target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    pub(in crate::app) min_distance: f32,
    pub(in crate::app) max_distance: f32,
    pub(in crate::app) zoom_speed: f32,
}

impl OrbitCamera {
    const INITIAL_POSITION: Vec3 = vec3(0.0, 5.0, 7.5);

    pub(in crate::app) fn new() -> Self {
        let mut camera = Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: 1.0,
            min_distance: NODE_RADIUS * 5.0,
            max_distance: 25.0,
            zoom_speed: 2.0,
        };
        camera.set_position(Self::INITIAL_POSITION);
        camera
    }

    pub(in crate::app) fn reset(&mut self) {
        self.target = Vec3::ZERO;
        self.set_position(Self::INITIAL_POSITION);
    }

    pub(in crate::app) fn set_position(&mut self, position: Vec3) {
        let offset = position - self.target;
        self.distance = offset
            .length()
            .clamp(self.min_distance, self.max_distance);
        self.pitch = (offset.y / offset.length().max(1e-5)).asin();
        self.yaw = offset.x.atan2(offset.z);
    }

    pub(in crate::app) fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.yaw -= delta_x * 0.01;
        self.pitch = (self.pitch + (delta_y * 0.01)).clamp(
            -LAT_LIMIT_DEGREES.to_radians(),
            LAT_LIMIT_DEGREES.to_radians(),
        );
    }

    pub(in crate::app) fn zoom(&mut self, scroll: f32) {
        let factor = 1.0 - (scroll * 0.001 * self.zoom_speed);
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    pub(in crate::app) fn position(&self) -> Vec3 {
        let offset = vec3(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        self.target + (offset * self.distance)
    }

    pub(in crate::app) fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }
}

pub(in crate::app) fn perspective_matrix(aspect: f32) -> Mat4 {
    Mat4::perspective_rh(
        FOV_Y_DEGREES.to_radians(),
        aspect.max(1e-3),
        NEAR_PLANE,
        FAR_PLANE,
    )
}

/// Ray from the camera through a point in normalized device coordinates.
pub(in crate::app) fn picking_ray(origin: Vec3, view_proj: Mat4, ndc_x: f32, ndc_y: f32) -> Ray {
    let far = view_proj.inverse().project_point3(vec3(ndc_x, ndc_y, 1.0));
    Ray::new(origin, far - origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_camera_faces_negative_z() {
        let camera = FirstPersonCamera::new();
        assert!((camera.direction() - vec3(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn forward_key_moves_along_look_direction() {
        let mut camera = FirstPersonCamera::new();
        camera.moves.forward = true;
        camera.update(0.5);

        let expected = FirstPersonCamera::INITIAL_POSITION + (camera.direction() * 1.5);
        assert!((camera.position - expected).length() < 1e-5);
    }

    #[test]
    fn revert_step_restores_frame_start_position() {
        let mut camera = FirstPersonCamera::new();
        camera.moves.forward = true;
        camera.moves.left = true;
        camera.update(0.25);
        assert!(camera.position != FirstPersonCamera::INITIAL_POSITION);

        camera.revert_step();
        assert_eq!(camera.position, FirstPersonCamera::INITIAL_POSITION);

        // A second revert has nothing left to undo.
        camera.revert_step();
        assert_eq!(camera.position, FirstPersonCamera::INITIAL_POSITION);
    }

    #[test]
    fn look_latitude_is_clamped() {
        let mut camera = FirstPersonCamera::new();
        camera.moves.rotate_up = true;
        for _ in 0..1000 {
            camera.update(0.1);
        }
        assert!(camera.direction().y <= LAT_LIMIT_DEGREES.to_radians().sin() + 1e-4);
    }

    #[test]
    fn orbit_camera_round_trips_initial_position() {
        let camera = OrbitCamera::new();
        assert!((camera.position() - vec3(0.0, 5.0, 7.5)).length() < 1e-3);
    }

    #[test]
    fn orbit_zoom_respects_distance_limits() {
        let mut camera = OrbitCamera::new();
        for _ in 0..200 {
            camera.zoom(500.0);
        }
        assert!((camera.position() - camera.target).length() >= camera.min_distance - 1e-4);

        for _ in 0..200 {
            camera.zoom(-500.0);
        }
        assert!((camera.position() - camera.target).length() <= camera.max_distance + 1e-4);
    }

    #[test]
    fn center_picking_ray_matches_view_direction() {
        let camera = FirstPersonCamera::new();
        let view_proj = perspective_matrix(16.0 / 9.0) * camera.view_matrix();
        let ray = picking_ray(camera.position, view_proj, 0.0, 0.0);

        assert!((ray.origin - camera.position).length() < 1e-5);
        assert!((ray.direction - camera.direction()).length() < 1e-3);
    }
}
