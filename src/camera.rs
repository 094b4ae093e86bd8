//! First person camera.
//!
//! Orientation is stored as yaw/pitch in degrees and the `front`/`right`/`up`
//! basis is re-derived whenever either angle changes. Vertical motion (jumping,
//! crouching) is requested through [`Camera::process_keyboard`] and then
//! integrated a step at a time by the per-frame integrators.

use glam::{Mat4, Vec3};

use crate::config::{CROUCH_HEIGHT, JUMP_HEIGHT, PITCH, SENSITIVITY, SPEED, YAW, ZOOM};

const PITCH_LIMIT: f32 = 89.0;
const ZOOM_MIN: f32 = 1.0;
const ZOOM_MAX: f32 = 45.0;

/// Fraction of the movement speed used for vertical motion.
const VERTICAL_RATE: f32 = 0.5;

#[derive(Copy, Clone, Hash, Debug, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
    Crouch,
    StandUp,
}

/// Vertical motion state. Heights are measured from the ground position.
#[derive(Copy, Clone, Hash, Debug, Default, PartialEq, Eq)]
pub enum VerticalMotion {
    #[default]
    Idle,
    /// rising towards the jump height
    Jumping,
    /// dropping back to the ground
    Falling,
    /// lowering towards the crouch height
    Crouching,
    /// resting at the crouch height
    Crouched,
    /// rising from the crouch height back to the ground
    StandingUp,
}

/// Tunables fixed at construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CameraSettings {
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub zoom: f32,
    pub jump_height: f32,
    pub crouch_height: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            movement_speed: SPEED,
            mouse_sensitivity: SENSITIVITY,
            zoom: ZOOM,
            jump_height: JUMP_HEIGHT,
            crouch_height: CROUCH_HEIGHT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    ground: Vec3,
    world_up: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,
    motion: VerticalMotion,
    settings: CameraSettings,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Y, YAW, PITCH)
    }
}

impl Camera {
    /// Camera standing on `ground`.
    pub fn new(ground: Vec3, up: Vec3, yaw: f32, pitch: f32) -> Self {
        Self::with_settings(ground, up, yaw, pitch, CameraSettings::default())
    }

    pub fn with_settings(
        ground: Vec3,
        up: Vec3,
        yaw: f32,
        pitch: f32,
        settings: CameraSettings,
    ) -> Self {
        let mut camera = Self {
            position: ground,
            ground,
            world_up: up,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up,
            yaw,
            pitch,
            motion: VerticalMotion::Idle,
            settings,
        };
        camera.update_camera_vectors();
        camera
    }

    /// Camera from scalar components; the starting position doubles as the ground.
    #[allow(clippy::too_many_arguments)]
    pub fn from_scalars(
        pos_x: f32,
        pos_y: f32,
        pos_z: f32,
        up_x: f32,
        up_y: f32,
        up_z: f32,
        yaw: f32,
        pitch: f32,
    ) -> Self {
        Self::new(
            Vec3::new(pos_x, pos_y, pos_z),
            Vec3::new(up_x, up_y, up_z),
            yaw,
            pitch,
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn ground(&self) -> Vec3 {
        self.ground
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn zoom(&self) -> f32 {
        self.settings.zoom
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn motion(&self) -> VerticalMotion {
        self.motion
    }

    pub fn is_jumping(&self) -> bool {
        self.motion == VerticalMotion::Jumping
    }

    pub fn is_falling(&self) -> bool {
        self.motion == VerticalMotion::Falling
    }

    pub fn is_crouching(&self) -> bool {
        self.motion == VerticalMotion::Crouching
    }

    pub fn is_standing_up(&self) -> bool {
        self.motion == VerticalMotion::StandingUp
    }

    pub fn crouched(&self) -> bool {
        self.motion == VerticalMotion::Crouched
    }

    /// Planar movement is applied immediately. Jump, crouch and stand up only
    /// request the transition; the integrators do the moving.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.settings.movement_speed * delta_time;
        // walking stays on the ground plane regardless of pitch
        let walk = Vec3::new(self.front.x, 0.0, self.front.z).normalize_or_zero();
        match direction {
            CameraMovement::Forward => self.position += walk * velocity,
            CameraMovement::Backward => self.position -= walk * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
            CameraMovement::Jump => {
                if self.motion == VerticalMotion::Idle {
                    self.transition(VerticalMotion::Jumping);
                }
            }
            CameraMovement::Crouch => {
                if self.motion == VerticalMotion::Idle {
                    self.transition(VerticalMotion::Crouching);
                }
            }
            CameraMovement::StandUp => {
                if self.motion == VerticalMotion::Crouched {
                    self.transition(VerticalMotion::StandingUp);
                }
            }
        }
    }

    /// Runs the integrator for the current vertical state, at most one
    /// transition per call.
    pub fn update(&mut self, delta_time: f32) {
        match self.motion {
            VerticalMotion::Jumping => self.jump(delta_time),
            VerticalMotion::Falling => self.process_falling(delta_time),
            VerticalMotion::Crouching => self.crouching(delta_time),
            VerticalMotion::StandingUp => self.standing_up(delta_time),
            VerticalMotion::Idle | VerticalMotion::Crouched => {}
        }
    }

    pub fn jump(&mut self, delta_time: f32) {
        if self.motion != VerticalMotion::Jumping {
            return;
        }
        let peak = self.ground.y + self.settings.jump_height;
        if self.rise(delta_time, peak) {
            self.transition(VerticalMotion::Falling);
        }
    }

    pub fn process_falling(&mut self, delta_time: f32) {
        if self.motion != VerticalMotion::Falling {
            return;
        }
        let rest = self.ground.y;
        if self.sink(delta_time, rest) {
            self.transition(VerticalMotion::Idle);
        } else {
            log::trace!("falling, y = {}", self.position.y);
        }
    }

    pub fn crouching(&mut self, delta_time: f32) {
        if self.motion != VerticalMotion::Crouching {
            return;
        }
        let floor = self.ground.y + self.settings.crouch_height;
        if self.sink(delta_time, floor) {
            self.transition(VerticalMotion::Crouched);
        }
    }

    pub fn standing_up(&mut self, delta_time: f32) {
        if self.motion != VerticalMotion::StandingUp {
            return;
        }
        let rest = self.ground.y;
        if self.rise(delta_time, rest) {
            self.transition(VerticalMotion::Idle);
        }
    }

    /// Moves up by one step, stopping exactly on `target`. Returns true once reached.
    fn rise(&mut self, delta_time: f32, target: f32) -> bool {
        let next = self.position.y + self.vertical_step(delta_time);
        if next < target {
            self.position.y = next;
            false
        } else {
            self.position.y = target;
            true
        }
    }

    /// Moves down by one step, stopping exactly on `target`. Returns true once reached.
    fn sink(&mut self, delta_time: f32, target: f32) -> bool {
        let next = self.position.y - self.vertical_step(delta_time);
        if next > target {
            self.position.y = next;
            false
        } else {
            self.position.y = target;
            true
        }
    }

    fn vertical_step(&self, delta_time: f32) -> f32 {
        VERTICAL_RATE * self.settings.movement_speed * delta_time
    }

    fn transition(&mut self, next: VerticalMotion) {
        log::debug!("camera {:?} -> {:?} at y = {}", self.motion, next, self.position.y);
        self.motion = next;
    }

    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.settings.mouse_sensitivity;
        self.pitch += y_offset * self.settings.mouse_sensitivity;

        // past +-90 the view flips
        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_camera_vectors();
    }

    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.settings.zoom = (self.settings.zoom - y_offset).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    fn update_camera_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        let front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        );
        self.front = front.normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;
    const DT: f32 = 1.0 / 60.0;

    fn assert_orthonormal(camera: &Camera) {
        let (f, r, u) = (camera.front(), camera.right(), camera.up());
        assert!((f.length() - 1.0).abs() < EPS, "front {:?}", f);
        assert!((r.length() - 1.0).abs() < EPS, "right {:?}", r);
        assert!((u.length() - 1.0).abs() < EPS, "up {:?}", u);
        assert!(f.dot(r).abs() < EPS);
        assert!(f.dot(u).abs() < EPS);
        assert!(r.dot(u).abs() < EPS);
    }

    fn step_until(camera: &mut Camera, state: VerticalMotion) {
        for _ in 0..10_000 {
            if camera.motion() == state {
                return;
            }
            camera.update(DT);
        }
        panic!("never reached {:?}, stuck in {:?}", state, camera.motion());
    }

    #[test]
    fn default_looks_down_negative_z() {
        let camera = Camera::default();
        assert!(camera.front().abs_diff_eq(Vec3::NEG_Z, EPS));
        assert!(camera.right().abs_diff_eq(Vec3::X, EPS));
        assert!(camera.up().abs_diff_eq(Vec3::Y, EPS));
        assert_eq!(camera.motion(), VerticalMotion::Idle);
    }

    #[test]
    fn basis_is_orthonormal() {
        for yaw in (-360..=360).step_by(15) {
            for pitch in (-89..=89).step_by(7) {
                let camera = Camera::new(Vec3::ZERO, Vec3::Y, yaw as f32, pitch as f32);
                assert_orthonormal(&camera);
            }
        }
    }

    #[test]
    fn basis_stays_orthonormal_after_mouse() {
        let mut camera = Camera::default();
        for i in 0..200 {
            camera.process_mouse_movement(13.0, if i % 2 == 0 { 37.0 } else { -21.0 }, true);
            assert_orthonormal(&camera);
        }
    }

    #[test]
    fn constrained_pitch_is_clamped() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(0.0, 5000.0, true);
        assert_eq!(camera.pitch(), 89.0);
        camera.process_mouse_movement(0.0, -10000.0, true);
        assert_eq!(camera.pitch(), -89.0);
    }

    #[test]
    fn unconstrained_pitch_is_free() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(0.0, 1000.0, false);
        assert!((camera.pitch() - 100.0).abs() < EPS);
    }

    #[test]
    fn mouse_scales_by_sensitivity() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(10.0, 20.0, true);
        assert!((camera.yaw() - (YAW + 1.0)).abs() < EPS);
        assert!((camera.pitch() - 2.0).abs() < EPS);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = Camera::default();
        camera.process_mouse_scroll(-10.0);
        assert_eq!(camera.zoom(), 45.0);
        camera.process_mouse_scroll(20.0);
        assert_eq!(camera.zoom(), 25.0);
        camera.process_mouse_scroll(100.0);
        assert_eq!(camera.zoom(), 1.0);
        camera.process_mouse_scroll(-3.0);
        assert_eq!(camera.zoom(), 4.0);
    }

    #[test]
    fn planar_movement() {
        let mut camera = Camera::default();
        camera.process_keyboard(CameraMovement::Forward, 1.0);
        assert!(camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, -SPEED), EPS));
        camera.process_keyboard(CameraMovement::Right, 2.0);
        assert!(camera.position().abs_diff_eq(Vec3::new(2.0 * SPEED, 0.0, -SPEED), EPS));
        camera.process_keyboard(CameraMovement::Backward, 1.0);
        camera.process_keyboard(CameraMovement::Left, 2.0);
        assert!(camera.position().abs_diff_eq(Vec3::ZERO, EPS));
    }

    #[test]
    fn walking_ignores_pitch() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(0.0, 450.0, true);
        camera.process_keyboard(CameraMovement::Forward, 1.0);
        assert_eq!(camera.position().y, 0.0);
        assert!((camera.position().length() - SPEED).abs() < EPS);
        assert_orthonormal(&camera);
    }

    #[test]
    fn jump_rises_falls_and_lands() {
        let mut camera = Camera::default();
        camera.process_keyboard(CameraMovement::Forward, 0.3);
        camera.process_keyboard(CameraMovement::Left, 0.2);
        let before = camera.position();

        camera.process_keyboard(CameraMovement::Jump, DT);
        assert!(camera.is_jumping());
        camera.update(DT);
        assert!(camera.position().y > 0.0);

        step_until(&mut camera, VerticalMotion::Falling);
        assert_eq!(camera.position().y, JUMP_HEIGHT);

        step_until(&mut camera, VerticalMotion::Idle);
        let after = camera.position();
        assert_eq!(after.y, 0.0);
        assert_eq!(after.x, before.x);
        assert_eq!(after.z, before.z);
    }

    #[test]
    fn large_step_does_not_overshoot() {
        let mut camera = Camera::default();
        camera.process_keyboard(CameraMovement::Jump, 0.0);
        camera.update(10.0);
        assert!(camera.is_falling());
        assert_eq!(camera.position().y, JUMP_HEIGHT);
        camera.update(10.0);
        assert_eq!(camera.motion(), VerticalMotion::Idle);
        assert_eq!(camera.position().y, 0.0);
    }

    #[test]
    fn jump_while_falling_is_ignored() {
        let mut camera = Camera::default();
        camera.process_keyboard(CameraMovement::Jump, DT);
        step_until(&mut camera, VerticalMotion::Falling);
        camera.update(DT);
        let y = camera.position().y;

        camera.process_keyboard(CameraMovement::Jump, DT);
        assert!(camera.is_falling());
        assert!(!camera.is_jumping());
        assert_eq!(camera.position().y, y);
    }

    #[test]
    fn crouch_then_stand_up() {
        let mut camera = Camera::default();
        camera.process_keyboard(CameraMovement::Crouch, DT);
        assert!(camera.is_crouching());

        step_until(&mut camera, VerticalMotion::Crouched);
        assert!(camera.crouched());
        assert_eq!(camera.position().y, CROUCH_HEIGHT);

        // stays down until asked
        camera.update(DT);
        assert!(camera.crouched());

        camera.process_keyboard(CameraMovement::StandUp, DT);
        assert!(camera.is_standing_up());
        step_until(&mut camera, VerticalMotion::Idle);
        assert_eq!(camera.position().y, 0.0);
        assert!(!camera.crouched());
    }

    #[test]
    fn stand_up_requires_crouched() {
        let mut camera = Camera::default();
        camera.process_keyboard(CameraMovement::StandUp, DT);
        assert_eq!(camera.motion(), VerticalMotion::Idle);

        camera.process_keyboard(CameraMovement::Crouch, DT);
        camera.process_keyboard(CameraMovement::StandUp, DT);
        assert!(camera.is_crouching());
    }

    #[test]
    fn crouch_ignored_while_standing_up() {
        let mut camera = Camera::default();
        camera.process_keyboard(CameraMovement::Crouch, DT);
        step_until(&mut camera, VerticalMotion::Crouched);
        camera.process_keyboard(CameraMovement::StandUp, DT);
        camera.process_keyboard(CameraMovement::Crouch, DT);
        assert!(camera.is_standing_up());
    }

    #[test]
    fn heights_follow_the_ground() {
        let mut camera = Camera::from_scalars(1.0, 2.0, 3.0, 0.0, 1.0, 0.0, YAW, PITCH);
        assert_eq!(camera.ground(), Vec3::new(1.0, 2.0, 3.0));
        camera.process_keyboard(CameraMovement::Jump, DT);
        step_until(&mut camera, VerticalMotion::Falling);
        assert_eq!(camera.position().y, 2.0 + JUMP_HEIGHT);
        step_until(&mut camera, VerticalMotion::Idle);
        assert_eq!(camera.position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn view_matrix_moves_eye_to_origin() {
        let mut camera = Camera::default();
        camera.process_keyboard(CameraMovement::Right, 1.0);
        let eye = camera.view_matrix().transform_point3(camera.position());
        assert!(eye.abs_diff_eq(Vec3::ZERO, EPS));
        let ahead = camera
            .view_matrix()
            .transform_point3(camera.position() + camera.front());
        assert!(ahead.abs_diff_eq(Vec3::NEG_Z, EPS));
    }
}
