use glam::{Mat4, Vec3};
use std::f32::consts::FRAC_PI_2;

pub const HOME_POSITION: Vec3 = Vec3::new(2.5, 2.0, 3.5);

pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: HOME_POSITION,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 40.0_f32.to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// View-projection with the camera and its target displaced together,
    /// as the press shake does.
    pub fn shaken_view_projection(&self, shake: Vec3) -> Mat4 {
        let view = Mat4::look_at_rh(self.position + shake, self.target + shake, self.up);
        self.projection_matrix() * view
    }
}

/// Damped spherical orbit around a centre point. `phi` is measured from +Y.
pub struct OrbitController {
    pub center: Vec3,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_phi: f32,
    pub max_phi: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub damping: f32,
    velocity_theta: f32,
    velocity_phi: f32,
    velocity_radius: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::from_position(Vec3::ZERO, HOME_POSITION)
    }
}

impl OrbitController {
    /// Orbit that starts exactly at `position`, looking at `center`.
    pub fn from_position(center: Vec3, position: Vec3) -> Self {
        let offset = position - center;
        let radius = offset.length().max(f32::EPSILON);
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let theta = offset.z.atan2(offset.x);

        Self {
            center,
            radius: radius.clamp(2.0, 7.0),
            theta,
            phi: phi.clamp(0.05, FRAC_PI_2),
            min_radius: 2.0,
            max_radius: 7.0,
            min_phi: 0.05,
            max_phi: FRAC_PI_2,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            damping: 0.85,
            velocity_theta: 0.0,
            velocity_phi: 0.0,
            velocity_radius: 0.0,
        }
    }

    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.velocity_theta += delta_x * self.rotate_speed;
        self.velocity_phi -= delta_y * self.rotate_speed;
    }

    pub fn zoom(&mut self, delta: f32) {
        self.velocity_radius -= delta * self.zoom_speed * self.radius;
    }

    pub fn update(&mut self) {
        self.theta += self.velocity_theta;
        self.phi = (self.phi + self.velocity_phi).clamp(self.min_phi, self.max_phi);
        self.radius = (self.radius + self.velocity_radius).clamp(self.min_radius, self.max_radius);

        self.velocity_theta *= self.damping;
        self.velocity_phi *= self.damping;
        self.velocity_radius *= self.damping;

        if self.velocity_theta.abs() < 0.0001 {
            self.velocity_theta = 0.0;
        }
        if self.velocity_phi.abs() < 0.0001 {
            self.velocity_phi = 0.0;
        }
        if self.velocity_radius.abs() < 0.0001 {
            self.velocity_radius = 0.0;
        }
    }

    pub fn camera_position(&self) -> Vec3 {
        let x = self.radius * self.phi.sin() * self.theta.cos();
        let y = self.radius * self.phi.cos();
        let z = self.radius * self.phi.sin() * self.theta.sin();
        self.center + Vec3::new(x, y, z)
    }

    pub fn update_camera(&self, camera: &mut Camera) {
        camera.position = self.camera_position();
        camera.target = self.center;
    }
}
