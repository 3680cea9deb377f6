use glam::{Mat4, Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Moves the transform by `offset` in world space.
    pub fn translated(mut self, offset: Vec3) -> Self {
        self.position += offset;
        self
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * (point * self.scale) + self.position
    }

    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.slerp(other.rotation, t),
            scale: self.scale.lerp(other.scale, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_matrix_matches_point_transform() {
        let transform = Transform::from_position(Vec3::new(0.0, 0.3, 0.0))
            .with_scale(Vec3::new(0.05, 1.6, 0.05))
            .with_rotation(Quat::from_rotation_z(FRAC_PI_2));

        let point = Vec3::new(0.0, 0.5, 0.0);
        let via_matrix = transform.to_matrix().transform_point3(point);
        let direct = transform.transform_point(point);
        assert!((via_matrix - direct).length() < 1e-5);
        // the tube's long axis now runs along -X
        assert!((direct - Vec3::new(-0.8, 0.3, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_translated_and_lerp() {
        let a = Transform::IDENTITY;
        let b = a.translated(Vec3::Y);
        assert_eq!(b.position, Vec3::Y);
        assert!((a.lerp(&b, 0.5).position - Vec3::new(0.0, 0.5, 0.0)).length() < 1e-6);
    }
}
