//! Vector helpers layered on top of `glam`.
//!
//! `glam::Vec3` already covers addition, subtraction, scaling, `dot`, `cross`,
//! `length` and `length_squared`. The extension trait below adds the in-place
//! forms the force generators and the integrator are written against.

use glam::Vec3;

/// In-place vector operations used by particle integration and force laws.
pub trait ParticleVecExt {
    /// `self += vector * scale` without building an intermediate value.
    fn add_scaled_vector(&mut self, vector: Vec3, scale: f32);

    /// Scales `self` to unit length. The zero vector is left untouched.
    fn normalize_in_place(&mut self);

    /// Component-wise product.
    fn component_product(self, other: Vec3) -> Vec3;

    /// Component-wise product, stored back into `self`.
    fn component_product_update(&mut self, other: Vec3);

    /// Dot product.
    fn scalar_product(self, other: Vec3) -> f32;

    /// Right-handed cross product.
    fn vector_product(self, other: Vec3) -> Vec3;

    /// Flips every component.
    fn invert(&mut self);

    /// Resets to the zero vector.
    fn clear(&mut self);
}

impl ParticleVecExt for Vec3 {
    #[inline]
    fn add_scaled_vector(&mut self, vector: Vec3, scale: f32) {
        self.x += vector.x * scale;
        self.y += vector.y * scale;
        self.z += vector.z * scale;
    }

    #[inline]
    fn normalize_in_place(&mut self) {
        let length = self.length();
        if length > 0.0 {
            *self *= 1.0 / length;
        }
    }

    #[inline]
    fn component_product(self, other: Vec3) -> Vec3 {
        self * other
    }

    #[inline]
    fn component_product_update(&mut self, other: Vec3) {
        *self *= other;
    }

    #[inline]
    fn scalar_product(self, other: Vec3) -> f32 {
        self.dot(other)
    }

    #[inline]
    fn vector_product(self, other: Vec3) -> Vec3 {
        self.cross(other)
    }

    #[inline]
    fn invert(&mut self) {
        *self = -*self;
    }

    #[inline]
    fn clear(&mut self) {
        *self = Vec3::ZERO;
    }
}

/// Unit vector along `v`, or zero when `v` has no length.
#[inline]
pub fn direction_or_zero(v: Vec3) -> Vec3 {
    let mut dir = v;
    dir.normalize_in_place();
    dir
}
