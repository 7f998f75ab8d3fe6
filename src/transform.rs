//! Local transforms and the render-space frames they compose into.

use glam::{DAffine3, DMat3, DVec3};

use crate::vector::Vector;

/// A node's placement relative to its parent.
///
/// Applied to a point as: scale componentwise, rotate (z, then y, then x),
/// then translate. Same order as [`Vector::transform`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translate: Vector,
    /// Euler angles in radians, one per axis.
    pub rotate: Vector,
    pub scale: Vector,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate: Vector::ZERO,
            rotate: Vector::ZERO,
            scale: Vector::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_translate(mut self, translate: Vector) -> Self {
        self.translate = translate;
        self
    }

    pub fn with_rotate(mut self, rotate: Vector) -> Self {
        self.rotate = rotate;
        self
    }

    pub fn with_scale(mut self, scale: Vector) -> Self {
        self.scale = scale;
        self
    }

    /// Uniform scale shortcut.
    pub fn with_uniform_scale(self, scale: f64) -> Self {
        self.with_scale(Vector::splat(scale))
    }

    /// The affine map `p -> translate + R(scale * p)`.
    pub fn to_affine(&self) -> DAffine3 {
        let matrix = rotation_matrix(self.rotate) * DMat3::from_diagonal(self.scale.as_dvec3());
        DAffine3::from_mat3_translation(matrix, self.translate.as_dvec3())
    }
}

/// Matrix form of [`Vector::rotate`].
///
/// The y rotation turns x toward +z, which is the opposite handedness of
/// `DMat3::from_rotation_y`, hence the negated angle.
fn rotation_matrix(rotation: Vector) -> DMat3 {
    DMat3::from_rotation_x(rotation.x)
        * DMat3::from_rotation_y(-rotation.y)
        * DMat3::from_rotation_z(rotation.z)
}

/// A node's composed render-space transform.
///
/// Recomputed from scratch on every update pass; never patched incrementally.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    affine: DAffine3,
}

impl Default for Frame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Frame {
    pub const IDENTITY: Frame = Frame {
        affine: DAffine3::IDENTITY,
    };

    /// Frame of a child placed at `local` inside `self`.
    pub fn compose(&self, local: &Transform) -> Frame {
        Frame {
            affine: self.affine * local.to_affine(),
        }
    }

    /// Render-space image of the local origin.
    pub fn origin(&self) -> Vector {
        self.affine.translation.into()
    }

    /// Render-space image of the local +z axis; its length is the z scale.
    pub fn normal(&self) -> Vector {
        self.affine.transform_vector3(DVec3::Z).into()
    }

    /// Render-space length of each local unit axis.
    pub fn scale(&self) -> Vector {
        let m = self.affine.matrix3;
        Vector::new(m.x_axis.length(), m.y_axis.length(), m.z_axis.length())
    }

    /// Render-space images of the local x, y and z unit vectors.
    pub fn basis(&self) -> [Vector; 3] {
        let m = self.affine.matrix3;
        [m.x_axis.into(), m.y_axis.into(), m.z_axis.into()]
    }

    /// Map a point from local space into render space.
    pub fn point(&self, local: Vector) -> Vector {
        self.affine.transform_point3(local.as_dvec3()).into()
    }

    /// Map a direction from local space into render space (no translation).
    pub fn vector(&self, local: Vector) -> Vector {
        self.affine.transform_vector3(local.as_dvec3()).into()
    }
}
