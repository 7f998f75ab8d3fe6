//! Three-component vectors and the scalar helpers animation code leans on.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use glam::{DVec2, DVec3};

/// A full turn in radians.
pub const TAU: f64 = std::f64::consts::TAU;

/// A point or direction in 3D space.
///
/// `+x` points right, `+y` points down (screen convention) and `+z` points
/// toward the viewer. Values are `Copy`; every node and path point owns its own.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector::new(0.0, 0.0, 0.0);
    pub const ONE: Vector = Vector::new(1.0, 1.0, 1.0);
    pub const Z: Vector = Vector::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector { x, y, z }
    }

    /// A vector with every component set to `value`.
    pub const fn splat(value: f64) -> Self {
        Vector::new(value, value, value)
    }

    pub const fn x(x: f64) -> Self {
        Vector::new(x, 0.0, 0.0)
    }

    pub const fn y(y: f64) -> Self {
        Vector::new(0.0, y, 0.0)
    }

    pub const fn z(z: f64) -> Self {
        Vector::new(0.0, 0.0, z)
    }

    #[inline]
    pub fn as_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// The projected (x, y) part.
    #[inline]
    pub fn xy(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Componentwise product (non-uniform scale).
    pub fn multiply(self, scale: Vector) -> Vector {
        (self.as_dvec3() * scale.as_dvec3()).into()
    }

    /// Rotate about each axis in the fixed order z, then y, then x.
    pub fn rotate(self, rotation: Vector) -> Vector {
        self.rotate_z(rotation.z)
            .rotate_y(rotation.y)
            .rotate_x(rotation.x)
    }

    /// Rotate within the (x, y) plane.
    pub fn rotate_z(self, angle: f64) -> Vector {
        let Some((a, b)) = rotate_pair(self.x, self.y, angle) else {
            return self;
        };
        Vector::new(a, b, self.z)
    }

    /// Rotate within the (y, z) plane.
    pub fn rotate_x(self, angle: f64) -> Vector {
        let Some((a, b)) = rotate_pair(self.y, self.z, angle) else {
            return self;
        };
        Vector::new(self.x, a, b)
    }

    /// Rotate within the (x, z) plane.
    pub fn rotate_y(self, angle: f64) -> Vector {
        let Some((a, b)) = rotate_pair(self.x, self.z, angle) else {
            return self;
        };
        Vector::new(a, self.y, b)
    }

    /// Scale, rotate, then translate.
    pub fn transform(self, translation: Vector, rotation: Vector, scale: Vector) -> Vector {
        self.multiply(scale).rotate(rotation) + translation
    }

    /// Linear interpolation toward `other`; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(self, other: Vector, t: f64) -> Vector {
        self.as_dvec3().lerp(other.as_dvec3(), t).into()
    }

    /// Length in 3D.
    pub fn magnitude(self) -> f64 {
        self.as_dvec3().length()
    }

    /// Length of the projected (x, y) part.
    pub fn magnitude_2d(self) -> f64 {
        self.xy().length()
    }

    /// Exact componentwise equality.
    pub fn is_same(self, other: Vector) -> bool {
        self == other
    }
}

// a' = a·cos − b·sin, b' = b·cos + a·sin; whole turns are skipped
fn rotate_pair(a: f64, b: f64, angle: f64) -> Option<(f64, f64)> {
    if angle == 0.0 || angle % TAU == 0.0 {
        return None;
    }
    let rotated = DVec2::from_angle(angle).rotate(DVec2::new(a, b));
    Some((rotated.x, rotated.y))
}

impl From<DVec3> for Vector {
    fn from(v: DVec3) -> Self {
        Vector::new(v.x, v.y, v.z)
    }
}

impl From<Vector> for DVec3 {
    fn from(v: Vector) -> Self {
        v.as_dvec3()
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, rhs: Vector) -> Vector {
        (self.as_dvec3() + rhs.as_dvec3()).into()
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, rhs: Vector) -> Vector {
        (self.as_dvec3() - rhs.as_dvec3()).into()
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, rhs: f64) -> Vector {
        (self.as_dvec3() * rhs).into()
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y, -self.z)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Vector) {
        *self = *self - rhs;
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Linear interpolation between two scalars.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (b - a) * t + a
}

/// Power-curve ease in/out. `t` wraps into [0, 1); exactly 1 stays 1.
pub fn ease_in_out(t: f64, power: i32) -> f64 {
    if power == 1 {
        return t;
    }
    let t = if t == 1.0 { 1.0 } else { t.rem_euclid(1.0) };
    let is_first_half = t < 0.5;
    let slope = if is_first_half { t } else { 1.0 - t };
    let curve = (slope * 2.0).powi(power) / 2.0;
    if is_first_half { curve } else { 1.0 - curve }
}
