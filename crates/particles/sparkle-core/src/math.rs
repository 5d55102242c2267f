//! Small vector types used for particle offsets and base positions.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// 3D vector of f64 components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    #[inline]
    pub fn distance(&self, other: &Vec3) -> f64 {
        (*self - *other).length()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

/// World anchor of a frame: position plus view angles in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub position: Vec3,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
}

impl Location {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn with_rotation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// World position of an offset relative to this anchor.
    #[inline]
    pub fn offset(&self, offset: Vec3) -> Vec3 {
        self.position + offset
    }
}

impl From<Vec3> for Location {
    fn from(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

/// Rotate `point` about `pivot` by Euler angles in radians, applied X then Y then Z.
pub fn rotate_xyz(point: Vec3, angles: Vec3, pivot: Vec3) -> Vec3 {
    if angles.is_zero() {
        return point;
    }
    let (sin_x, cos_x) = angles.x.sin_cos();
    let (sin_y, cos_y) = angles.y.sin_cos();
    let (sin_z, cos_z) = angles.z.sin_cos();

    let p = point - pivot;
    let y1 = p.y * cos_x - p.z * sin_x;
    let z1 = p.y * sin_x + p.z * cos_x;

    let x2 = p.x * cos_y + z1 * sin_y;
    let z2 = z1 * cos_y - p.x * sin_y;

    let x3 = x2 * cos_z - y1 * sin_z;
    let y3 = x2 * sin_z + y1 * cos_z;

    Vec3::new(x3, y3, z2) + pivot
}

/// Rotate every point of a cloud; see [`rotate_xyz`].
pub fn rotate_points(points: &[Vec3], angles: Vec3, pivot: Vec3) -> Vec<Vec3> {
    if angles.is_zero() {
        return points.to_vec();
    }
    points
        .iter()
        .map(|p| rotate_xyz(*p, angles, pivot))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.distance(&b) < 1e-9
    }

    #[test]
    fn quarter_turn_about_each_axis() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert!(approx(
            rotate_xyz(y, Vec3::new(FRAC_PI_2, 0.0, 0.0), Vec3::ZERO),
            Vec3::new(0.0, 0.0, 1.0)
        ));
        assert!(approx(
            rotate_xyz(x, Vec3::new(0.0, FRAC_PI_2, 0.0), Vec3::ZERO),
            Vec3::new(0.0, 0.0, -1.0)
        ));
        assert!(approx(
            rotate_xyz(x, Vec3::new(0.0, 0.0, FRAC_PI_2), Vec3::ZERO),
            Vec3::new(0.0, 1.0, 0.0)
        ));
    }

    #[test]
    fn rotation_is_about_the_pivot() {
        let pivot = Vec3::new(1.0, 0.0, 0.0);
        let p = Vec3::new(2.0, 0.0, 0.0);
        let out = rotate_xyz(p, Vec3::new(0.0, 0.0, FRAC_PI_2), pivot);
        assert!(approx(out, Vec3::new(1.0, 1.0, 0.0)));
        assert_eq!(rotate_xyz(pivot, Vec3::new(0.3, 0.2, 0.1), pivot), pivot);
    }

    #[test]
    fn zero_angles_are_identity() {
        let p = Vec3::new(0.1, 0.2, 0.3);
        assert_eq!(rotate_xyz(p, Vec3::ZERO, Vec3::new(5.0, 5.0, 5.0)), p);
    }
}
