use super::{ApproxEq, Point3, Vector2, Vector3, EPSILON};
use serde::{Deserialize, Serialize};

/// Planar position. Fractional (0..1 of the pallet extents) inside a layer,
/// absolute millimetres once resolved against a frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate2 {
    pub x: f64,
    pub y: f64,
}

impl Coordinate2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_vector(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }
}

/// Absolute machine-frame position in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinate3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn sub(&self, other: &Coordinate3) -> Coordinate3 {
        Coordinate3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn add(&self, other: &Coordinate3) -> Coordinate3 {
        Coordinate3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn scale(&self, alpha: f64) -> Coordinate3 {
        Coordinate3::new(self.x * alpha, self.y * alpha, self.z * alpha)
    }

    pub fn norm(&self) -> f64 {
        self.to_vector().norm()
    }

    pub fn distance(&self, other: &Coordinate3) -> f64 {
        self.sub(other).norm()
    }

    pub fn to_point(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn to_vector(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Point3> for Coordinate3 {
    fn from(p: Point3) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<Vector3> for Coordinate3 {
    fn from(v: Vector3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl ApproxEq for Coordinate3 {
    fn approx_eq(&self, other: &Self) -> bool {
        self.sub(other).to_vector().norm_squared() < EPSILON * EPSILON
    }
}

/// Angle of the XY projection of `v` measured from the machine +X axis, in degrees.
pub fn planar_angle_deg(v: &Vector3) -> f64 {
    v.y.atan2(v.x).to_degrees()
}
