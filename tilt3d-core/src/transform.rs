//! Orientation state and the fixed-order point rotation
use nalgebra::Point3;

/// Current device tilt around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Orientation {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Neutral orientation used at startup
    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate a point by this orientation, see [`rotate`].
    pub fn rotate(&self, point: &Point3<f32>) -> Point3<f32> {
        rotate(point, self.x, self.y, self.z)
    }

    /// Angles in degrees, for display
    pub fn degrees(&self) -> (f32, f32, f32) {
        (self.x.to_degrees(), self.y.to_degrees(), self.z.to_degrees())
    }
}

/// Rotate `point` around X, then Y, then Z.
///
/// Each step rotates the two coordinates perpendicular to its axis and feeds
/// its result into the next step, so the axis order is significant.
pub fn rotate(point: &Point3<f32>, angle_x: f32, angle_y: f32, angle_z: f32) -> Point3<f32> {
    let (mut x, mut y, mut z) = (point.x, point.y, point.z);

    let (sin, cos) = angle_x.sin_cos();
    (y, z) = (y * cos - z * sin, y * sin + z * cos);

    let (sin, cos) = angle_y.sin_cos();
    (x, z) = (x * cos + z * sin, -x * sin + z * cos);

    let (sin, cos) = angle_z.sin_cos();
    (x, y) = (x * cos - y * sin, x * sin + y * cos);

    Point3::new(x, y, z)
}
