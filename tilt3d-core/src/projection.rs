//! Perspective projection onto the viewport
use nalgebra::Point3;

/// Integer pixel coordinates, y growing downwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Simple perspective projection centered in the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub scale: f32,
    pub z_offset: f32,
    pub center_x: f32,
    pub center_y: f32,
}

impl Projection {
    pub const SCALE: f32 = 100.0;
    /// Keeps a unit-scale solid in front of the viewer for any rotation.
    pub const Z_OFFSET: f32 = 5.0;

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            scale: Self::SCALE,
            z_offset: Self::Z_OFFSET,
            center_x: (width / 2) as f32,
            center_y: (height / 2) as f32,
        }
    }

    /// Project a rotated point to the screen.
    ///
    /// Model y points up and screen y points down, hence the flip. Results are
    /// truncated toward zero. `z + z_offset` is never guarded: it diverges as
    /// it approaches zero, which a unit-scale solid at the default offset
    /// never reaches.
    pub fn project(&self, point: &Point3<f32>) -> ScreenPoint {
        let factor = self.scale / (point.z + self.z_offset);
        let x = point.x * factor + self.center_x;
        let y = -point.y * factor + self.center_y;
        ScreenPoint::new(x as i32, y as i32)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_creation() {
        let projection = Projection::new(800, 600);
        assert_eq!(projection.center_x, 400.0);
        assert_eq!(projection.center_y, 300.0);
        assert_eq!(projection, Projection::default());
    }

    #[test]
    fn test_project_cube_corner() {
        let projection = Projection::default();
        let p = projection.project(&Point3::new(1.0, 1.0, 1.0));
        assert_eq!(p, ScreenPoint::new(416, 283));
    }

    #[test]
    fn test_origin_projects_to_center() {
        let projection = Projection::new(640, 480);
        assert_eq!(projection.project(&Point3::origin()), ScreenPoint::new(320, 240));
    }

    #[test]
    fn test_farther_points_shrink() {
        let projection = Projection::default();
        let mut last = f32::INFINITY;
        for z in [-4.0, -2.0, 0.0, 1.0, 3.0, 10.0] {
            let p = projection.project(&Point3::new(1.5, -1.5, z));
            let dx = (p.x - 400) as f32;
            let dy = (p.y - 300) as f32;
            let offset = (dx * dx + dy * dy).sqrt();
            assert!(offset < last, "offset {} at z={} not below {}", offset, z, last);
            last = offset;
        }
    }

    #[test]
    fn test_y_is_flipped() {
        let projection = Projection::default();
        let up = projection.project(&Point3::new(0.0, 1.0, 0.0));
        assert!(up.y < 300);
    }
}
