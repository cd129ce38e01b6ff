//! Painter's-algorithm frame pipeline
//!
//! Every frame rotates the active solid, ranks its faces by mean depth, and
//! fills them far to near so nearer faces cover farther ones. There is no
//! depth buffer and no culling: correct occlusion relies on the solids being
//! convex.
use nalgebra::Point3;

use crate::geometry::{Rgb, Solid, SolidKind};
use crate::projection::{Projection, ScreenPoint};
use crate::transform::Orientation;

/// Drawing surface the pipeline renders into
pub trait Canvas {
    fn clear(&mut self, color: Rgb);

    /// Fill a flat-colored polygon, overwriting whatever is underneath.
    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Rgb);
}

/// Render context: the active solid and how it is projected
#[derive(Debug, Clone)]
pub struct Scene {
    pub solid: Solid,
    pub projection: Projection,
}

impl Scene {
    pub fn new(solid: Solid, projection: Projection) -> Self {
        Self { solid, projection }
    }

    pub fn with_kind(kind: SolidKind, width: u32, height: u32) -> Self {
        Self::new(kind.solid(), Projection::new(width, height))
    }

    /// Rotate every vertex of the solid
    pub fn transform_vertices(&self, orientation: &Orientation) -> Vec<Point3<f32>> {
        self.solid
            .vertices()
            .iter()
            .map(|v| orientation.rotate(v))
            .collect()
    }

    /// Mean z of each face's rotated vertices, in face order
    pub fn face_depths(&self, transformed: &[Point3<f32>]) -> Vec<f32> {
        self.solid
            .faces()
            .iter()
            .map(|face| {
                let sum: f32 = face.indices.iter().map(|&i| transformed[i].z).sum();
                sum / face.arity() as f32
            })
            .collect()
    }

    /// Face indices ordered back to front.
    ///
    /// Larger z lies farther from the viewer, so the ranking is by depth
    /// descending. Ties fall in an arbitrary order.
    pub fn draw_order(&self, transformed: &[Point3<f32>]) -> Vec<usize> {
        let depths = self.face_depths(transformed);
        let mut order: Vec<usize> = (0..depths.len()).collect();
        order.sort_unstable_by(|&a, &b| depths[b].total_cmp(&depths[a]));
        order
    }

    /// Project one face of an already rotated vertex set
    pub fn project_face(&self, face: usize, transformed: &[Point3<f32>]) -> Vec<ScreenPoint> {
        self.solid.faces()[face]
            .indices
            .iter()
            .map(|&i| self.projection.project(&transformed[i]))
            .collect()
    }

    /// Draw the faces of a rotated vertex set in painter's order
    pub fn draw<C: Canvas + ?Sized>(&self, transformed: &[Point3<f32>], canvas: &mut C) {
        for face in self.draw_order(transformed) {
            let points = self.project_face(face, transformed);
            canvas.fill_polygon(&points, self.solid.face_color(face));
        }
    }
}

/// Render one full frame: clear to black, rotate, sort, fill.
pub fn render_frame<C: Canvas + ?Sized>(scene: &Scene, orientation: &Orientation, canvas: &mut C) {
    let transformed = scene.transform_vertices(orientation);
    canvas.clear(Rgb::BLACK);
    scene.draw(&transformed, canvas);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records draw calls instead of rasterizing them
    #[derive(Default)]
    struct Recorder {
        clears: usize,
        polygons: Vec<(Vec<ScreenPoint>, Rgb)>,
    }

    impl Canvas for Recorder {
        fn clear(&mut self, _color: Rgb) {
            self.clears += 1;
            self.polygons.clear();
        }

        fn fill_polygon(&mut self, points: &[ScreenPoint], color: Rgb) {
            self.polygons.push((points.to_vec(), color));
        }
    }

    fn cube_scene() -> Scene {
        Scene::with_kind(SolidKind::Cube, 800, 600)
    }

    #[test]
    fn test_face_depths_at_rest() {
        let scene = cube_scene();
        let transformed = scene.transform_vertices(&Orientation::zero());
        let depths = scene.face_depths(&transformed);
        assert_eq!(depths, vec![-1.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_cube_draw_order_at_rest() {
        let scene = cube_scene();
        let transformed = scene.transform_vertices(&Orientation::zero());
        let order = scene.draw_order(&transformed);

        assert_eq!(order.len(), 6);
        // z = +1 face is farthest from the viewer, z = -1 face nearest
        assert_eq!(scene.solid.faces()[order[0]].name, "front");
        assert_eq!(scene.solid.faces()[order[5]].name, "back");
    }

    #[test]
    fn test_half_turn_swaps_ends() {
        let scene = cube_scene();
        let orientation = Orientation::new(0.0, std::f32::consts::PI, 0.0);
        let transformed = scene.transform_vertices(&orientation);
        let order = scene.draw_order(&transformed);

        assert_eq!(scene.solid.faces()[order[0]].name, "back");
        assert_eq!(scene.solid.faces()[order[5]].name, "front");
    }

    #[test]
    fn test_order_is_non_increasing_in_depth() {
        let scene = Scene::with_kind(SolidKind::Prism, 800, 600);
        let transformed = scene.transform_vertices(&Orientation::new(0.3, -0.8, 1.9));
        let depths = scene.face_depths(&transformed);
        let order = scene.draw_order(&transformed);

        for pair in order.windows(2) {
            assert!(depths[pair[0]] >= depths[pair[1]]);
        }
    }

    #[test]
    fn test_prism_depth_uses_face_arity() {
        let scene = Scene::with_kind(SolidKind::Prism, 800, 600);
        let transformed = scene.transform_vertices(&Orientation::zero());
        let depths = scene.face_depths(&transformed);
        // Triangular caps average over three vertices
        assert_eq!(depths[0], -1.0);
        assert_eq!(depths[1], 1.0);
    }

    #[test]
    fn test_render_frame_draws_every_face_once() {
        let scene = cube_scene();
        let mut recorder = Recorder::default();
        render_frame(&scene, &Orientation::new(0.2, 0.4, 0.6), &mut recorder);

        assert_eq!(recorder.clears, 1);
        assert_eq!(recorder.polygons.len(), 6);
        assert!(recorder.polygons.iter().all(|(points, _)| points.len() == 4));

        let mut colors: Vec<_> = recorder.polygons.iter().map(|(_, c)| (c.r, c.g, c.b)).collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), 6);
    }

    #[test]
    fn test_last_polygon_is_nearest_face() {
        let scene = cube_scene();
        let mut recorder = Recorder::default();
        render_frame(&scene, &Orientation::zero(), &mut recorder);

        let (points, color) = recorder.polygons.last().cloned().unwrap();
        assert_eq!(color, Rgb::RED);
        // z = -1 corners project with factor 100 / 4
        assert!(points.contains(&ScreenPoint::new(425, 275)));
    }
}
