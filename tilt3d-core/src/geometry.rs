//! Fixed polyhedra rendered by the pipeline
use nalgebra::Point3;

use crate::error::GeometryError;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);
    pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A planar polygon given as indices into the owning solid's vertex list.
///
/// Winding only decides the outline that gets filled; nothing is culled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub name: &'static str,
    pub indices: Vec<usize>,
}

impl Face {
    pub fn new(name: &'static str, indices: &[usize]) -> Self {
        Self {
            name,
            indices: indices.to_vec(),
        }
    }

    /// Number of corners
    pub fn arity(&self) -> usize {
        self.indices.len()
    }
}

/// Immutable solid: vertices, faces and one color per face
#[derive(Debug, Clone)]
pub struct Solid {
    vertices: Vec<Point3<f32>>,
    faces: Vec<Face>,
    face_colors: Vec<Rgb>,
}

impl Solid {
    /// Build a solid, checking that every face indexes a real vertex, has 3 or
    /// 4 corners, and has a color.
    pub fn new(
        vertices: Vec<Point3<f32>>,
        faces: Vec<Face>,
        face_colors: Vec<Rgb>,
    ) -> Result<Self, GeometryError> {
        if vertices.len() < 4 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }
        if faces.len() != face_colors.len() {
            return Err(GeometryError::ColorCountMismatch {
                faces: faces.len(),
                colors: face_colors.len(),
            });
        }
        for (i, face) in faces.iter().enumerate() {
            if !(3..=4).contains(&face.arity()) {
                return Err(GeometryError::BadFaceArity {
                    face: i,
                    len: face.arity(),
                });
            }
            if let Some(&index) = face.indices.iter().find(|&&v| v >= vertices.len()) {
                return Err(GeometryError::IndexOutOfRange {
                    face: i,
                    index,
                    count: vertices.len(),
                });
            }
        }

        Ok(Self {
            vertices,
            faces,
            face_colors,
        })
    }

    /// Built-in definitions are checked by the tests below, so they skip
    /// validation here.
    fn builtin(vertices: Vec<Point3<f32>>, faces: Vec<Face>, face_colors: Vec<Rgb>) -> Self {
        debug_assert_eq!(faces.len(), face_colors.len());
        Self {
            vertices,
            faces,
            face_colors,
        }
    }

    /// Axis-aligned cube spanning [-1, 1] on every axis
    ///
    /// The viewer sits on the -z side, so the face named "front" (z = +1) is
    /// the far face and "back" (z = -1) the near one.
    pub fn cube() -> Self {
        let vertices = vec![
            Point3::new(-1.0, -1.0, -1.0),
            Point3::new(1.0, -1.0, -1.0),
            Point3::new(1.0, 1.0, -1.0),
            Point3::new(-1.0, 1.0, -1.0),
            Point3::new(-1.0, -1.0, 1.0),
            Point3::new(1.0, -1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(-1.0, 1.0, 1.0),
        ];
        let faces = vec![
            Face::new("back", &[0, 1, 2, 3]),
            Face::new("front", &[4, 5, 6, 7]),
            Face::new("bottom", &[0, 1, 5, 4]),
            Face::new("top", &[2, 3, 7, 6]),
            Face::new("right", &[1, 2, 6, 5]),
            Face::new("left", &[0, 3, 7, 4]),
        ];
        let colors = vec![
            Rgb::RED,
            Rgb::GREEN,
            Rgb::BLUE,
            Rgb::YELLOW,
            Rgb::CYAN,
            Rgb::MAGENTA,
        ];

        Self::builtin(vertices, faces, colors)
    }

    /// Triangular prism: the triangle (-1,-1) (1,-1) (0,1) extruded along z
    /// from -1 to 1.
    pub fn prism() -> Self {
        let vertices = vec![
            Point3::new(-1.0, -1.0, -1.0),
            Point3::new(1.0, -1.0, -1.0),
            Point3::new(0.0, 1.0, -1.0),
            Point3::new(-1.0, -1.0, 1.0),
            Point3::new(1.0, -1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let faces = vec![
            Face::new("back", &[0, 1, 2]),
            Face::new("front", &[3, 4, 5]),
            Face::new("bottom", &[0, 1, 4, 3]),
            Face::new("right", &[1, 2, 5, 4]),
            Face::new("left", &[2, 0, 3, 5]),
        ];
        let colors = vec![Rgb::RED, Rgb::GREEN, Rgb::BLUE, Rgb::CYAN, Rgb::MAGENTA];

        Self::builtin(vertices, faces, colors)
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face_colors(&self) -> &[Rgb] {
        &self.face_colors
    }

    pub fn face_color(&self, face: usize) -> Rgb {
        self.face_colors[face]
    }
}

/// Selects one of the predefined solids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolidKind {
    #[default]
    Cube,
    Prism,
}

impl SolidKind {
    pub fn solid(self) -> Solid {
        match self {
            SolidKind::Cube => Solid::cube(),
            SolidKind::Prism => Solid::prism(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SolidKind::Cube => "cube",
            SolidKind::Prism => "prism",
        }
    }
}
