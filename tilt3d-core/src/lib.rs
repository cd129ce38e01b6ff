//! tilt3d core library - geometry, transformation and rasterization logic
//!
//! This library holds the stateless per-frame pipeline for rendering a small
//! polyhedron oriented by an external tilt sensor: rotation, projection,
//! painter's-algorithm face ordering, and sensor sample decoding.

pub mod error;
pub mod frame;
pub mod geometry;
pub mod projection;
pub mod raster;
pub mod render;
pub mod sensor;
pub mod transform;

// Re-export commonly used types
pub use error::{GeometryError, SourceError};
pub use frame::FrameState;
pub use geometry::{Face, Rgb, Solid, SolidKind};
pub use projection::{Projection, ScreenPoint};
pub use raster::Framebuffer;
pub use render::{render_frame, Canvas, Scene};
pub use sensor::{parse_sample, LineBuffer, OrientationSource, RawSample};
pub use transform::{rotate, Orientation};
