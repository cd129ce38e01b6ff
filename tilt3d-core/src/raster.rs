//! In-memory RGB framebuffer with scanline polygon fill
use crate::geometry::Rgb;
use crate::projection::ScreenPoint;
use crate::render::Canvas;

/// Fixed-size pixel grid the pipeline draws into
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the viewport
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    fn fill_span(&mut self, y: usize, x0: i32, x1: i32, color: Rgb) {
        let start = x0.max(0) as usize;
        let end = (x1.min(self.width as i32 - 1) + 1).max(0) as usize;
        if start >= end {
            return;
        }
        let row = y * self.width;
        self.pixels[row + start..row + end].fill(color);
    }
}

impl Canvas for Framebuffer {
    fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Even-odd fill sampled at pixel centers. Every covered pixel is
    /// overwritten; nothing is blended.
    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Rgb) {
        if points.len() < 3 || self.width == 0 || self.height == 0 {
            return;
        }

        let min_y = points.iter().map(|p| p.y).min().unwrap_or(0).max(0);
        let max_y = points
            .iter()
            .map(|p| p.y)
            .max()
            .unwrap_or(0)
            .min(self.height as i32 - 1);

        let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
        for y in min_y..=max_y {
            let py = y as f32 + 0.5;
            crossings.clear();

            for (i, a) in points.iter().enumerate() {
                let b = &points[(i + 1) % points.len()];
                // Walk every edge from its upper end so faces sharing an edge
                // agree on the crossing exactly.
                let (top, bottom) = if a.y <= b.y { (a, b) } else { (b, a) };
                let (ty, by) = (top.y as f32, bottom.y as f32);
                if ty <= py && py < by {
                    let t = (py - ty) / (by - ty);
                    crossings.push(top.x as f32 + t * (bottom.x as f32 - top.x as f32));
                }
            }
            crossings.sort_by(f32::total_cmp);

            for pair in crossings.chunks_exact(2) {
                // Pixels whose center lies in [left, right)
                let x0 = (pair[0] - 0.5).ceil() as i32;
                let x1 = ((pair[1] - 0.5).ceil() as i32).saturating_sub(1);
                self.fill_span(y as usize, x0, x1, color);
            }
        }
    }
}
