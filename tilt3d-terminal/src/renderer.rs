//! Presents the framebuffer in a true-color terminal
use crossterm::{
    cursor,
    style::{Color, Colors, Print, ResetColor, SetColors},
    QueueableCommand,
};
use std::io::Write;
use tilt3d_core::{Framebuffer, Rgb};

/// Upper half block: foreground paints the top pixel, background the bottom
const HALF_BLOCK: char = '\u{2580}';

/// Rows reserved above the image for the status line
const STATUS_ROWS: usize = 1;

/// Down-samples the framebuffer to terminal cells, two pixels per cell
pub struct TerminalPresenter {
    cols: usize,
    rows: usize,
    cells: Vec<(Rgb, Rgb)>,
}

impl TerminalPresenter {
    pub fn new(cols: usize, rows: usize) -> Self {
        let mut presenter = Self {
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        };
        presenter.resize(cols, rows);
        presenter
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows.saturating_sub(STATUS_ROWS);
        self.cells = vec![(Rgb::BLACK, Rgb::BLACK); self.cols * self.rows];
    }

    #[cfg(test)]
    fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    #[cfg(test)]
    fn cells(&self) -> &[(Rgb, Rgb)] {
        &self.cells
    }

    /// Sample the framebuffer into the cell grid, keeping its aspect ratio
    /// and centering it. Cells outside the image stay black.
    pub fn sample(&mut self, fb: &Framebuffer) {
        self.cells.fill((Rgb::BLACK, Rgb::BLACK));
        if self.cols == 0 || self.rows == 0 || fb.width() == 0 || fb.height() == 0 {
            return;
        }

        let target_w = self.cols;
        let target_h = self.rows * 2;
        let scale = (target_w as f32 / fb.width() as f32).min(target_h as f32 / fb.height() as f32);
        let image_w = ((fb.width() as f32 * scale) as usize).clamp(1, target_w);
        let image_h = ((fb.height() as f32 * scale) as usize).clamp(1, target_h);
        let left = (target_w - image_w) / 2;
        let top = (target_h - image_h) / 2;

        let pixel = |tx: usize, ty: usize| -> Rgb {
            if tx < left || ty < top || tx >= left + image_w || ty >= top + image_h {
                return Rgb::BLACK;
            }
            let sx = (tx - left) * fb.width() / image_w;
            let sy = (ty - top) * fb.height() / image_h;
            fb.get(sx, sy).unwrap_or(Rgb::BLACK)
        };

        for row in 0..self.rows {
            for col in 0..self.cols {
                self.cells[row * self.cols + col] = (pixel(col, row * 2), pixel(col, row * 2 + 1));
            }
        }
    }

    /// Queue the sampled cells below the status line
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<(Rgb, Rgb)> = None;

        for row in 0..self.rows {
            writer.queue(cursor::MoveTo(0, (row + STATUS_ROWS) as u16))?;
            for col in 0..self.cols {
                let cell = self.cells[row * self.cols + col];
                if current != Some(cell) {
                    writer.queue(SetColors(Colors::new(to_color(cell.0), to_color(cell.1))))?;
                    current = Some(cell);
                }
                writer.queue(Print(HALF_BLOCK))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilt3d_core::{Canvas, ScreenPoint};

    #[test]
    fn test_status_row_is_reserved() {
        let presenter = TerminalPresenter::new(80, 24);
        assert_eq!(presenter.size(), (80, 23));
        assert_eq!(presenter.cells().len(), 80 * 23);
    }

    #[test]
    fn test_sample_keeps_aspect_and_centers() {
        // 8x6 cells give a 8x12 pixel target; a 4x3 image scales by 2 to 8x6
        let mut presenter = TerminalPresenter::new(8, 7);
        let mut fb = Framebuffer::new(4, 3);
        fb.clear(Rgb::RED);
        presenter.sample(&fb);

        let cells = presenter.cells();
        // 3 pixel rows of padding on top: cell row 1 straddles the edge
        assert_eq!(cells[0], (Rgb::BLACK, Rgb::BLACK));
        assert_eq!(cells[8], (Rgb::BLACK, Rgb::RED));
        assert_eq!(cells[2 * 8], (Rgb::RED, Rgb::RED));
        assert_eq!(cells[5 * 8], (Rgb::BLACK, Rgb::BLACK));
    }

    #[test]
    fn test_sample_follows_pixels() {
        let mut presenter = TerminalPresenter::new(4, 3);
        let mut fb = Framebuffer::new(4, 4);
        fb.fill_polygon(
            &[
                ScreenPoint::new(0, 0),
                ScreenPoint::new(2, 0),
                ScreenPoint::new(2, 4),
                ScreenPoint::new(0, 4),
            ],
            Rgb::BLUE,
        );
        presenter.sample(&fb);

        assert_eq!(presenter.cells()[0], (Rgb::BLUE, Rgb::BLUE));
        assert_eq!(presenter.cells()[3], (Rgb::BLACK, Rgb::BLACK));
    }

    #[test]
    fn test_draw_emits_one_glyph_per_cell() {
        let mut presenter = TerminalPresenter::new(5, 3);
        presenter.sample(&Framebuffer::new(10, 8));
        let mut out = Vec::new();
        presenter.draw(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(HALF_BLOCK).count(), 10);
    }

    #[test]
    fn test_empty_terminal_is_harmless() {
        let mut presenter = TerminalPresenter::new(0, 1);
        presenter.sample(&Framebuffer::new(800, 600));
        assert!(presenter.cells().is_empty());
    }
}
