use std::collections::HashMap;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const ORANGE: Rgb = Rgb(255, 165, 0);
pub const GRAY: Rgb = Rgb(169, 169, 169);

/// Text placed on the canvas, rendered by the presenter on top of the pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Top-left corner in canvas pixels
    pub position: [f64; 2],
    pub text: String,
    pub color: Rgb,
}

/// Off-screen frame: a pixel buffer plus text overlays
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    background: Rgb,
    pixels: Vec<Rgb>,
    labels: Vec<Label>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        Canvas {
            width,
            height,
            background,
            pixels: vec![background; width * height],
            labels: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Resets every pixel to the background and drops all labels
    pub fn clear(&mut self) {
        self.pixels.fill(self.background);
        self.labels.clear();
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Sets a pixel, ignoring coordinates outside the canvas
    pub fn set_pixel(&mut self, x: isize, y: isize, color: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            let offset = y as usize * self.width + x as usize;
            self.pixels[offset] = color;
        }
    }

    /// Stamps a square brush of side `width` at a pixel
    fn stamp(&mut self, x: isize, y: isize, width: usize, color: Rgb) {
        let width = width.max(1) as isize;
        let start = -(width - 1) / 2;
        for dy in start..start + width {
            for dx in start..start + width {
                self.set_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// Draws a line between two points using Bresenham's algorithm
    pub fn draw_line(&mut self, from: [f64; 2], to: [f64; 2], color: Rgb, width: usize) {
        let (mut x0, mut y0, x1, y1) = (
            from[0].round() as isize,
            from[1].round() as isize,
            to[0].round() as isize,
            to[1].round() as isize,
        );
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy; // error value e_xy

        loop {
            self.stamp(x0, y0, width, color);

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Fills a disc
    pub fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Rgb) {
        let cx = center[0].round() as isize;
        let cy = center[1].round() as isize;
        let r = radius.round() as isize;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Outlines an axis-aligned rectangle
    pub fn stroke_rect(&mut self, origin: [f64; 2], size: [f64; 2], color: Rgb, width: usize) {
        let [x, y] = origin;
        let [w, h] = size;
        self.stroke_polygon(&[[x, y], [x + w, y], [x + w, y + h], [x, y + h]], color, width);
    }

    /// Outlines a closed polygon
    pub fn stroke_polygon(&mut self, points: &[[f64; 2]], color: Rgb, width: usize) {
        for (i, &start) in points.iter().enumerate() {
            let end = points[(i + 1) % points.len()];
            self.draw_line(start, end, color, width);
        }
    }

    /// Queues a text label at a canvas position
    pub fn draw_text(&mut self, position: [f64; 2], text: impl Into<String>, color: Rgb) {
        self.labels.push(Label {
            position,
            text: text.into(),
            color,
        });
    }

    /// Reduces the canvas to a `cols` x `rows` grid.
    ///
    /// Each output cell takes the most frequent non-background color of the
    /// block it covers, so thin strokes survive the reduction.
    pub fn downsample(&self, cols: usize, rows: usize) -> Vec<Rgb> {
        let mut out = Vec::with_capacity(cols * rows);
        let mut counts: HashMap<Rgb, usize> = HashMap::new();
        for row in 0..rows {
            let y0 = row * self.height / rows;
            let y1 = ((row + 1) * self.height / rows).max(y0 + 1).min(self.height);
            for col in 0..cols {
                let x0 = col * self.width / cols;
                let x1 = ((col + 1) * self.width / cols).max(x0 + 1).min(self.width);

                counts.clear();
                for y in y0..y1 {
                    for x in x0..x1 {
                        let color = self.pixels[y * self.width + x];
                        if color != self.background {
                            *counts.entry(color).or_insert(0) += 1;
                        }
                    }
                }
                let color = counts
                    .iter()
                    .max_by_key(|(_, count)| **count)
                    .map(|(color, _)| *color)
                    .unwrap_or(self.background);
                out.push(color);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_covers_both_endpoints() {
        let mut canvas = Canvas::new(20, 20, WHITE);
        canvas.draw_line([2.0, 3.0], [15.0, 11.0], BLACK, 1);
        assert_eq!(canvas.pixel(2, 3), Some(BLACK));
        assert_eq!(canvas.pixel(15, 11), Some(BLACK));
        assert_eq!(canvas.pixel(15, 3), Some(WHITE));
    }

    #[test]
    fn drawing_off_canvas_is_clipped() {
        let mut canvas = Canvas::new(10, 10, WHITE);
        canvas.draw_line([-50.0, 5.0], [50.0, 5.0], BLACK, 2);
        canvas.fill_circle([5.0, 200.0], 15.0, ORANGE);
        assert_eq!(canvas.pixel(0, 5), Some(BLACK));
        assert_eq!(canvas.pixel(9, 5), Some(BLACK));
        assert_eq!(canvas.pixel(10, 5), None);
    }

    #[test]
    fn circle_is_filled() {
        let mut canvas = Canvas::new(40, 40, WHITE);
        canvas.fill_circle([20.0, 20.0], 5.0, ORANGE);
        assert_eq!(canvas.pixel(20, 20), Some(ORANGE));
        assert_eq!(canvas.pixel(25, 20), Some(ORANGE));
        assert_eq!(canvas.pixel(24, 24), Some(WHITE));
    }

    #[test]
    fn clear_resets_pixels_and_labels() {
        let mut canvas = Canvas::new(10, 10, WHITE);
        canvas.fill_circle([5.0, 5.0], 2.0, BLACK);
        canvas.draw_text([1.0, 1.0], "S", GRAY);
        canvas.clear();
        assert_eq!(canvas.pixel(5, 5), Some(WHITE));
        assert!(canvas.labels().is_empty());
    }

    #[test]
    fn downsample_keeps_thin_strokes() {
        let mut canvas = Canvas::new(100, 100, WHITE);
        canvas.draw_line([0.0, 50.0], [99.0, 50.0], BLACK, 1);
        let cells = canvas.downsample(10, 10);
        assert_eq!(cells.len(), 100);
        // Row 5 covers canvas rows 50..60
        assert!(cells[50..60].iter().all(|&c| c == BLACK));
        assert!(cells[0..10].iter().all(|&c| c == WHITE));
    }

    #[test]
    fn downsample_larger_than_canvas() {
        let mut canvas = Canvas::new(2, 2, WHITE);
        canvas.set_pixel(1, 1, BLACK);
        let cells = canvas.downsample(4, 4);
        assert_eq!(cells.len(), 16);
        assert_eq!(cells[15], BLACK);
        assert_eq!(cells[0], WHITE);
    }
}
