use crate::gfx::pixels::PixelBuffer;
use crate::gfx::prelude::*;

/// Input state of the brush.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    /// Not currently drawing.
    NotDrawing,
    /// Drawing, with the last recorded position.
    Drawing { prev: Point2D<i32> },
}

/// Largest supported brush diameter, in pixels.
pub const MAX_SIZE: u32 = 256;

/// A round brush of fixed size and color.
#[derive(Debug, Clone)]
pub struct Brush {
    /// Brush diameter in pixels.
    pub size: u32,
    /// Stroke color.
    pub color: Rgba8,
    /// Current brush state.
    pub state: State,
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(4, Rgba8::BLACK)
    }
}

impl Brush {
    /// Create a brush. The size is clamped to `1..=MAX_SIZE`.
    pub fn new(size: u32, color: Rgba8) -> Self {
        Self {
            size: size.clamp(1, MAX_SIZE),
            color,
            state: State::NotDrawing,
        }
    }

    /// Check whether the brush is currently drawing.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, State::Drawing { .. })
    }

    /// Start drawing. Only records the position, nothing is painted yet.
    pub fn begin_stroke(&mut self, origin: Point2D<i32>) {
        self.state = State::Drawing { prev: origin };
    }

    /// Paint a segment from the last recorded position to `point`, and record `point`.
    /// Does nothing when not drawing. Returns the number of brush heads painted.
    ///
    /// Only the part of the segment close enough to the buffer to leave a mark is
    /// rasterized.
    pub fn extend_stroke(&mut self, point: Point2D<i32>, pixels: &mut PixelBuffer) -> usize {
        let prev = match self.state {
            State::Drawing { prev } => prev,
            State::NotDrawing => return 0,
        };
        self.state = State::Drawing { prev: point };

        let reach = self.reach();
        let min = Point2D::new(-reach, -reach);
        let max = Point2D::new(
            pixels.width() as i32 - 1 + reach,
            pixels.height() as i32 - 1 + reach,
        );
        let (from, to) = match Brush::clip(prev, point, min, max) {
            Some(segment) => segment,
            None => return 0,
        };
        let mut stroke = Vec::new();

        Brush::line(from, to, &mut stroke);
        stroke.dedup();

        for p in &stroke {
            self.paint(*p, pixels);
        }
        stroke.len()
    }

    /// Stop drawing. Safe to call when not drawing.
    pub fn end_stroke(&mut self) {
        self.state = State::NotDrawing;
    }

    /// Paint a single brush head centered on the given pixel.
    pub fn paint(&self, center: Point2D<i32>, pixels: &mut PixelBuffer) {
        let radius = self.size as f64 / 2.;
        let reach = self.reach() as i64;
        let (cx, cy) = (center.x as i64, center.y as i64);

        // Only visit the part of the head that overlaps the buffer.
        let x0 = (cx - reach).max(0);
        let y0 = (cy - reach).max(0);
        let x1 = (cx + reach).min(pixels.width() as i64 - 1);
        let y1 = (cy + reach).min(pixels.height() as i64 - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let (dx, dy) = (x - cx, y - cy);
                let d = ((dx * dx + dy * dy) as f64).sqrt();

                if d <= radius {
                    pixels.set(x as usize, y as usize, self.color);
                }
            }
        }
    }

    /// Distance from the center of a brush head to its furthest painted pixel.
    fn reach(&self) -> i32 {
        (self.size as f32 / 2.).ceil() as i32
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Draw a line between two points. Uses Bresenham's line algorithm.
    pub fn line(mut p0: Point2D<i32>, p1: Point2D<i32>, canvas: &mut Vec<Point2D<i32>>) {
        let dx = (p1.x as i64 - p0.x as i64).abs();
        let dy = -(p1.y as i64 - p0.y as i64).abs();
        let sx = if p0.x < p1.x { 1 } else { -1 };
        let sy = if p0.y < p1.y { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            canvas.push(p0);

            if p0 == p1 {
                break;
            }
            let e2 = 2 * err;

            if e2 >= dy {
                err += dy;
                p0.x += sx;
            }
            if e2 <= dx {
                err += dx;
                p0.y += sy;
            }
        }
    }

    /// Clip the segment `p0`-`p1` to the rectangle spanning `min` to `max`, both
    /// inclusive. Returns `None` if the segment lies entirely outside of it.
    /// Uses the Liang-Barsky algorithm.
    pub fn clip(
        p0: Point2D<i32>,
        p1: Point2D<i32>,
        min: Point2D<i32>,
        max: Point2D<i32>,
    ) -> Option<(Point2D<i32>, Point2D<i32>)> {
        let (x0, y0) = (p0.x as f64, p0.y as f64);
        let (dx, dy) = (p1.x as f64 - x0, p1.y as f64 - y0);
        let (mut t0, mut t1) = (0f64, 1f64);

        for (p, q) in [
            (-dx, x0 - min.x as f64),
            (dx, max.x as f64 - x0),
            (-dy, y0 - min.y as f64),
            (dy, max.y as f64 - y0),
        ] {
            if p == 0. {
                if q < 0. {
                    return None;
                }
            } else {
                let r = q / p;

                if p < 0. {
                    if r > t1 {
                        return None;
                    }
                    t0 = t0.max(r);
                } else {
                    if r < t0 {
                        return None;
                    }
                    t1 = t1.min(r);
                }
            }
        }
        let at = |t: f64| {
            Point2D::new(
                (x0 + t * dx).round() as i32,
                (y0 + t * dy).round() as i32,
            )
        };
        Some((at(t0), at(t1)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn painted(pixels: &PixelBuffer) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for y in 0..pixels.height() {
            for x in 0..pixels.width() {
                if pixels.get(x, y) != Some(Rgba8::TRANSPARENT) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_line() {
        let mut canvas = Vec::new();
        Brush::line(Point2D::new(0, 0), Point2D::new(4, 2), &mut canvas);

        assert_eq!(canvas.first(), Some(&Point2D::new(0, 0)));
        assert_eq!(canvas.last(), Some(&Point2D::new(4, 2)));
        assert_eq!(canvas.len(), 5);

        canvas.clear();
        Brush::line(Point2D::new(3, 3), Point2D::new(3, 3), &mut canvas);
        assert_eq!(canvas, vec![Point2D::new(3, 3)]);

        canvas.clear();
        Brush::line(Point2D::new(2, 5), Point2D::new(2, 1), &mut canvas);
        assert_eq!(canvas.len(), 5);
        assert!(canvas.iter().all(|p| p.x == 2));
    }

    #[test]
    fn test_paint() {
        let mut pixels = PixelBuffer::new([5, 5]);
        Brush::new(1, Rgba8::BLACK).paint(Point2D::new(2, 2), &mut pixels);
        assert_eq!(painted(&pixels), vec![(2, 2)]);

        let mut pixels = PixelBuffer::new([5, 5]);
        Brush::new(2, Rgba8::BLACK).paint(Point2D::new(2, 2), &mut pixels);
        assert_eq!(painted(&pixels), vec![(2, 1), (1, 2), (2, 2), (3, 2), (2, 3)]);

        // Heads partially outside the buffer are clipped.
        let mut pixels = PixelBuffer::new([5, 5]);
        Brush::new(2, Rgba8::BLACK).paint(Point2D::new(0, 0), &mut pixels);
        assert_eq!(painted(&pixels), vec![(0, 0), (1, 0), (0, 1)]);
    }

    #[test]
    fn test_stroke() {
        let mut pixels = PixelBuffer::new([8, 8]);
        let mut brush = Brush::new(1, Rgba8::BLACK);

        assert_eq!(brush.extend_stroke(Point2D::new(1, 1), &mut pixels), 0);
        assert!(pixels.is_blank());

        brush.begin_stroke(Point2D::new(1, 1));
        assert!(pixels.is_blank());

        assert_eq!(brush.extend_stroke(Point2D::new(4, 1), &mut pixels), 4);
        assert_eq!(brush.state, State::Drawing { prev: Point2D::new(4, 1) });
        assert_eq!(brush.extend_stroke(Point2D::new(4, 3), &mut pixels), 3);
        assert_eq!(
            painted(&pixels),
            vec![(1, 1), (2, 1), (3, 1), (4, 1), (4, 2), (4, 3)]
        );

        brush.end_stroke();
        brush.end_stroke();
        assert!(!brush.is_drawing());
    }

    #[test]
    fn test_stroke_off_surface() {
        let mut pixels = PixelBuffer::new([16, 16]);
        let mut brush = Brush::new(1, Rgba8::BLACK);

        // Only the heads up to one pixel past the edge are painted.
        brush.begin_stroke(Point2D::new(1, 1));
        assert_eq!(brush.extend_stroke(Point2D::new(i32::MAX, 1), &mut pixels), 16);
        assert_eq!(pixels.get(15, 1), Some(Rgba8::BLACK));

        // Coming back in from far away.
        assert_eq!(brush.extend_stroke(Point2D::new(1, 8), &mut pixels), 16);
        assert_eq!(pixels.get(1, 8), Some(Rgba8::BLACK));
        assert_eq!(pixels.get(15, 8), Some(Rgba8::BLACK));

        // Segments entirely outside the buffer paint nothing.
        brush.begin_stroke(Point2D::new(i32::MIN, i32::MIN));
        assert_eq!(brush.extend_stroke(Point2D::new(i32::MAX, i32::MIN), &mut pixels), 0);
        assert_eq!(brush.state, State::Drawing { prev: Point2D::new(i32::MAX, i32::MIN) });
    }

    #[test]
    fn test_clip() {
        let min = Point2D::new(0, 0);
        let max = Point2D::new(9, 9);

        assert_eq!(
            Brush::clip(Point2D::new(2, 3), Point2D::new(5, 7), min, max),
            Some((Point2D::new(2, 3), Point2D::new(5, 7)))
        );
        assert_eq!(
            Brush::clip(Point2D::new(-10, 4), Point2D::new(20, 4), min, max),
            Some((Point2D::new(0, 4), Point2D::new(9, 4)))
        );
        assert_eq!(
            Brush::clip(Point2D::new(-5, -5), Point2D::new(-1, 20), min, max),
            None
        );
    }

    #[test]
    fn test_large_brush() {
        let mut pixels = PixelBuffer::new([4, 4]);
        let brush = Brush::new(100_000, Rgba8::BLACK);

        assert_eq!(brush.size, MAX_SIZE);
        brush.paint(Point2D::new(1, 1), &mut pixels);
        assert!(pixels.pixels().all(|c| c == Rgba8::BLACK));

        // Heads centered far outside the buffer don't reach it.
        let mut pixels = PixelBuffer::new([4, 4]);
        brush.paint(Point2D::new(i32::MAX, i32::MIN), &mut pixels);
        assert!(pixels.is_blank());
    }
}
