//! Four-way flood fill over raw pixel buffers.
//!
//! Starting from a seed pixel, every pixel reachable through up/down/left/right steps
//! whose color matches the seed's original color (within a tolerance) is repainted.
//! Diagonal neighbors are never followed, so regions touching only at a corner across
//! a one pixel line stay separate.
//!
//! The traversal keeps its own stack of pending points rather than recursing, and it
//! stops after as many writes as there are pixels in the buffer.
use crate::error::Error;
use crate::gfx::pixels::PixelBuffer;
use crate::gfx::prelude::*;

struct Bucket<'a> {
    old_color: Rgba8,
    new_color: Rgba8,
    tolerance: u8,
    stack: Vec<Point2D<i32>>,
    pixels: &'a mut PixelBuffer,
}

impl<'a> Bucket<'a> {
    /// Whether the point is inside the buffer and still has the old color.
    /// Out-of-bounds points are boundaries, not errors.
    fn is_fillable(&self, p: Point2D<i32>) -> bool {
        if !self.pixels.contains(p) {
            return false;
        }
        matches!(
            self.pixels.get(p.x as usize, p.y as usize),
            Some(c) if c.matches(self.old_color, self.tolerance)
        )
    }

    fn push_neighbors(&mut self, Point2D { x, y }: Point2D<i32>) {
        self.stack.extend([
            Point2D::new(x + 1, y),
            Point2D::new(x - 1, y),
            Point2D::new(x, y + 1),
            Point2D::new(x, y - 1),
        ]);
    }

    /// Fill until the stack is exhausted, writing at most `limit` pixels. Returns the
    /// number of pixels written, and whether the limit cut the fill short.
    fn run(mut self, limit: usize) -> (usize, bool) {
        let mut written = 0;

        while let Some(p) = self.stack.pop() {
            if !self.is_fillable(p) {
                continue;
            }
            if written == limit {
                return (written, true);
            }
            self.pixels.set(p.x as usize, p.y as usize, self.new_color);
            self.push_neighbors(p);

            written += 1;
        }
        (written, false)
    }
}

/// Fill the region around `seed` with the color given as a hex code.
///
/// The color is parsed before anything else, so an invalid code leaves the buffer
/// untouched. Returns the number of pixels written.
pub fn fill(
    pixels: &mut PixelBuffer,
    seed: Point2D<i32>,
    hex: &str,
    tolerance: u8,
) -> Result<usize, Error> {
    let color = hex.parse::<Rgba8>()?;

    Ok(fill_color(pixels, seed, color, tolerance))
}

/// Fill the region around `seed` with `color`. Returns the number of pixels written.
///
/// Nothing is written if the seed is outside the buffer, or if the seed's color
/// already matches `color`.
pub fn fill_color(
    pixels: &mut PixelBuffer,
    seed: Point2D<i32>,
    color: Rgba8,
    tolerance: u8,
) -> usize {
    if !pixels.contains(seed) {
        debug!("bucket: seed {} is outside of {} buffer", seed, pixels.size());
        return 0;
    }
    let old_color = if let Some(c) = pixels.get(seed.x as usize, seed.y as usize) {
        c
    } else {
        return 0;
    };

    // Repainted pixels must never match the old color again, or they would be
    // visited forever.
    if old_color.matches(color, tolerance) {
        return 0;
    }

    let limit = pixels.len();
    let bucket = Bucket {
        old_color,
        new_color: color,
        tolerance,
        stack: vec![seed],
        pixels,
    };
    let (written, truncated) = bucket.run(limit);

    if truncated {
        warn!("bucket: write limit of {} pixel(s) reached, stopping", limit);
    }
    debug!(
        "bucket: filled {} pixel(s) from {} with {} (was {})",
        written, seed, color, old_color
    );

    written
}
