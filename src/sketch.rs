//! Freehand sketch capture.
use crate::brush::Brush;
use crate::error::Error;
use crate::gfx::pixels::PixelBuffer;
use crate::gfx::prelude::*;
use crate::png::{self, EncodedImage};

/// A drawing surface that accumulates freehand strokes into a pixel buffer.
#[derive(Debug, Clone)]
pub struct SketchSurface {
    pixels: PixelBuffer,
    brush: Brush,
}

impl SketchSurface {
    /// Create a blank surface.
    ///
    /// # Panics
    ///
    /// Panics if the size isn't supported, see [`PixelBuffer::new`].
    pub fn new(size: impl Into<Size<u32>>, brush: Brush) -> Self {
        Self {
            pixels: PixelBuffer::new(size),
            brush,
        }
    }

    pub fn size(&self) -> Size<u32> {
        self.pixels.size()
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    /// Whether a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        self.brush.is_drawing()
    }

    /// Pen down. Nothing is drawn until the stroke is extended.
    pub fn begin_stroke(&mut self, point: Point) {
        self.brush.begin_stroke(point.floor());
    }

    /// Draw from the last recorded point to `point`. No-op if no stroke is in progress.
    pub fn extend_stroke(&mut self, point: Point) {
        self.brush.extend_stroke(point.floor(), &mut self.pixels);
    }

    /// Pen up.
    pub fn end_stroke(&mut self) {
        self.brush.end_stroke();
    }

    /// Whether nothing was drawn since the surface was created, cleared or resized.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_blank()
    }

    /// Erase all strokes, keeping the current size.
    pub fn clear(&mut self) {
        self.brush.end_stroke();
        self.pixels.clear();

        info!("sketch: cleared");
    }

    /// Reallocate the buffer at a new size. Prior strokes are discarded, along with
    /// any stroke in progress. Unsupported sizes leave the surface untouched.
    pub fn resize(&mut self, size: impl Into<Size<u32>>) -> Result<(), Error> {
        let size = size.into();
        let pixels = PixelBuffer::try_new(size).ok_or(Error::InvalidSize(size))?;

        self.brush.end_stroke();
        self.pixels = pixels;

        info!("sketch: resized to {}", size);

        Ok(())
    }

    /// Encode the sketch as a PNG on an opaque white background. The live buffer is
    /// not modified.
    pub fn export_as_image(&self) -> Result<EncodedImage, Error> {
        if self.is_empty() {
            return Err(Error::EmptyCanvas);
        }
        let image = png::encode(&self.pixels.composite(Rgba8::WHITE))?;

        debug!(
            "sketch: exported {} image ({} bytes)",
            image.size,
            image.data.len()
        );
        Ok(image)
    }
}
