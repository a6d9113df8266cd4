//! Coloring of pre-generated line art.
use nonempty::NonEmpty;

use crate::bucket;
use crate::error::Error;
use crate::gfx::color::DEFAULT_TOLERANCE;
use crate::gfx::pixels::PixelBuffer;
use crate::gfx::prelude::*;
use crate::input::Bounds;

/// Default number of snapshots kept for undo.
pub const DEFAULT_HISTORY_LIMIT: usize = 32;

/// Buffer snapshots, used for undo/redo.
#[derive(Debug, Clone)]
struct Snapshots {
    list: NonEmpty<PixelBuffer>,
    /// Index of the snapshot matching the live buffer.
    current: usize,
    limit: usize,
}

impl Snapshots {
    fn new(initial: PixelBuffer, limit: usize) -> Self {
        Self {
            list: NonEmpty::new(initial),
            current: 0,
            limit: limit.max(1),
        }
    }

    fn push(&mut self, pixels: PixelBuffer) {
        // Anything past the current snapshot can no longer be redone.
        self.list.tail.truncate(self.current);
        self.list.push(pixels);
        self.current += 1;

        while self.list.len() > self.limit {
            self.list.head = self.list.tail.remove(0);
            self.current -= 1;
        }
    }

    fn undo(&mut self) -> Option<&PixelBuffer> {
        if self.current == 0 {
            return None;
        }
        self.current -= 1;
        self.list.get(self.current)
    }

    fn redo(&mut self) -> Option<&PixelBuffer> {
        if self.current + 1 >= self.list.len() {
            return None;
        }
        self.current += 1;
        self.list.get(self.current)
    }
}

/// A surface displaying line art, colored in by flood fills.
#[derive(Debug, Clone)]
pub struct ColoringSurface {
    pixels: PixelBuffer,
    /// Whether line art was loaded into the current buffer.
    loaded: bool,
    /// Color tolerance used by fills.
    pub tolerance: u8,
    snapshots: Snapshots,
    history_limit: usize,
}

impl ColoringSurface {
    /// Create an empty surface.
    ///
    /// # Panics
    ///
    /// Panics if the size isn't supported, see [`PixelBuffer::new`].
    pub fn new(size: impl Into<Size<u32>>) -> Self {
        Self::with_history(size, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history(size: impl Into<Size<u32>>, history_limit: usize) -> Self {
        let pixels = PixelBuffer::new(size);

        Self {
            snapshots: Snapshots::new(pixels.clone(), history_limit),
            pixels,
            loaded: false,
            tolerance: DEFAULT_TOLERANCE,
            history_limit,
        }
    }

    pub fn size(&self) -> Size<u32> {
        self.pixels.size()
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Whether line art is loaded and can be colored.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Draw an image into the buffer, stretched to the surface's current size.
    /// Replaces the buffer contents and the undo history.
    pub fn load_image(&mut self, image: &PixelBuffer) {
        self.pixels = image.resample(self.size());
        self.loaded = true;
        self.reset_history();

        info!(
            "coloring: loaded {} image at {}",
            image.size(),
            self.pixels.size()
        );
    }

    /// Fill the region under a tap, given in viewport coordinates.
    pub fn handle_tap(
        &mut self,
        bounds: &Bounds,
        client: Point,
        hex: &str,
    ) -> Result<usize, Error> {
        if !self.loaded {
            return Err(Error::NoImageLoaded);
        }
        let seed = bounds.to_backing(client).floor();
        let written = bucket::fill(&mut self.pixels, seed, hex, self.tolerance)?;

        self.commit(written);

        Ok(written)
    }

    /// Fill the region around a point given in buffer coordinates.
    pub fn fill(&mut self, seed: Point, color: Rgba8) -> Result<usize, Error> {
        if !self.loaded {
            return Err(Error::NoImageLoaded);
        }
        let written =
            bucket::fill_color(&mut self.pixels, seed.floor(), color, self.tolerance);

        self.commit(written);

        Ok(written)
    }

    /// Record the buffer in the undo history if the last fill changed it.
    fn commit(&mut self, written: usize) {
        if written > 0 {
            self.snapshots.push(self.pixels.clone());
        }
    }

    /// Revert the last fill. Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if let Some(pixels) = self.snapshots.undo() {
            self.pixels = pixels.clone();
            return true;
        }
        false
    }

    /// Re-apply the last undone fill. Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        if let Some(pixels) = self.snapshots.redo() {
            self.pixels = pixels.clone();
            return true;
        }
        false
    }

    /// Reallocate the buffer at a new size. The loaded image is discarded, and must
    /// be loaded again before coloring. Unsupported sizes leave the surface untouched.
    pub fn resize(&mut self, size: impl Into<Size<u32>>) -> Result<(), Error> {
        let size = size.into();

        self.pixels = PixelBuffer::try_new(size).ok_or(Error::InvalidSize(size))?;
        self.loaded = false;
        self.reset_history();

        info!("coloring: resized to {}", size);

        Ok(())
    }

    /// Discard the loaded image, keeping the current size.
    pub fn clear(&mut self) {
        self.pixels.clear();
        self.loaded = false;
        self.reset_history();
    }

    fn reset_history(&mut self) {
        self.snapshots = Snapshots::new(self.pixels.clone(), self.history_limit);
    }
}
