//! Raw RGBA pixel buffers.
//!
//! A buffer is a flat, row-major sequence of bytes with four channels per pixel,
//! in `R, G, B, A` order. The pixel at `(x, y)` starts at byte `(y * width + x) * 4`.
use crate::gfx::color::Rgba8;
use crate::gfx::math::{Point2D, Size};

/// Number of bytes per pixel.
pub const CHANNELS: usize = 4;

/// Largest supported width or height of a buffer, in pixels.
pub const MAX_DIMENSION: u32 = 1 << 14;

/// Whether buffers of the given size can be allocated.
pub fn is_supported(size: Size<u32>) -> bool {
    size.w <= MAX_DIMENSION && size.h <= MAX_DIMENSION
}

/// Number of bytes needed to hold an image of the given size, if it fits in memory.
fn byte_len(size: Size<u32>) -> Option<usize> {
    (size.w as usize)
        .checked_mul(size.h as usize)?
        .checked_mul(CHANNELS)
}

/// Read the pixel at `(x, y)` of a raw buffer with the given row width.
///
/// # Panics
///
/// Panics if the pixel lies outside the buffer. Callers are expected to bounds-check.
#[inline]
pub fn get_pixel(buffer: &[u8], x: usize, y: usize, width: usize) -> Rgba8 {
    let offset = (y * width + x) * CHANNELS;
    let px = &buffer[offset..offset + CHANNELS];

    Rgba8::new(px[0], px[1], px[2], px[3])
}

/// Write the pixel at `(x, y)` of a raw buffer with the given row width.
///
/// # Panics
///
/// Panics if the pixel lies outside the buffer. Callers are expected to bounds-check.
#[inline]
pub fn set_pixel(buffer: &mut [u8], x: usize, y: usize, width: usize, color: Rgba8) {
    let offset = (y * width + x) * CHANNELS;

    buffer[offset..offset + CHANNELS].copy_from_slice(&color.channels());
}

/// An owned RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    size: Size<u32>,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a fully transparent buffer of the given size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is larger than [`MAX_DIMENSION`]. Use
    /// [`PixelBuffer::try_new`] for sizes that weren't validated.
    pub fn new(size: impl Into<Size<u32>>) -> Self {
        let size = size.into();

        match Self::try_new(size) {
            Some(buf) => buf,
            None => panic!("PixelBuffer::new: unsupported size {}", size),
        }
    }

    /// Create a fully transparent buffer of the given size. Returns `None` if the
    /// size isn't supported.
    pub fn try_new(size: impl Into<Size<u32>>) -> Option<Self> {
        let size = size.into();

        if !is_supported(size) {
            return None;
        }
        Some(Self {
            size,
            data: vec![0; byte_len(size)?],
        })
    }

    /// Wrap existing RGBA bytes. Returns `None` if the length doesn't match the size.
    pub fn from_bytes(data: Vec<u8>, size: impl Into<Size<u32>>) -> Option<Self> {
        let size = size.into();

        if Some(data.len()) != byte_len(size) {
            return None;
        }
        Some(Self { size, data })
    }

    pub fn size(&self) -> Size<u32> {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.w as usize
    }

    pub fn height(&self) -> usize {
        self.size.h as usize
    }

    /// Number of pixels in the buffer.
    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Whether the point lies inside the buffer.
    pub fn contains(&self, p: Point2D<i32>) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width() && (p.y as usize) < self.height()
    }

    /// Get the pixel at the given position, if it's inside the buffer.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgba8> {
        if x < self.width() && y < self.height() {
            Some(get_pixel(&self.data, x, y, self.width()))
        } else {
            None
        }
    }

    /// Set the pixel at the given position. Positions outside the buffer are ignored.
    pub fn set(&mut self, x: usize, y: usize, color: Rgba8) {
        if x < self.width() && y < self.height() {
            let width = self.width();
            set_pixel(&mut self.data, x, y, width, color);
        }
    }

    /// Whether every byte of the buffer is zero, ie. nothing was ever drawn on it.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|b| *b == 0)
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Iterate over the pixels, in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba8> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|px| Rgba8::new(px[0], px[1], px[2], px[3]))
    }

    /// Copy of the buffer composited over an opaque background color.
    pub fn composite(&self, bg: Rgba8) -> PixelBuffer {
        let mut data = Vec::with_capacity(self.data.len());

        for px in self.pixels() {
            data.extend_from_slice(&px.over(bg).channels());
        }
        PixelBuffer {
            size: self.size,
            data,
        }
    }

    /// Copy of the buffer stretched to a new size, using nearest-neighbor sampling.
    pub fn resample(&self, size: impl Into<Size<u32>>) -> PixelBuffer {
        let size = size.into();

        if size == self.size {
            return self.clone();
        }
        let mut output = PixelBuffer::new(size);

        if self.len() == 0 {
            return output;
        }
        let (sw, sh) = (self.size.w as u64, self.size.h as u64);
        let (dw, dh) = (size.w as u64, size.h as u64);

        for y in 0..dh {
            let sy = (y * sh / dh) as usize;

            for x in 0..dw {
                let sx = (x * sw / dw) as usize;
                let px = get_pixel(&self.data, sx, sy, self.width());

                set_pixel(&mut output.data, x as usize, y as usize, dw as usize, px);
            }
        }
        output
    }
}
