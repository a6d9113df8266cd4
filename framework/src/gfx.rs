#![allow(clippy::many_single_char_names)]

pub mod color;
pub mod math;
pub mod pixels;

pub mod prelude {
    use super::*;

    pub use color::{ParseError, Rgba8};
    pub use math::{Point, Point2D, Rect, Size, Vector2D, Zero};
    pub use pixels::PixelBuffer;
}

pub use prelude::*;
