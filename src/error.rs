use std::io;

use crate::gfx::color::ParseError;
use crate::gfx::math::Size;

/// Errors surfaced by the drawing surfaces.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    InvalidColor(#[from] ParseError),
    #[error("the canvas is empty, draw something first")]
    EmptyCanvas,
    #[error("there is nothing to color, generate a drawing first")]
    NoImageLoaded,
    #[error("a fill is already in progress")]
    Busy,
    #[error("unsupported surface size {0}")]
    InvalidSize(Size<u32>),
    #[error("image decoding failed: {0}")]
    Decoding(String),
    #[error("image encoding failed: {0}")]
    Encoding(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}
