#![allow(clippy::single_match)]
#![allow(clippy::len_without_is_empty)]
#![allow(clippy::new_without_default)]
#![warn(rust_2018_idioms)]
#[macro_use]
extern crate log;

pub mod brush;
pub mod bucket;
pub mod coloring;
pub mod error;
pub mod input;
pub mod palette;
pub mod png;
pub mod session;
pub mod settings;
pub mod sketch;

pub use colorbook_framework as framework;
pub use colorbook_framework::gfx;

pub use coloring::ColoringSurface;
pub use error::Error;
pub use input::{Bounds, InputEvent};
pub use palette::Palette;
pub use session::Session;
pub use settings::Settings;
pub use sketch::SketchSurface;
