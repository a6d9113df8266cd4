#![allow(clippy::should_implement_trait)]
#![allow(clippy::len_without_is_empty)]
#![warn(rust_2018_idioms)]
pub mod gfx;
pub mod logger;
