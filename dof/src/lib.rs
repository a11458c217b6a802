//! Depth of field

#[macro_use]
extern crate log;

mod accumulator;
mod coc;
mod estimator;
mod image;
mod renderer;
mod sample;
mod sampler;
mod sprite;

// Re-export
pub use accumulator::*;
pub use coc::*;
pub use estimator::*;
pub use image::*;
pub use renderer::*;
pub use sample::*;
pub use sampler::*;
pub use sprite::*;
