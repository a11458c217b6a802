//! Core

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

// Re-export.
pub mod app;
pub mod geometry;
pub mod image_io;
pub mod math;
pub mod parallel;
pub mod rng;
pub mod spectrum;
