//! Spectrum

mod cie;
mod cie_data;
mod common;

// Re-export
pub use cie::*;
pub use cie_data::*;
pub use common::*;
