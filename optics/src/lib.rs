//! Optics

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate pest_derive;

mod glass;
mod lens_data;
mod lens_system;
mod paraxial;
mod parser;
mod prescription;
mod pupil;
mod seidel;
mod table;
mod tracer;

// Re-export
pub use glass::*;
pub use lens_data::*;
pub use lens_system::*;
pub use paraxial::*;
pub use parser::*;
pub use prescription::*;
pub use pupil::*;
pub use seidel::*;
pub use table::*;
pub use tracer::*;
