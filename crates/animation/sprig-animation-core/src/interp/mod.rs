//! Interpolation library: pure functions over control samples.

pub mod functions;

pub use functions::{catmull_rom_sample, linear_sample};
