pub mod metric;
pub mod renderer;
mod training;

pub use training::*;
