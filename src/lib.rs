#![recursion_limit = "256"]

//! Environment sanity check and MNIST CNN training driver built on Burn.
//!
//! The crate ships two independent binaries:
//!
//! - `sanity-check` probes the tensor runtime and the available accelerators.
//! - `train-mnist` trains a small convolutional classifier on MNIST.

#[macro_use]
extern crate derive_new;

pub mod data;
pub mod error;
pub mod logging;
pub mod model;
pub mod probe;
pub mod train;

pub use error::{ProbeError, TrainError};

#[cfg(test)]
pub(crate) type TestBackend = burn::backend::NdArray<f32>;
#[cfg(test)]
pub(crate) type TestAutodiffBackend = burn::backend::Autodiff<TestBackend>;
