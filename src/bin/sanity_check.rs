use mnist_cnn::{logging, probe::SanityCheck};
use std::process::ExitCode;

#[cfg(feature = "wgpu")]
fn runtime() -> mnist_cnn::probe::WgpuRuntime {
    mnist_cnn::probe::WgpuRuntime::new()
}

#[cfg(not(feature = "wgpu"))]
fn runtime() -> mnist_cnn::probe::NoAccelerator {
    mnist_cnn::probe::NoAccelerator
}

fn main() -> ExitCode {
    logging::install();

    let check = SanityCheck::run(&runtime());
    print!("{check}");

    ExitCode::from(check.exit_code())
}
