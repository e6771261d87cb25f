use burn::{
    backend::{ndarray::NdArrayDevice, Autodiff, NdArray},
    optim::AdamConfig,
};
use mnist_cnn::{
    logging,
    model::ModelConfig,
    train::{self, TrainingConfig},
    TrainError,
};

const ARTIFACT_DIR: &str = "/tmp/mnist-cnn";

type Backend = Autodiff<NdArray<f32>>;

fn main() -> Result<(), TrainError> {
    logging::install();

    let device = NdArrayDevice::Cpu;

    let config = TrainingConfig::new(ModelConfig::new(), AdamConfig::new());
    let report = train::train::<Backend>(ARTIFACT_DIR, &config, device)?;

    println!("\nTraining completed!");
    if let Some(accuracy) = report.final_test_accuracy() {
        println!("Final Test Accuracy: {accuracy:.2}%");
    }

    Ok(())
}
