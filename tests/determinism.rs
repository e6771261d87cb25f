mod common;

use burn::optim::AdamConfig;
use common::{stripes, TestAutodiffBackend};
use mnist_cnn::{
    model::ModelConfig,
    train::{renderer::NoopRenderer, train_with, TrainingConfig, TrainingReport},
};

fn run(seed: u64) -> TrainingReport {
    let config = TrainingConfig::new(ModelConfig::new(), AdamConfig::new())
        .with_num_epochs(2)
        .with_batch_size(10)
        .with_test_batch_size(20)
        .with_seed(seed);

    train_with::<TestAutodiffBackend, _, _, _>(
        &config,
        Default::default(),
        stripes(60, 0),
        stripes(20, 1),
        &mut NoopRenderer,
    )
    .unwrap()
}

// Both runs live in one test: the backend RNG is process global.
#[test]
fn same_seed_should_produce_identical_reports() {
    let first = run(42);
    let second = run(42);

    assert_eq!(first, second);
    assert_eq!(first.final_test_accuracy(), second.final_test_accuracy());
}
