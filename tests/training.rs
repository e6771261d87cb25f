mod common;

use burn::optim::AdamConfig;
use common::{stripes, TestAutodiffBackend};
use mnist_cnn::{
    model::ModelConfig,
    train::{renderer::NoopRenderer, train_with, TrainingConfig},
};

#[test]
fn should_learn_an_easy_dataset() {
    let config = TrainingConfig::new(ModelConfig::new(), AdamConfig::new())
        .with_batch_size(10)
        .with_test_batch_size(50);

    let report = train_with::<TestAutodiffBackend, _, _, _>(
        &config,
        Default::default(),
        stripes(300, 0),
        stripes(100, 3),
        &mut NoopRenderer,
    )
    .unwrap();

    assert_eq!(report.epochs.len(), 3);
    for epoch in report.epochs.iter() {
        assert!((0.0..=100.0).contains(&epoch.test.accuracy));
        assert_eq!(epoch.test.num_items, 100);
    }

    let accuracy = report.final_test_accuracy().unwrap();
    assert!(accuracy > 80.0, "Final accuracy too low: {accuracy:.2}%");
}

#[test]
fn held_out_accuracy_should_agree_with_training_accuracy_on_the_same_split() {
    let config = TrainingConfig::new(ModelConfig::new(), AdamConfig::new())
        .with_batch_size(10)
        .with_test_batch_size(50);

    let report = train_with::<TestAutodiffBackend, _, _, _>(
        &config,
        Default::default(),
        stripes(300, 0),
        stripes(300, 0),
        &mut NoopRenderer,
    )
    .unwrap();

    let last = report.epochs.last().unwrap();
    assert!(last.train_accuracy > 80.0, "{:.2}%", last.train_accuracy);
    assert!(last.test.accuracy > 80.0, "{:.2}%", last.test.accuracy);
}

#[test]
#[ignore = "downloads the MNIST dataset and trains for several minutes"]
fn should_exceed_ninety_percent_on_mnist() {
    use burn::backend::ndarray::NdArrayDevice;

    let config = TrainingConfig::new(ModelConfig::new(), AdamConfig::new());
    let artifact_dir = std::env::temp_dir().join("mnist-cnn-test");

    let report = mnist_cnn::train::train::<TestAutodiffBackend>(
        artifact_dir.to_str().unwrap(),
        &config,
        NdArrayDevice::Cpu,
    )
    .unwrap();

    let accuracy = report.final_test_accuracy().unwrap();
    assert!(accuracy > 90.0, "Final accuracy too low: {accuracy:.2}%");
}
