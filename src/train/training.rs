use crate::{
    data::{MnistBatch, MnistBatcher},
    model::{Model, ModelConfig},
    train::{
        metric::{num_correct, RunningMetrics},
        renderer::{CliRenderer, MetricsSnapshot, TrainingProgress, TrainingRenderer},
    },
    TrainError,
};
use burn::{
    data::{
        dataloader::{DataLoader, DataLoaderBuilder},
        dataset::{
            vision::{MnistDataset, MnistItem},
            Dataset,
        },
    },
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Config, Debug)]
pub struct TrainingConfig {
    pub model: ModelConfig,
    pub optimizer: AdamConfig,
    #[config(default = 3)]
    pub num_epochs: usize,
    #[config(default = 64)]
    pub batch_size: usize,
    #[config(default = 1000)]
    pub test_batch_size: usize,
    #[config(default = 1e-3)]
    pub learning_rate: f64,
    #[config(default = 42)]
    pub seed: u64,
    /// Number of batches between two refreshes of the running metrics.
    #[config(default = 100)]
    pub log_interval: usize,
}

/// Loss and accuracy measured on the held-out split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Mean cross-entropy over the batches.
    pub loss: f64,
    /// Accuracy in percent, within `[0, 100]`.
    pub accuracy: f64,
    pub num_items: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochReport {
    /// The epoch, starting at 1.
    pub epoch: usize,
    pub train_loss: f64,
    pub train_accuracy: f64,
    pub test: EvaluationReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub num_params: usize,
    pub epochs: Vec<EpochReport>,
}

impl TrainingReport {
    /// Held-out accuracy after the last epoch.
    pub fn final_test_accuracy(&self) -> Option<f64> {
        self.epochs.last().map(|epoch| epoch.test.accuracy)
    }
}

type BatchLoader<B> = Arc<dyn DataLoader<B, MnistBatch<B>>>;

fn create_artifact_dir(artifact_dir: &str) -> Result<(), TrainError> {
    // Remove existing artifacts so the directory only describes the latest run.
    std::fs::remove_dir_all(artifact_dir).ok();
    std::fs::create_dir_all(artifact_dir)?;
    Ok(())
}

/// Train on the MNIST train split and evaluate on the test split after every epoch.
///
/// The dataset is downloaded into the Burn dataset cache on first use. The configuration and
/// the final report are written to `artifact_dir`.
pub fn train<B: AutodiffBackend>(
    artifact_dir: &str,
    config: &TrainingConfig,
    device: B::Device,
) -> Result<TrainingReport, TrainError> {
    create_artifact_dir(artifact_dir)?;
    config.save(format!("{artifact_dir}/config.json"))?;

    println!("Training on device: {device:?}");
    println!("Loading MNIST dataset...");
    let dataset_train = MnistDataset::train();
    let dataset_test = MnistDataset::test();

    let report = train_with::<B, _, _, _>(
        config,
        device,
        dataset_train,
        dataset_test,
        &mut CliRenderer::new(),
    )?;

    std::fs::write(
        format!("{artifact_dir}/report.json"),
        serde_json::to_string_pretty(&report)?,
    )?;

    Ok(report)
}

/// Run the training loop on arbitrary train and held-out datasets.
pub fn train_with<B, DT, DV, R>(
    config: &TrainingConfig,
    device: B::Device,
    dataset_train: DT,
    dataset_test: DV,
    renderer: &mut R,
) -> Result<TrainingReport, TrainError>
where
    B: AutodiffBackend,
    DT: Dataset<MnistItem> + 'static,
    DV: Dataset<MnistItem> + 'static,
    R: TrainingRenderer,
{
    if dataset_train.is_empty() {
        return Err(TrainError::EmptyDataset("train"));
    }
    if dataset_test.is_empty() {
        return Err(TrainError::EmptyDataset("test"));
    }

    B::seed(&device, config.seed);

    let mut model: Model<B> = config.model.init(&device);
    let mut optim = config.optimizer.init::<B, Model<B>>();
    let num_params = model.num_params();

    let dataloader_train: BatchLoader<B> = DataLoaderBuilder::new(MnistBatcher::default())
        .batch_size(config.batch_size)
        .shuffle(config.seed)
        .set_device(device.clone())
        .build(dataset_train);

    let dataloader_test: BatchLoader<B::InnerBackend> =
        DataLoaderBuilder::new(MnistBatcher::default())
            .batch_size(config.test_batch_size)
            .set_device(device.clone())
            .build(dataset_test);

    let iteration_total = dataloader_train.num_items().div_ceil(config.batch_size);
    let log_interval = config.log_interval.max(1);
    let mut epochs = Vec::with_capacity(config.num_epochs);

    renderer.start_training(num_params, config.num_epochs);

    for epoch in 1..config.num_epochs + 1 {
        let mut metrics = RunningMetrics::new();
        renderer.start_epoch(epoch, config.num_epochs, iteration_total);

        for (iteration, batch) in dataloader_train.iter().enumerate() {
            let [batch_size] = batch.targets.dims();
            let output = model.forward_classification(batch);

            let loss = output.loss.clone().into_scalar().elem::<f64>();
            let correct = num_correct(output.output, output.targets);

            // Gradients for the current backward pass, linked to each parameter of the model.
            let grads = GradientsParams::from_grads(output.loss.backward(), &model);
            model = optim.step(config.learning_rate, model, grads);

            metrics.update(loss, correct, batch_size);

            let snapshot = (iteration % log_interval == 0)
                .then(|| MetricsSnapshot::new(metrics.loss(), metrics.accuracy()));
            renderer.render_train(&TrainingProgress {
                epoch,
                epoch_total: config.num_epochs,
                iteration: iteration + 1,
                iteration_total,
                metrics: snapshot,
            });
        }

        // Get the model without autodiff.
        let model_valid = model.valid();
        let test = evaluate(&model_valid, dataloader_test.as_ref());

        let report = EpochReport {
            epoch,
            train_loss: metrics.loss(),
            train_accuracy: metrics.accuracy(),
            test,
        };
        log::debug!(
            "Epoch {epoch} - train loss {:.4}, train accuracy {:.2}%, test accuracy {:.2}%",
            report.train_loss,
            report.train_accuracy,
            report.test.accuracy
        );
        renderer.end_epoch(&report);
        epochs.push(report);
    }

    Ok(TrainingReport { num_params, epochs })
}

/// Evaluate the model on every batch of the data loader.
pub fn evaluate<B: Backend>(
    model: &Model<B>,
    dataloader: &dyn DataLoader<B, MnistBatch<B>>,
) -> EvaluationReport {
    let mut metrics = RunningMetrics::new();

    for batch in dataloader.iter() {
        let [batch_size] = batch.targets.dims();
        let output = model.forward_classification(batch);
        let correct = num_correct(output.output, output.targets);

        metrics.update(output.loss.into_scalar().elem::<f64>(), correct, batch_size);
    }

    EvaluationReport {
        loss: metrics.loss(),
        accuracy: metrics.accuracy(),
        num_items: metrics.num_items(),
    }
}
