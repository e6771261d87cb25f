use super::EpochReport;
use indicatif::{ProgressBar, ProgressStyle};

/// Running metrics at a given point of an epoch.
#[derive(new, Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    /// Mean loss over the batches seen so far.
    pub loss: f64,
    /// Accuracy in percent over the samples seen so far.
    pub accuracy: f64,
}

/// Training progress.
#[derive(Debug, Clone)]
pub struct TrainingProgress {
    /// The epoch, starting at 1.
    pub epoch: usize,
    /// The total number of epochs.
    pub epoch_total: usize,
    /// Number of batches processed in the current epoch.
    pub iteration: usize,
    /// Number of batches in an epoch.
    pub iteration_total: usize,
    /// Set every `log_interval` batches.
    pub metrics: Option<MetricsSnapshot>,
}

/// Trait for rendering the training progress.
pub trait TrainingRenderer {
    /// Called once, after the model has been built.
    fn start_training(&mut self, num_params: usize, epoch_total: usize);

    /// Called before the first batch of an epoch.
    fn start_epoch(&mut self, epoch: usize, epoch_total: usize, iteration_total: usize);

    /// Called after every training batch.
    fn render_train(&mut self, item: &TrainingProgress);

    /// Called once the held-out split has been evaluated.
    fn end_epoch(&mut self, report: &EpochReport);
}

/// Renderer that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRenderer;

impl TrainingRenderer for NoopRenderer {
    fn start_training(&mut self, _num_params: usize, _epoch_total: usize) {}

    fn start_epoch(&mut self, _epoch: usize, _epoch_total: usize, _iteration_total: usize) {}

    fn render_train(&mut self, _item: &TrainingProgress) {}

    fn end_epoch(&mut self, _report: &EpochReport) {}
}

/// Terminal renderer with one progress bar per epoch.
pub struct CliRenderer {
    pb: ProgressBar,
}

impl CliRenderer {
    pub fn new() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
    }
}

impl Default for CliRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingRenderer for CliRenderer {
    fn start_training(&mut self, num_params: usize, epoch_total: usize) {
        println!("Model has {num_params} parameters");
        println!("\nStarting training for {epoch_total} epochs...");
    }

    fn start_epoch(&mut self, epoch: usize, epoch_total: usize, iteration_total: usize) {
        self.pb = ProgressBar::new(iteration_total as u64);
        self.pb.set_style(Self::style());
        self.pb.set_prefix(format!("Epoch {epoch}/{epoch_total}"));
    }

    fn render_train(&mut self, item: &TrainingProgress) {
        self.pb.set_position(item.iteration as u64);

        if let Some(metrics) = item.metrics {
            self.pb.set_message(format!(
                "Loss: {:.4}, Acc: {:.2}%",
                metrics.loss, metrics.accuracy
            ));
        }
    }

    fn end_epoch(&mut self, report: &EpochReport) {
        self.pb.finish();
        println!(
            "Epoch {} - Test Accuracy: {:.2}%",
            report.epoch, report.test.accuracy
        );
    }
}

static TEMPLATE: &str = "{prefix}: [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}";
