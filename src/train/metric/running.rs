use super::accuracy;

/// Running loss and accuracy over the batches of an epoch.
///
/// The loss is averaged over batches, the accuracy over samples.
#[derive(Debug, Default, Clone)]
pub struct RunningMetrics {
    loss_sum: f64,
    num_batches: usize,
    correct: usize,
    total: usize,
}

impl RunningMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one batch.
    pub fn update(&mut self, loss: f64, correct: usize, batch_size: usize) {
        self.loss_sum += loss;
        self.num_batches += 1;
        self.correct += correct;
        self.total += batch_size;
    }

    pub fn loss(&self) -> f64 {
        if self.num_batches == 0 {
            return 0.0;
        }

        self.loss_sum / self.num_batches as f64
    }

    /// Running accuracy in percent.
    pub fn accuracy(&self) -> f64 {
        accuracy(self.correct, self.total)
    }

    pub fn num_batches(&self) -> usize {
        self.num_batches
    }

    pub fn num_items(&self) -> usize {
        self.total
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_is_averaged_over_batches_and_accuracy_over_samples() {
        let mut metrics = RunningMetrics::new();

        metrics.update(1.0, 64, 64);
        metrics.update(0.5, 0, 16);

        assert_eq!(metrics.loss(), 0.75);
        assert_eq!(metrics.accuracy(), 80.0);
        assert_eq!(metrics.num_batches(), 2);
        assert_eq!(metrics.num_items(), 80);
    }

    #[test]
    fn clear_resets_the_state() {
        let mut metrics = RunningMetrics::new();
        metrics.update(2.0, 3, 4);

        metrics.clear();

        assert_eq!(metrics.loss(), 0.0);
        assert_eq!(metrics.accuracy(), 0.0);
        assert_eq!(metrics.num_batches(), 0);
    }
}
