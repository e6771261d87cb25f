use burn::tensor::backend::Backend;
use burn::tensor::{ElementConversion, Int, Tensor};

/// Number of rows of `outputs` whose highest logit matches the target class.
///
/// # Shapes
///   - outputs [batch_size, num_classes]
///   - targets [batch_size]
pub fn num_correct<B: Backend>(outputs: Tensor<B, 2>, targets: Tensor<B, 1, Int>) -> usize {
    let [batch_size, _n_classes] = outputs.dims();

    let predictions = outputs.argmax(1).reshape([batch_size]);

    predictions
        .equal(targets)
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>() as usize
}

/// Accuracy in percent, `0.0` when nothing was seen.
pub fn accuracy(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }

    100.0 * correct as f64 / total as f64
}
