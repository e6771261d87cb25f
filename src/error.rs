use thiserror::Error;

/// Errors reported by the environment sanity check.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// A tensor allocation or device transfer failed inside the tensor runtime.
    #[error("tensor operation failed: {0}")]
    TensorOp(String),

    /// The runtime reported accelerators but none of them could be selected.
    #[error("accelerator {0} is not available")]
    DeviceUnavailable(usize),
}

/// Errors surfaced by the training driver.
#[derive(Error, Debug)]
pub enum TrainError {
    /// The artifact directory or one of its files could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The training report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A dataset split contains no items.
    #[error("the {0} split is empty")]
    EmptyDataset(&'static str),
}
