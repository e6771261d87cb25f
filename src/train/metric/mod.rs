mod acc;
mod running;

pub use acc::*;
pub use running::*;
