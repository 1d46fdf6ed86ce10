pub mod batch;
pub mod errors;
pub mod render;

pub use batch::{BatchEvent, BatchExecutor};
pub use errors::ValidationError;
