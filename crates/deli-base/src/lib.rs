pub mod logging;
pub mod mat2;
pub mod tensor;
pub mod vec2;

pub use logging::{StdoutLogger, init_stdout_logger};
pub use mat2::Mat2;
pub use tensor::{Tensor, TensorError};
pub use vec2::Vec2;

// Re-export log crate so downstream crates can use deli_base::log::*
pub use log;
