use deli_base::TensorError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum LandmarkError {
    /// Region of interest with a non-positive or non-finite extent.
    InvalidRegion { width: f32, height: f32 },
    /// The inference session failed for the current frame.
    Inference(String),
    /// Model output or intermediate tensor disagrees with the mode's layout.
    ShapeMismatch { expected: String, got: String },
    UnsupportedImage(String),
    Config(String),
    Tensor(TensorError),
    Runtime(String),
}

impl LandmarkError {
    /// Whether the pipeline can no longer be trusted for later frames.
    ///
    /// Region, image and inference failures only cost the current frame.
    pub fn is_fatal(&self) -> bool {
        match self {
            LandmarkError::InvalidRegion { .. }
            | LandmarkError::Inference(_)
            | LandmarkError::UnsupportedImage(_) => false,
            LandmarkError::ShapeMismatch { .. }
            | LandmarkError::Config(_)
            | LandmarkError::Tensor(_)
            | LandmarkError::Runtime(_) => true,
        }
    }
}

impl fmt::Display for LandmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LandmarkError::InvalidRegion { width, height } => {
                write!(f, "invalid region: extent must be positive, got {width}x{height}")
            }
            LandmarkError::Inference(msg) => write!(f, "inference error: {msg}"),
            LandmarkError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
            LandmarkError::UnsupportedImage(msg) => write!(f, "unsupported image: {msg}"),
            LandmarkError::Config(msg) => write!(f, "config error: {msg}"),
            LandmarkError::Tensor(err) => write!(f, "tensor error: {err}"),
            LandmarkError::Runtime(msg) => write!(f, "runtime error: {msg}"),
        }
    }
}

impl std::error::Error for LandmarkError {}

impl From<TensorError> for LandmarkError {
    fn from(err: TensorError) -> Self {
        LandmarkError::Tensor(err)
    }
}

impl From<serde_json::Error> for LandmarkError {
    fn from(err: serde_json::Error) -> Self {
        LandmarkError::Config(err.to_string())
    }
}
