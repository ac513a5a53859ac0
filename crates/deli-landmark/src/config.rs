use crate::{LandmarkError, pose::Mode};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PRESENCE_THRESHOLD: f32 = 0.5;
pub const DEFAULT_TENSOR_SIZE: usize = 256;
/// Largest accepted model input side; landmark models run at a few hundred
/// pixels.
pub const MAX_TENSOR_SIZE: usize = 4096;

/// Construction-time settings for a [`crate::LandmarkPipeline`].
///
/// Missing JSON fields take their defaults, so `{}` is a valid full-body
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LandmarkConfig {
    pub mode: Mode,
    /// Minimum presence score for a frame to produce landmarks.
    pub presence_threshold: f32,
    /// Side length of the square model input, in pixels.
    pub tensor_size: usize,
}

impl Default for LandmarkConfig {
    fn default() -> Self {
        Self {
            mode: Mode::FullBody,
            presence_threshold: DEFAULT_PRESENCE_THRESHOLD,
            tensor_size: DEFAULT_TENSOR_SIZE,
        }
    }
}

impl LandmarkConfig {
    pub fn from_json(json: &str) -> Result<Self, LandmarkError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LandmarkError> {
        if !(0.0..=1.0).contains(&self.presence_threshold) {
            return Err(LandmarkError::Config(format!(
                "presence_threshold must be within [0, 1], got {}",
                self.presence_threshold
            )));
        }
        if self.tensor_size == 0 || self.tensor_size > MAX_TENSOR_SIZE {
            return Err(LandmarkError::Config(format!(
                "tensor_size must be within [1, {}], got {}",
                MAX_TENSOR_SIZE, self.tensor_size
            )));
        }
        Ok(())
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_presence_threshold(mut self, threshold: f32) -> Self {
        self.presence_threshold = threshold;
        self
    }

    pub fn with_tensor_size(mut self, size: usize) -> Self {
        self.tensor_size = size;
        self
    }
}
