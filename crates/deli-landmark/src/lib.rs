pub mod config;
pub mod error;
pub mod model;
pub mod pose;
pub mod session;

#[cfg(feature = "onnx")]
pub mod onnx;

pub use config::LandmarkConfig;
pub use error::LandmarkError;
pub use model::{Device, ModelSource};
pub use session::Session;

#[cfg(feature = "onnx")]
pub use onnx::OnnxSession;

pub use pose::{
    Frame, FrameResult, Landmark, LandmarkList, LandmarkPipeline, LetterboxPadding, Mode,
    ModeLayout, PoseLandmarkIndex, PoseLandmarker, PoseLandmarks, Roi,
};
