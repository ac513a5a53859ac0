use crate::{LandmarkConfig, LandmarkError, Session};
use deli_base::{
    Tensor,
    log::{debug, info, warn},
};
use deli_image::Image;

use super::decode::decode_landmarks;
use super::letterbox::remove_letterbox;
use super::partition::partition;
use super::preprocess::preprocess;
use super::presence::{gate, presence_score};
use super::projection::project_landmarks;
use super::split::split_output;
use super::types::{LetterboxPadding, Mode, ModeLayout, PoseLandmarks, Roi};

/// Per-frame pose landmark pipeline.
///
/// Runs preparation, inference, presence gating, decoding, letterbox
/// removal, projection and partitioning in that order. The mode layout is
/// resolved once at construction; no state carries over between frames.
pub struct LandmarkPipeline {
    session: Box<dyn Session>,
    config: LandmarkConfig,
    layout: ModeLayout,
}

impl std::fmt::Debug for LandmarkPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LandmarkPipeline")
            .field("config", &self.config)
            .field("layout", &self.layout)
            .finish()
    }
}

impl LandmarkPipeline {
    /// Create a pipeline around an inference session.
    ///
    /// Returns `LandmarkError::Config` if the configuration is invalid.
    pub fn new(
        session: impl Session + 'static,
        config: LandmarkConfig,
    ) -> Result<Self, LandmarkError> {
        config.validate()?;
        let layout = config.mode.layout();
        info!(
            "landmark pipeline: mode {:?}, tensor {}x{}, {} records, presence threshold {}",
            config.mode,
            config.tensor_size,
            config.tensor_size,
            layout.landmark_count(),
            config.presence_threshold
        );
        Ok(Self {
            session: Box::new(session),
            config,
            layout,
        })
    }

    pub fn config(&self) -> &LandmarkConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn layout(&self) -> &ModeLayout {
        &self.layout
    }

    /// Run the full pipeline on one frame.
    ///
    /// `Ok(None)` means the model reported no pose in the region; the
    /// pipeline is healthy and ready for the next frame.
    pub fn process(
        &mut self,
        image: &Image,
        roi: &Roi,
    ) -> Result<Option<PoseLandmarks>, LandmarkError> {
        let (input, padding) = preprocess(image, roi, self.config.tensor_size)?;

        let output = self.session.run(&input).inspect_err(|e| {
            warn!("landmark inference failed: {}", e);
        })?;

        self.process_output(output, &padding, roi)
    }

    /// Run every stage after inference on a raw model output.
    pub fn process_output(
        &self,
        output: Tensor<f32>,
        padding: &LetterboxPadding,
        roi: &Roi,
    ) -> Result<Option<PoseLandmarks>, LandmarkError> {
        let (payload, flag) = split_output(output, &self.layout).inspect_err(|e| {
            warn!("model output does not match {:?} layout: {}", self.config.mode, e);
        })?;

        let presence = presence_score(&flag)?;
        let Some(payload) = gate(payload, presence, self.config.presence_threshold) else {
            debug!(
                "pose absent: presence {:.4} below threshold {}",
                presence, self.config.presence_threshold
            );
            return Ok(None);
        };
        debug!("pose present: presence {:.4}", presence);

        let landmarks = decode_landmarks(
            &payload,
            self.layout.landmark_count(),
            self.config.tensor_size,
        )?;
        let landmarks = remove_letterbox(landmarks, padding);
        let landmarks = project_landmarks(landmarks, roi);
        let (primary, auxiliary) = partition(landmarks, &self.layout)?;

        Ok(Some(PoseLandmarks {
            presence,
            primary,
            auxiliary,
        }))
    }
}
