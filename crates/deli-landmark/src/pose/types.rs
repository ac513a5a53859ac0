use crate::LandmarkError;
use deli_base::{Mat2, Vec2};
use serde::{Deserialize, Serialize};

/// Values per decoded landmark record: x, y, z, visibility logit, presence logit.
pub const RECORD_WIDTH: usize = 5;

/// Number of named landmarks in the full-body topology.
pub const FULL_BODY_LANDMARK_COUNT: usize = 33;

/// Upper-body mode keeps the first 25 landmarks of the full-body topology.
pub const UPPER_BODY_LANDMARK_COUNT: usize = 25;

/// Auxiliary points appended after the primary landmarks in both modes.
pub const AUXILIARY_LANDMARK_COUNT: usize = 2;

/// Landmark topology variant, fixed for the lifetime of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    FullBody,
    UpperBody,
}

impl Mode {
    pub fn layout(self) -> ModeLayout {
        match self {
            Mode::FullBody => ModeLayout::FULL_BODY,
            Mode::UpperBody => ModeLayout::UPPER_BODY,
        }
    }
}

/// Tensor and partition sizes for one [`Mode`].
///
/// The model output is `landmark_count` records of [`RECORD_WIDTH`] values
/// followed by `presence_flag_len` presence values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeLayout {
    pub primary_count: usize,
    pub auxiliary_count: usize,
    pub presence_flag_len: usize,
}

impl ModeLayout {
    pub const FULL_BODY: Self = Self {
        primary_count: FULL_BODY_LANDMARK_COUNT,
        auxiliary_count: AUXILIARY_LANDMARK_COUNT,
        presence_flag_len: 1,
    };

    pub const UPPER_BODY: Self = Self {
        primary_count: UPPER_BODY_LANDMARK_COUNT,
        auxiliary_count: AUXILIARY_LANDMARK_COUNT,
        presence_flag_len: 1,
    };

    /// Records in the raw decode (35 full body, 27 upper body).
    pub const fn landmark_count(&self) -> usize {
        self.primary_count + self.auxiliary_count
    }

    pub const fn landmark_payload_len(&self) -> usize {
        self.landmark_count() * RECORD_WIDTH
    }

    pub const fn output_len(&self) -> usize {
        self.landmark_payload_len() + self.presence_flag_len
    }
}

/// A single 2.5D landmark.
///
/// `x` and `y` are normalized to whichever frame the current stage works
/// in. `z` is relative depth on the same scale as `x`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Probability the landmark is not occluded.
    pub visibility: f32,
    /// Probability the landmark lies inside the frame.
    pub presence: f32,
}

impl Landmark {
    pub fn position(&self) -> Vec2<f32> {
        Vec2::new(self.x, self.y)
    }
}

/// Landmarks in anatomical index order. No stage reorders this list.
pub type LandmarkList = Vec<Landmark>;

/// Oriented rectangle in image-normalized coordinates.
///
/// `rotation` is in radians; positive values turn the region clockwise on
/// screen (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roi {
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
}

impl Roi {
    pub fn new(center_x: f32, center_y: f32, width: f32, height: f32, rotation: f32) -> Self {
        Self {
            center_x,
            center_y,
            width,
            height,
            rotation,
        }
    }

    /// The whole image, unrotated.
    pub fn full_image() -> Self {
        Self::new(0.5, 0.5, 1.0, 1.0, 0.0)
    }

    pub fn validate(&self) -> Result<(), LandmarkError> {
        let finite = self.center_x.is_finite()
            && self.center_y.is_finite()
            && self.rotation.is_finite();
        let positive = self.width > 0.0
            && self.height > 0.0
            && self.width.is_finite()
            && self.height.is_finite();
        if !positive || !finite {
            return Err(LandmarkError::InvalidRegion {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn center(&self) -> Vec2<f32> {
        Vec2::new(self.center_x, self.center_y)
    }

    pub fn size(&self) -> Vec2<f32> {
        Vec2::new(self.width, self.height)
    }

    /// Map an ROI-local normalized point to image-normalized coordinates.
    ///
    /// The point is recentred on the ROI origin, rotated, scaled by the ROI
    /// extent and translated to the ROI centre.
    pub fn to_image(&self, local: Vec2<f32>) -> Vec2<f32> {
        let centered = local - Vec2::new(0.5, 0.5);
        Mat2::rotation(self.rotation) * centered * self.size() + self.center()
    }

    /// Map an image-normalized point into ROI-local coordinates.
    /// Exact inverse of [`Roi::to_image`].
    pub fn to_local(&self, image: Vec2<f32>) -> Vec2<f32> {
        let scaled = (image - self.center()) / self.size();
        Mat2::rotation(self.rotation).transpose() * scaled + Vec2::new(0.5, 0.5)
    }
}

/// Fractions of the prepared tensor's extent that are padding on each side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LetterboxPadding {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl LetterboxPadding {
    pub fn none() -> Self {
        Self::default()
    }

    /// Padding that fits content of the given pixel extent into a square
    /// without distortion, centred on the padded axis.
    pub fn fit(content_width: f32, content_height: f32) -> Self {
        if content_width >= content_height {
            let pad = (1.0 - content_height / content_width) / 2.0;
            Self {
                left: 0.0,
                top: pad,
                right: 0.0,
                bottom: pad,
            }
        } else {
            let pad = (1.0 - content_width / content_height) / 2.0;
            Self {
                left: pad,
                top: 0.0,
                right: pad,
                bottom: 0.0,
            }
        }
    }

    /// Share of the tensor width covered by image content.
    pub fn content_width(&self) -> f32 {
        1.0 - self.left - self.right
    }

    /// Share of the tensor height covered by image content.
    pub fn content_height(&self) -> f32 {
        1.0 - self.top - self.bottom
    }

    /// Content-normalized point to tensor-normalized point.
    pub fn insert(&self, content: Vec2<f32>) -> Vec2<f32> {
        Vec2::new(
            self.left + content.x * self.content_width(),
            self.top + content.y * self.content_height(),
        )
    }

    /// Tensor-normalized point to content-normalized point.
    /// Exact inverse of [`LetterboxPadding::insert`].
    pub fn remove(&self, tensor: Vec2<f32>) -> Vec2<f32> {
        Vec2::new(
            (tensor.x - self.left) / self.content_width(),
            (tensor.y - self.top) / self.content_height(),
        )
    }
}

/// Named indices into the primary landmark list.
///
/// Upper-body mode exposes indices up to and including `RightHip`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseLandmarkIndex {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseLandmarkIndex {
    pub const ALL: [PoseLandmarkIndex; FULL_BODY_LANDMARK_COUNT] = [
        PoseLandmarkIndex::Nose,
        PoseLandmarkIndex::LeftEyeInner,
        PoseLandmarkIndex::LeftEye,
        PoseLandmarkIndex::LeftEyeOuter,
        PoseLandmarkIndex::RightEyeInner,
        PoseLandmarkIndex::RightEye,
        PoseLandmarkIndex::RightEyeOuter,
        PoseLandmarkIndex::LeftEar,
        PoseLandmarkIndex::RightEar,
        PoseLandmarkIndex::MouthLeft,
        PoseLandmarkIndex::MouthRight,
        PoseLandmarkIndex::LeftShoulder,
        PoseLandmarkIndex::RightShoulder,
        PoseLandmarkIndex::LeftElbow,
        PoseLandmarkIndex::RightElbow,
        PoseLandmarkIndex::LeftWrist,
        PoseLandmarkIndex::RightWrist,
        PoseLandmarkIndex::LeftPinky,
        PoseLandmarkIndex::RightPinky,
        PoseLandmarkIndex::LeftIndex,
        PoseLandmarkIndex::RightIndex,
        PoseLandmarkIndex::LeftThumb,
        PoseLandmarkIndex::RightThumb,
        PoseLandmarkIndex::LeftHip,
        PoseLandmarkIndex::RightHip,
        PoseLandmarkIndex::LeftKnee,
        PoseLandmarkIndex::RightKnee,
        PoseLandmarkIndex::LeftAnkle,
        PoseLandmarkIndex::RightAnkle,
        PoseLandmarkIndex::LeftHeel,
        PoseLandmarkIndex::RightHeel,
        PoseLandmarkIndex::LeftFootIndex,
        PoseLandmarkIndex::RightFootIndex,
    ];
}

impl From<PoseLandmarkIndex> for usize {
    fn from(index: PoseLandmarkIndex) -> usize {
        index as usize
    }
}

impl TryFrom<usize> for PoseLandmarkIndex {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PoseLandmarkIndex::ALL.get(value).copied().ok_or_else(|| {
            format!(
                "Invalid landmark index: {}. Must be in range 0-{}.",
                value,
                FULL_BODY_LANDMARK_COUNT - 1
            )
        })
    }
}

/// Indices into the auxiliary landmark list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuxiliaryLandmarkIndex {
    /// Centre of the hips; anchors the next frame's region.
    HipCenter = 0,
    /// Point whose distance to `HipCenter` sets the next region's size.
    ScalePoint = 1,
}

impl From<AuxiliaryLandmarkIndex> for usize {
    fn from(index: AuxiliaryLandmarkIndex) -> usize {
        index as usize
    }
}

/// Per-frame result when a pose is present, in image-normalized coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseLandmarks {
    /// Sigmoid of the model's presence flag.
    pub presence: f32,
    pub primary: LandmarkList,
    pub auxiliary: LandmarkList,
}

impl PoseLandmarks {
    /// Primary landmark by name; `None` when the mode does not include it.
    pub fn landmark(&self, index: PoseLandmarkIndex) -> Option<&Landmark> {
        self.primary.get(usize::from(index))
    }

    pub fn auxiliary_landmark(&self, index: AuxiliaryLandmarkIndex) -> Option<&Landmark> {
        self.auxiliary.get(usize::from(index))
    }
}
