mod decode;
mod landmarker;
mod letterbox;
mod partition;
mod pipeline;
mod preprocess;
mod presence;
mod projection;
mod split;
mod types;

pub use decode::decode_landmarks;
pub use landmarker::{Frame, FrameResult, PoseLandmarker};
pub use letterbox::remove_letterbox;
pub use partition::partition;
pub use pipeline::LandmarkPipeline;
pub use preprocess::preprocess;
pub use presence::{gate, presence_score, sigmoid};
pub use projection::project_landmarks;
pub use split::split_output;
pub use types::{
    AUXILIARY_LANDMARK_COUNT, AuxiliaryLandmarkIndex, FULL_BODY_LANDMARK_COUNT, Landmark,
    LandmarkList, LetterboxPadding, Mode, ModeLayout, PoseLandmarkIndex, PoseLandmarks,
    RECORD_WIDTH, Roi, UPPER_BODY_LANDMARK_COUNT,
};
