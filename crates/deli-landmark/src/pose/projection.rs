use super::types::{LandmarkList, Roi};

/// Move landmarks from ROI-local normalized space to image-normalized space.
///
/// Positions go through [`Roi::to_image`]; z is scaled by the ROI width to
/// stay on the x scale. Visibility and presence are untouched.
pub fn project_landmarks(landmarks: LandmarkList, roi: &Roi) -> LandmarkList {
    landmarks
        .into_iter()
        .map(|mut landmark| {
            let projected = roi.to_image(landmark.position());
            landmark.x = projected.x;
            landmark.y = projected.y;
            landmark.z *= roi.width;
            landmark
        })
        .collect()
}
