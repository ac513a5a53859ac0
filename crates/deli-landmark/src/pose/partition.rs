use crate::LandmarkError;

use super::types::{LandmarkList, ModeLayout};

/// Split the decoded list into `(primary, auxiliary)` at the mode boundary.
pub fn partition(
    mut landmarks: LandmarkList,
    layout: &ModeLayout,
) -> Result<(LandmarkList, LandmarkList), LandmarkError> {
    if landmarks.len() != layout.landmark_count() {
        return Err(LandmarkError::ShapeMismatch {
            expected: format!("{} landmarks", layout.landmark_count()),
            got: format!("{} landmarks", landmarks.len()),
        });
    }
    let auxiliary = landmarks.split_off(layout.primary_count);
    Ok((landmarks, auxiliary))
}
