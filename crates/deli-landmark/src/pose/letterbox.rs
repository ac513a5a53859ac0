use super::types::{LandmarkList, LetterboxPadding};

/// Undo the padding added by [`super::preprocess`].
///
/// x and y move from tensor-normalized to content-normalized space. z is
/// divided by the horizontal content share, the same factor applied to x.
/// Results outside `[0, 1]` are kept so callers can tell a landmark left the
/// region.
pub fn remove_letterbox(landmarks: LandmarkList, padding: &LetterboxPadding) -> LandmarkList {
    let z_scale = padding.content_width();
    landmarks
        .into_iter()
        .map(|mut landmark| {
            let content = padding.remove(landmark.position());
            landmark.x = content.x;
            landmark.y = content.y;
            landmark.z /= z_scale;
            landmark
        })
        .collect()
}
