use crate::LandmarkError;
use deli_base::Tensor;

/// Logistic activation, stable for large negative inputs.
pub fn sigmoid(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Presence score of a single-value flag tensor.
pub fn presence_score(flag: &Tensor<f32>) -> Result<f32, LandmarkError> {
    match flag.data.as_slice() {
        [logit] => Ok(sigmoid(*logit)),
        _ => Err(LandmarkError::ShapeMismatch {
            expected: "1 presence value".to_string(),
            got: format!("{} values", flag.len()),
        }),
    }
}

/// Pass the landmark payload through when `score >= threshold`.
///
/// `None` is the normal "no pose this frame" outcome; downstream stages are
/// skipped rather than fed degenerate landmarks.
pub fn gate(landmarks: Tensor<f32>, score: f32, threshold: f32) -> Option<Tensor<f32>> {
    (score >= threshold).then_some(landmarks)
}
