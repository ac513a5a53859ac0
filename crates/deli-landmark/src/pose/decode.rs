use crate::LandmarkError;
use deli_base::Tensor;

use super::presence::sigmoid;
use super::types::{Landmark, LandmarkList, RECORD_WIDTH};

/// Decode `landmark_count` records of `(x, y, z, visibility_logit,
/// presence_logit)` given in tensor pixels.
///
/// x, y and z are divided by `tensor_size`; the two logits go through a
/// sigmoid. Output order is record order.
pub fn decode_landmarks(
    payload: &Tensor<f32>,
    landmark_count: usize,
    tensor_size: usize,
) -> Result<LandmarkList, LandmarkError> {
    let expected = landmark_count * RECORD_WIDTH;
    if payload.len() != expected {
        return Err(LandmarkError::ShapeMismatch {
            expected: format!("{} values ({} records)", expected, landmark_count),
            got: format!("{} values", payload.len()),
        });
    }

    let extent = tensor_size as f32;
    let landmarks = payload
        .data
        .chunks_exact(RECORD_WIDTH)
        .map(|record| Landmark {
            x: record[0] / extent,
            y: record[1] / extent,
            z: record[2] / extent,
            visibility: sigmoid(record[3]),
            presence: sigmoid(record[4]),
        })
        .collect();

    Ok(landmarks)
}
