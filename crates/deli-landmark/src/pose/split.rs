use crate::LandmarkError;
use deli_base::Tensor;

use super::types::ModeLayout;

/// Split raw model output into the landmark payload and the presence flag.
///
/// The output must hold exactly `layout.output_len()` values; anything else
/// means the model and the configured mode disagree.
pub fn split_output(
    output: Tensor<f32>,
    layout: &ModeLayout,
) -> Result<(Tensor<f32>, Tensor<f32>), LandmarkError> {
    if output.len() != layout.output_len() {
        return Err(LandmarkError::ShapeMismatch {
            expected: format!(
                "{} values ({} landmark records + {} presence flag)",
                layout.output_len(),
                layout.landmark_count(),
                layout.presence_flag_len
            ),
            got: format!("{} values with shape {:?}", output.len(), output.shape),
        });
    }

    Ok(output.split_at(layout.landmark_payload_len())?)
}
