use crate::LandmarkError;
use deli_base::Tensor;

/// Inference seam: one prepared input tensor in, one flat output tensor out.
///
/// The output holds the landmark records followed by the presence flag, in
/// the order described by [`crate::pose::ModeLayout`]. Failures should be
/// reported as [`LandmarkError::Inference`] so the caller can keep going
/// with the next frame.
pub trait Session: Send {
    fn run(&mut self, input: &Tensor<f32>) -> Result<Tensor<f32>, LandmarkError>;
}

impl<F> Session for F
where
    F: FnMut(&Tensor<f32>) -> Result<Tensor<f32>, LandmarkError> + Send,
{
    fn run(&mut self, input: &Tensor<f32>) -> Result<Tensor<f32>, LandmarkError> {
        self(input)
    }
}
