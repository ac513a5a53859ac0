use crate::{Device, LandmarkError, ModelSource, Session};
use deli_base::{Tensor, log::info};
use ndarray::{ArrayD, IxDyn};
use ort::{inputs, session::Session as OrtSession, value::TensorRef};

/// [`Session`] backed by ONNX Runtime.
///
/// The model's first input receives the prepared tensor. Its outputs are
/// flattened and concatenated in `output_names` order, which defaults to the
/// model's declared order; use [`OnnxSession::with_output_order`] when the
/// landmark output is not declared before the presence flag.
pub struct OnnxSession {
    session: OrtSession,
    input_name: String,
    output_names: Vec<String>,
}

impl OnnxSession {
    pub fn load(model: ModelSource, device: &Device) -> Result<Self, LandmarkError> {
        let mut builder = OrtSession::builder().map_err(|e| {
            LandmarkError::Config(format!("failed to create session builder: {}", e))
        })?;

        builder = match device {
            Device::Cpu => builder,
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => {
                use ort::execution_providers::CUDAExecutionProvider;
                builder
                    .with_execution_providers([CUDAExecutionProvider::default()
                        .with_device_id(*device_id)
                        .build()])
                    .map_err(|e| {
                        LandmarkError::Config(format!("failed to register {}: {}", device, e))
                    })?
            }
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => {
                return Err(LandmarkError::Config(format!(
                    "{} requires the cuda feature",
                    device
                )));
            }
        };

        let label = model.label();
        let session = match &model {
            ModelSource::File(path) => builder.commit_from_file(path),
            ModelSource::Memory(bytes) => builder.commit_from_memory(bytes),
        }
        .map_err(|e| LandmarkError::Config(format!("failed to load model {}: {}", label, e)))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| LandmarkError::Config("model has no inputs".to_string()))?;
        let output_names: Vec<String> = session
            .outputs
            .iter()
            .map(|output| output.name.clone())
            .collect();

        info!(
            "onnx landmark model {} on {}: input '{}', outputs {:?}",
            label, device, input_name, output_names
        );

        Ok(Self {
            session,
            input_name,
            output_names,
        })
    }

    /// Concatenate only the named outputs, in the given order.
    pub fn with_output_order(mut self, names: &[&str]) -> Result<Self, LandmarkError> {
        for name in names {
            if !self.output_names.iter().any(|known| known == name) {
                return Err(LandmarkError::Config(format!(
                    "model has no output '{}', available: {:?}",
                    name, self.output_names
                )));
            }
        }
        self.output_names = names.iter().map(|name| name.to_string()).collect();
        Ok(self)
    }

    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    pub fn output_names(&self) -> &[String] {
        &self.output_names
    }
}

impl Session for OnnxSession {
    fn run(&mut self, input: &Tensor<f32>) -> Result<Tensor<f32>, LandmarkError> {
        let array = ArrayD::from_shape_vec(IxDyn(&input.shape), input.data.clone())
            .map_err(|e| LandmarkError::Inference(format!("failed to create input array: {}", e)))?;
        let tensor_ref = TensorRef::from_array_view(array.view())
            .map_err(|e| LandmarkError::Inference(format!("failed to create tensor ref: {}", e)))?;

        let outputs = self
            .session
            .run(inputs![self.input_name.as_str() => tensor_ref])
            .map_err(|e| LandmarkError::Inference(format!("inference failed: {}", e)))?;

        let mut data = Vec::new();
        for name in &self.output_names {
            let values = outputs[name.as_str()].try_extract_array::<f32>().map_err(|e| {
                LandmarkError::Inference(format!("output '{}' is not f32: {}", name, e))
            })?;
            data.extend(values.iter().copied());
        }

        Ok(Tensor::from_vec(data))
    }
}
