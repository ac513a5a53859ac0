use crate::LandmarkError;
use std::{fmt, path::PathBuf, str::FromStr};

/// Where the landmark model weights come from.
#[derive(Debug, Clone)]
pub enum ModelSource {
    File(PathBuf),
    Memory(Vec<u8>),
}

impl ModelSource {
    /// Short description for log lines; never includes the weights.
    pub fn label(&self) -> String {
        match self {
            ModelSource::File(path) => path.display().to_string(),
            ModelSource::Memory(bytes) => format!("<{} bytes in memory>", bytes.len()),
        }
    }
}

/// Execution target for the inference session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Device {
    #[default]
    Cpu,
    Cuda { device_id: i32 },
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "CPU"),
            Device::Cuda { device_id } => write!(f, "CUDA(device_id={device_id})"),
        }
    }
}

/// Parses `cpu`, `cuda` or `cuda:<id>`.
impl FromStr for Device {
    type Err = LandmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" => Ok(Device::Cpu),
            "cuda" => Ok(Device::Cuda { device_id: 0 }),
            other => other
                .strip_prefix("cuda:")
                .and_then(|id| id.parse().ok())
                .map(|device_id| Device::Cuda { device_id })
                .ok_or_else(|| LandmarkError::Config(format!("unknown device '{}'", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_device() {
        assert_eq!("cpu".parse::<Device>().unwrap(), Device::Cpu);
        assert_eq!("CUDA".parse::<Device>().unwrap(), Device::Cuda { device_id: 0 });
        assert_eq!("cuda:2".parse::<Device>().unwrap(), Device::Cuda { device_id: 2 });
        assert!("cuda:x".parse::<Device>().is_err());
        assert!("tpu".parse::<Device>().is_err());
    }

    #[test]
    fn test_model_source_label() {
        assert_eq!(ModelSource::Memory(vec![0; 12]).label(), "<12 bytes in memory>");
        assert_eq!(ModelSource::File("models/pose.onnx".into()).label(), "models/pose.onnx");
    }
}
