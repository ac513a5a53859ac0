use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ImageError {
    Shape(String),
    Tensor(deli_base::TensorError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Shape(msg) => write!(f, "image shape error: {msg}"),
            ImageError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<deli_base::TensorError> for ImageError {
    fn from(err: deli_base::TensorError) -> Self {
        ImageError::Tensor(err)
    }
}
