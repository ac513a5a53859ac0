use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TensorError {
    ShapeOverflow,
    ShapeMismatch { expected: usize, got: usize },
    SplitOutOfRange { index: usize, len: usize },
}

impl fmt::Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorError::ShapeOverflow => write!(f, "shape dimensions overflow when multiplied"),
            TensorError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected} elements, got {got}")
            }
            TensorError::SplitOutOfRange { index, len } => {
                write!(f, "split index {index} out of range for tensor of {len} elements")
            }
        }
    }
}

impl std::error::Error for TensorError {}

/// Number of elements a shape describes, or `ShapeOverflow` if the product
/// does not fit in a `usize`.
pub fn shape_product(shape: &[usize]) -> Result<usize, TensorError> {
    shape.iter().try_fold(1usize, |product, &dim| {
        product.checked_mul(dim).ok_or(TensorError::ShapeOverflow)
    })
}

/// Dense row-major buffer with an explicit shape.
///
/// Each pipeline stage consumes one tensor and produces a new one, so
/// tensors are plain owned values with no views or shared storage.
#[derive(Clone, PartialEq)]
pub struct Tensor<T> {
    pub shape: Vec<usize>,
    pub data: Vec<T>,
}

impl<T: fmt::Debug> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("len", &self.data.len())
            .finish()
    }
}

impl<T> Tensor<T> {
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> Result<Self, TensorError> {
        let expected = shape_product(&shape)?;
        if expected != data.len() {
            return Err(TensorError::ShapeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// One-dimensional tensor over `data`.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Split the flattened elements at `index` into two one-dimensional
    /// tensors `[0, index)` and `[index, len)`.
    pub fn split_at(mut self, index: usize) -> Result<(Self, Self), TensorError> {
        if index > self.data.len() {
            return Err(TensorError::SplitOutOfRange {
                index,
                len: self.data.len(),
            });
        }
        let tail = self.data.split_off(index);
        Ok((Self::from_vec(self.data), Self::from_vec(tail)))
    }
}

impl<T: Default + Clone> Tensor<T> {
    /// Default-filled tensor; fails with `ShapeOverflow` instead of
    /// allocating when the shape is too large to index.
    pub fn zeros(shape: Vec<usize>) -> Result<Self, TensorError> {
        let len = shape_product(&shape)?;
        Ok(Self {
            shape,
            data: vec![T::default(); len],
        })
    }
}
