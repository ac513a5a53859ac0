//! Pixel buffers handed to the landmark pipeline.
//!
//! Images are stored as `Tensor<T>` from `deli-base` in HWC layout:
//! `[height, width, channels]`. Decoding and file I/O live elsewhere; this
//! crate only wraps buffers the caller already holds.

pub mod error;
pub mod image;

pub use error::ImageError;
pub use image::Image;
