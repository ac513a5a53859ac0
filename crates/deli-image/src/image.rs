use crate::ImageError;
use deli_base::Tensor;

/// Caller-owned pixel buffer in HWC layout: `[height, width, channels]`.
///
/// The variant keeps the original sample precision; `channel_value`
/// normalizes every precision to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Image {
    U8(Tensor<u8>),
    U16(Tensor<u16>),
    F32(Tensor<f32>),
}

impl Image {
    /// Wrap an interleaved 8-bit buffer.
    pub fn from_u8(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, ImageError> {
        Ok(Image::U8(hwc_tensor(width, height, channels, data)?))
    }

    pub fn from_u16(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u16>,
    ) -> Result<Self, ImageError> {
        Ok(Image::U16(hwc_tensor(width, height, channels, data)?))
    }

    pub fn from_f32(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<f32>,
    ) -> Result<Self, ImageError> {
        Ok(Image::F32(hwc_tensor(width, height, channels, data)?))
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Image::U8(t) => &t.shape,
            Image::U16(t) => &t.shape,
            Image::F32(t) => &t.shape,
        }
    }

    pub fn height(&self) -> usize {
        self.shape()[0]
    }

    pub fn width(&self) -> usize {
        self.shape()[1]
    }

    pub fn channels(&self) -> usize {
        self.shape()[2]
    }

    /// Sample `channel` of pixel (`x`, `y`) scaled to `[0, 1]`.
    ///
    /// Callers guarantee the coordinates are in bounds. Float images are
    /// clamped since they carry no fixed range.
    pub fn channel_value(&self, x: usize, y: usize, channel: usize) -> f32 {
        let index = (y * self.width() + x) * self.channels() + channel;
        match self {
            Image::U8(t) => t.data[index] as f32 / u8::MAX as f32,
            Image::U16(t) => t.data[index] as f32 / u16::MAX as f32,
            Image::F32(t) => t.data[index].clamp(0.0, 1.0),
        }
    }
}

fn hwc_tensor<T>(
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<T>,
) -> Result<Tensor<T>, ImageError> {
    if channels == 0 {
        return Err(ImageError::Shape("image must have at least one channel".to_string()));
    }
    Ok(Tensor::new(vec![height, width, channels], data)?)
}

impl From<crates_image::DynamicImage> for Image {
    /// Convert without changing precision; layouts the pipeline cannot read
    /// directly fall back to RGBA8.
    fn from(img: crates_image::DynamicImage) -> Self {
        use crates_image::DynamicImage;

        fn tensor<T>(width: u32, height: u32, channels: usize, data: Vec<T>) -> Tensor<T> {
            Tensor {
                shape: vec![height as usize, width as usize, channels],
                data,
            }
        }

        let (width, height) = (img.width(), img.height());
        match img {
            DynamicImage::ImageLuma8(buf) => Image::U8(tensor(width, height, 1, buf.into_raw())),
            DynamicImage::ImageRgb8(buf) => Image::U8(tensor(width, height, 3, buf.into_raw())),
            DynamicImage::ImageRgba8(buf) => Image::U8(tensor(width, height, 4, buf.into_raw())),
            DynamicImage::ImageLuma16(buf) => Image::U16(tensor(width, height, 1, buf.into_raw())),
            DynamicImage::ImageRgb16(buf) => Image::U16(tensor(width, height, 3, buf.into_raw())),
            DynamicImage::ImageRgba16(buf) => Image::U16(tensor(width, height, 4, buf.into_raw())),
            DynamicImage::ImageRgb32F(buf) => Image::F32(tensor(width, height, 3, buf.into_raw())),
            DynamicImage::ImageRgba32F(buf) => Image::F32(tensor(width, height, 4, buf.into_raw())),
            other => Image::U8(tensor(width, height, 4, other.to_rgba8().into_raw())),
        }
    }
}
