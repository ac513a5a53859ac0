use crate::LandmarkError;
use deli_base::{Tensor, Vec2};
use deli_image::Image;

use super::types::{LetterboxPadding, Roi};

const CHANNELS: usize = 3;
const PAD_VALUE: f32 = 0.0;

/// Crop the oriented `roi` out of `image` into a square model input.
///
/// Returns a tensor of shape `[1, S, S, 3]` (NHWC, `S = tensor_size`) with
/// values in `[0, 1]`, and the letterbox padding that was added to keep the
/// region's aspect ratio. Padding and samples that fall outside the image
/// read as 0.
///
/// Every output pixel centre is mapped back through the padding and the
/// ROI transform and sampled bilinearly, so the mapping is the exact inverse
/// of letterbox removal followed by coordinate projection.
pub fn preprocess(
    image: &Image,
    roi: &Roi,
    tensor_size: usize,
) -> Result<(Tensor<f32>, LetterboxPadding), LandmarkError> {
    roi.validate()?;

    let (width, height, channels) = (image.width(), image.height(), image.channels());
    if width == 0 || height == 0 {
        return Err(LandmarkError::UnsupportedImage(format!(
            "image dimensions must be non-zero, got {}x{}",
            width, height
        )));
    }
    if !matches!(channels, 1 | 3 | 4) {
        return Err(LandmarkError::UnsupportedImage(format!(
            "expected 1, 3 or 4 channels, got {}",
            channels
        )));
    }

    let padding = LetterboxPadding::fit(roi.width * width as f32, roi.height * height as f32);
    let extent = tensor_size as f32;
    let mut tensor = Tensor::<f32>::zeros(vec![1, tensor_size, tensor_size, CHANNELS])?;

    for out_y in 0..tensor_size {
        for out_x in 0..tensor_size {
            let tensor_point = Vec2::new(
                (out_x as f32 + 0.5) / extent,
                (out_y as f32 + 0.5) / extent,
            );
            let content = padding.remove(tensor_point);
            if !(0.0..=1.0).contains(&content.x) || !(0.0..=1.0).contains(&content.y) {
                continue;
            }

            let source = roi.to_image(content);
            let pixel = Vec2::new(
                source.x * width as f32 - 0.5,
                source.y * height as f32 - 0.5,
            );
            let dst = (out_y * tensor_size + out_x) * CHANNELS;
            for ch in 0..CHANNELS {
                tensor.data[dst + ch] = sample_bilinear(image, pixel, ch);
            }
        }
    }

    Ok((tensor, padding))
}

/// Bilinear sample at pixel-centre coordinates; neighbours outside the image
/// contribute zero.
fn sample_bilinear(image: &Image, pixel: Vec2<f32>, channel: usize) -> f32 {
    let x0 = pixel.x.floor();
    let y0 = pixel.y.floor();
    let fx = pixel.x - x0;
    let fy = pixel.y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let top = fetch(image, x0, y0, channel) * (1.0 - fx) + fetch(image, x0 + 1, y0, channel) * fx;
    let bottom =
        fetch(image, x0, y0 + 1, channel) * (1.0 - fx) + fetch(image, x0 + 1, y0 + 1, channel) * fx;
    top * (1.0 - fy) + bottom * fy
}

fn fetch(image: &Image, x: i64, y: i64, channel: usize) -> f32 {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return PAD_VALUE;
    }
    // Grey images feed the same sample to every channel; RGBA drops alpha.
    let source_channel = if image.channels() == 1 { 0 } else { channel };
    image.channel_value(x as usize, y as usize, source_channel)
}
