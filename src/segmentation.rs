//! Foreground segmentation capability
//!
//! Background removal treats the segmentation model as an opaque capability:
//! encoded image bytes in, encoded image bytes (an alpha-matted cutout) out.
//! [`Segmenter`] is that seam. The production implementation lives in
//! [`crate::backends`]; any `Fn(&[u8]) -> Result<Vec<u8>>` also qualifies, which
//! is how tests inject deterministic stubs.
//!
//! The mask helpers below are shared by the model backends and have no model
//! dependency of their own.

use crate::error::{ProcessingError, Result};
use image::{imageops::FilterType, GrayImage, Luma, RgbImage, Rgba, RgbaImage};
use ndarray::Array4;

/// Separates the foreground subject from the background
pub trait Segmenter {
    /// Turn encoded input image bytes into an encoded cutout with alpha
    fn segment(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Human-readable name used in progress messages
    fn name(&self) -> &str {
        "segmentation model"
    }
}

impl<F> Segmenter for F
where
    F: Fn(&[u8]) -> Result<Vec<u8>>,
{
    fn segment(&self, input: &[u8]) -> Result<Vec<u8>> {
        self(input)
    }
}

/// Resize to the model resolution and convert to a normalized NCHW tensor.
///
/// Channels are first divided by the brightest channel value in the resized
/// image, then normalized with `(v - mean) / std`.
#[must_use]
pub fn image_to_tensor(image: &RgbImage, size: u32, mean: [f32; 3], std: [f32; 3]) -> Array4<f32> {
    let resized = image::imageops::resize(image, size, size, FilterType::Lanczos3);
    let max_value = resized.iter().copied().max().unwrap_or(0).max(1);
    let max_value = f32::from(max_value);

    let side = size as usize;
    let mut tensor = Array4::<f32>::zeros((1, 3, side, side));
    for (x, y, pixel) in resized.enumerate_pixels() {
        for c in 0..3 {
            let value = f32::from(pixel[c]) / max_value;
            tensor[[0, c, y as usize, x as usize]] = (value - mean[c]) / std[c];
        }
    }
    tensor
}

/// Min-max normalize the first prediction channel into a gray mask.
///
/// Expects a `(1, C, H, W)` tensor with `C >= 1`. A constant prediction yields
/// an all-zero mask.
pub fn prediction_to_mask(prediction: &Array4<f32>) -> Result<GrayImage> {
    let (batch, channels, height, width) = prediction.dim();
    if batch < 1 || channels < 1 || height == 0 || width == 0 {
        return Err(ProcessingError::segmentation(format!(
            "Unexpected prediction shape {:?}",
            prediction.dim()
        )));
    }

    let plane = prediction.slice(ndarray::s![0, 0, .., ..]);
    let (min, max) = plane
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = max - min;

    let mut mask = GrayImage::new(width as u32, height as u32);
    for ((y, x), &value) in plane.indexed_iter() {
        let normalized = if range > f32::EPSILON {
            (value - min) / range
        } else {
            0.0
        };
        mask.put_pixel(
            x as u32,
            y as u32,
            Luma([(normalized * 255.0).clamp(0.0, 255.0) as u8]),
        );
    }
    Ok(mask)
}

/// Composite `image` over a fully transparent black canvas through `mask`
///
/// The mask (resized to the image) becomes the alpha channel and also scales
/// the color channels, so pixels outside the foreground end up `(0, 0, 0, 0)`.
#[must_use]
pub fn apply_mask(image: &RgbImage, mask: &GrayImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mask = if mask.dimensions() == (width, height) {
        mask.clone()
    } else {
        image::imageops::resize(mask, width, height, FilterType::Lanczos3)
    };

    let mut cutout = RgbaImage::new(width, height);
    for ((target, source), alpha) in cutout
        .pixels_mut()
        .zip(image.pixels())
        .zip(mask.pixels())
    {
        let weight = u32::from(alpha[0]);
        let scale = |channel: u8| div255(u32::from(channel) * weight);
        *target = Rgba([scale(source[0]), scale(source[1]), scale(source[2]), alpha[0]]);
    }
    cutout
}

/// Rounded division by 255 for a product of two 8-bit values
#[inline]
fn div255(value: u32) -> u8 {
    let shifted = value + 128;
    (((shifted >> 8) + shifted) >> 8) as u8
}
