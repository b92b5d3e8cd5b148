//! Pixel-wise enhancement pipeline
//!
//! Every adjustment blends the source image with a "degenerate" version of
//! itself: `out = degenerate + factor * (source - degenerate)`. The stages run
//! in a fixed order (sharpness, contrast, color, brightness), each consuming
//! the previous stage's output.

use crate::config::EnhanceFactors;
use image::{DynamicImage, Rgb, RgbImage};

/// Divisor of the 3x3 smoothing kernel `1 1 1 / 1 5 1 / 1 1 1`
const SMOOTH_DIVISOR: u32 = 13;
const SMOOTH_CENTER_WEIGHT: u32 = 5;

/// Fixed four-stage enhancement pipeline
#[derive(Debug, Clone, Copy, Default)]
pub struct EnhancementPipeline {
    factors: EnhanceFactors,
}

impl EnhancementPipeline {
    #[must_use]
    pub fn new(factors: EnhanceFactors) -> Self {
        Self { factors }
    }

    #[must_use]
    pub fn factors(&self) -> EnhanceFactors {
        self.factors
    }

    /// Normalize to RGB8 and run all four stages
    #[must_use]
    pub fn apply_dynamic(&self, image: DynamicImage) -> RgbImage {
        self.apply(&normalize_to_rgb(image))
    }

    /// Run all four stages on an RGB8 image
    #[must_use]
    pub fn apply(&self, image: &RgbImage) -> RgbImage {
        let sharpened = adjust_sharpness(image, self.factors.sharpness);
        let contrasted = adjust_contrast(&sharpened, self.factors.contrast);
        let saturated = adjust_color(&contrasted, self.factors.color);
        adjust_brightness(&saturated, self.factors.brightness)
    }
}

/// Convert any decoded image to three-channel 8-bit color.
///
/// Alpha is dropped without compositing; an RGB8 image is moved through as is.
#[must_use]
pub fn normalize_to_rgb(image: DynamicImage) -> RgbImage {
    match image {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => {
            log::debug!("Converting {:?} image to RGB8", other.color());
            other.to_rgb8()
        },
    }
}

/// Sharpness: blend against a 3x3 smoothed copy
#[must_use]
pub fn adjust_sharpness(image: &RgbImage, factor: f32) -> RgbImage {
    blend(&smooth(image), image, factor)
}

/// Contrast: blend against a flat gray image at the mean luma
#[must_use]
pub fn adjust_contrast(image: &RgbImage, factor: f32) -> RgbImage {
    let mean = mean_luma(image);
    let degenerate = RgbImage::from_pixel(image.width(), image.height(), Rgb([mean; 3]));
    blend(&degenerate, image, factor)
}

/// Color saturation: blend against the grayscale version
#[must_use]
pub fn adjust_color(image: &RgbImage, factor: f32) -> RgbImage {
    let mut degenerate = image.clone();
    for pixel in degenerate.pixels_mut() {
        let l = luma(pixel);
        *pixel = Rgb([l, l, l]);
    }
    blend(&degenerate, image, factor)
}

/// Brightness: blend against black
#[must_use]
pub fn adjust_brightness(image: &RgbImage, factor: f32) -> RgbImage {
    let degenerate = RgbImage::new(image.width(), image.height());
    blend(&degenerate, image, factor)
}

/// Linear interpolation/extrapolation between two same-sized images.
///
/// Results are truncated toward zero and clamped into `0..=255`.
fn blend(degenerate: &RgbImage, source: &RgbImage, factor: f32) -> RgbImage {
    debug_assert_eq!(degenerate.dimensions(), source.dimensions());

    let mut out = source.clone();
    for (value, base) in out.iter_mut().zip(degenerate.iter()) {
        let base = f32::from(*base);
        let blended = base + factor * (f32::from(*value) - base);
        *value = blended.clamp(0.0, 255.0) as u8;
    }
    out
}

/// 3x3 smoothing filter; the one-pixel border is copied from the source
fn smooth(image: &RgbImage) -> RgbImage {
    let (width, height) = image.dimensions();
    let mut out = image.clone();
    if width < 3 || height < 3 {
        return out;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut sums = [0u32; 3];
            for ny in y - 1..=y + 1 {
                for nx in x - 1..=x + 1 {
                    let weight = if nx == x && ny == y {
                        SMOOTH_CENTER_WEIGHT
                    } else {
                        1
                    };
                    let Rgb(channels) = *image.get_pixel(nx, ny);
                    for (sum, channel) in sums.iter_mut().zip(channels) {
                        *sum += weight * u32::from(channel);
                    }
                }
            }
            let rounded = sums.map(|sum| ((sum + SMOOTH_DIVISOR / 2) / SMOOTH_DIVISOR) as u8);
            out.put_pixel(x, y, Rgb(rounded));
        }
    }
    out
}

/// ITU-R 601-2 luma in 16.16 fixed point, rounded
#[inline]
fn luma(pixel: &Rgb<u8>) -> u8 {
    let Rgb([r, g, b]) = *pixel;
    let weighted = u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471;
    ((weighted + 0x8000) >> 16) as u8
}

/// Mean luma of the image rounded to the nearest integer
fn mean_luma(image: &RgbImage) -> u8 {
    let count = u64::from(image.width()) * u64::from(image.height());
    if count == 0 {
        return 0;
    }
    let total: u64 = image.pixels().map(|p| u64::from(luma(p))).sum();
    (total as f64 / count as f64 + 0.5) as u8
}
