//! The two image operations: enhancement and background removal
//!
//! Both are stateless. Each either writes one PNG and returns its
//! [`SavedImage`], or returns the underlying cause. Reporting is left to the
//! caller.

use crate::{
    config::EnhanceFactors,
    enhance::EnhancementPipeline,
    error::{ProcessingError, Result},
    segmentation::Segmenter,
    services::ImageIOService,
    types::SavedImage,
};
use image::DynamicImage;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, instrument};

/// Enhance `input` with the fixed four-stage pipeline and write a PNG to `output`
#[instrument(skip_all, fields(input = %input.as_ref().display()))]
pub fn enhance_image<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    factors: EnhanceFactors,
) -> Result<SavedImage> {
    factors.validate()?;
    let start = Instant::now();

    let image = ImageIOService::load_image(input.as_ref())?;
    debug!(
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "decoded input"
    );

    let enhanced = EnhancementPipeline::new(factors).apply_dynamic(image);
    let saved = ImageIOService::save_png(&DynamicImage::ImageRgb8(enhanced), output)?;

    debug!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        size_bytes = saved.size_bytes,
        "enhancement complete"
    );
    Ok(saved)
}

/// Remove the background of `input` through `segmenter` and write a PNG to `output`
///
/// The raw file bytes go to the segmenter untouched; its answer is decoded
/// and re-encoded as PNG, so any format the segmenter returns is accepted.
#[instrument(skip_all, fields(input = %input.as_ref().display(), segmenter = segmenter.name()))]
pub fn remove_background<P, Q, S>(input: P, output: Q, segmenter: &S) -> Result<SavedImage>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    S: Segmenter + ?Sized,
{
    let start = Instant::now();

    let input_bytes = ImageIOService::read_bytes(input.as_ref())?;
    let output_bytes = segmenter.segment(&input_bytes)?;
    if output_bytes.is_empty() {
        return Err(ProcessingError::segmentation(
            "segmenter returned no image data",
        ));
    }

    let cutout = ImageIOService::load_from_bytes(&output_bytes)?;
    let saved = ImageIOService::save_png(&cutout, output)?;

    debug!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        size_bytes = saved.size_bytes,
        "background removal complete"
    );
    Ok(saved)
}
