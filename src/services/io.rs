//! Image I/O operations service
//!
//! This module separates file I/O from the pixel pipeline and the segmentation
//! plumbing, so both can be tested on in-memory buffers.

use crate::{
    error::{ProcessingError, Result},
    types::SavedImage,
};
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::DynamicImage;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Service for handling image file input/output operations
pub struct ImageIOService;

impl ImageIOService {
    /// Load an image from a file path
    ///
    /// Extension-based format detection is tried first; when that fails the
    /// file content is sniffed instead, so a JPEG saved as `image1.png` still
    /// loads.
    pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
        let path_ref = path.as_ref();

        match image::open(path_ref) {
            Ok(img) => Ok(img),
            Err(e) => {
                log::debug!(
                    "Extension-based loading failed for {}: {}. Attempting content-based detection.",
                    path_ref.display(),
                    e
                );

                let data = Self::read_bytes(path_ref)?;
                image::load_from_memory(&data).map_err(|content_err| {
                    ProcessingError::processing_stage_error(
                        "image loading",
                        &format!("{content_err}"),
                        Some(&format!(
                            "path: {}, size: {} bytes",
                            path_ref.display(),
                            data.len()
                        )),
                    )
                })
            },
        }
    }

    /// Read the raw bytes of a file
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        let path_ref = path.as_ref();
        std::fs::read(path_ref)
            .map_err(|e| ProcessingError::file_io_error("read image file", path_ref, &e))
    }

    /// Decode an image from encoded bytes
    pub fn load_from_bytes(bytes: &[u8]) -> Result<DynamicImage> {
        Ok(image::load_from_memory(bytes)?)
    }

    /// Encode an image as PNG into memory
    pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::write_png(image, &mut buffer)?;
        Ok(buffer)
    }

    /// Smallest-output PNG encoding: best deflate level with adaptive
    /// per-row filtering
    fn write_png<W: Write>(image: &DynamicImage, writer: W) -> Result<()> {
        let encoder =
            PngEncoder::new_with_quality(writer, CompressionType::Best, PngFilterType::Adaptive);
        image.write_with_encoder(encoder)?;
        Ok(())
    }

    /// Save an image as PNG and report the written file size
    pub fn save_png<P: AsRef<Path>>(image: &DynamicImage, path: P) -> Result<SavedImage> {
        let path_ref = path.as_ref();

        if let Some(parent) = path_ref.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ProcessingError::file_io_error("create output directory", parent, &e)
                })?;
            }
        }

        let file = File::create(path_ref)
            .map_err(|e| ProcessingError::file_io_error("create output file", path_ref, &e))?;
        let mut writer = BufWriter::new(file);
        Self::write_png(image, &mut writer).map_err(|e| {
            ProcessingError::processing_stage_error(
                "image save",
                &format!("Failed to save as PNG: {e}"),
                Some(&format!("path: {}", path_ref.display())),
            )
        })?;
        writer
            .flush()
            .map_err(|e| ProcessingError::file_io_error("flush output file", path_ref, &e))?;

        let size_bytes = std::fs::metadata(path_ref)
            .map_err(|e| ProcessingError::file_io_error("stat written image", path_ref, &e))?
            .len();

        log::debug!("Wrote {} ({} bytes)", path_ref.display(), size_bytes);
        Ok(SavedImage::new(path_ref, size_bytes))
    }
}
