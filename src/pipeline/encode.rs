//! Image encoding: rendered page → PNG or JPEG bytes.
//!
//! Encoding is a pure function of pixel surface and format; it knows nothing
//! about page numbers or batching. The caller passes in a scratch buffer that
//! is cleared and refilled on every call, so a batch reuses one allocation
//! across all of its pages instead of growing a fresh Vec per page.

use crate::config::{ImageFormat, JPEG_QUALITY};
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::io::Cursor;
use tracing::debug;

/// Encode a rendered page into `buf` as PNG or JPEG.
///
/// JPEG has no alpha channel, so the RGBA surface pdfium produces is
/// flattened to RGB first; PNG keeps the surface as-is.
pub fn encode_page(
    image: &DynamicImage,
    format: ImageFormat,
    buf: &mut Vec<u8>,
) -> Result<(), image::ImageError> {
    buf.clear();

    match format {
        ImageFormat::Png => {
            image.write_to(&mut Cursor::new(&mut *buf), image::ImageFormat::Png)?;
        }
        ImageFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut *buf, JPEG_QUALITY);
            DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder)?;
        }
    }

    debug!("Encoded page → {} bytes ({:?})", buf.len(), format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn red_square() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255])))
    }

    #[test]
    fn png_output_carries_png_signature() {
        let mut buf = Vec::new();
        encode_page(&red_square(), ImageFormat::Png, &mut buf).expect("encode should succeed");
        assert!(buf.starts_with(b"\x89PNG\r\n\x1a\n"), "not a PNG: {:?}", &buf[..8]);
    }

    #[test]
    fn jpeg_output_carries_jfif_signature() {
        let mut buf = Vec::new();
        encode_page(&red_square(), ImageFormat::Jpeg, &mut buf).expect("encode should succeed");
        assert!(buf.starts_with(&[0xFF, 0xD8]), "not a JPEG: {:?}", &buf[..2]);
    }

    #[test]
    fn scratch_buffer_is_cleared_between_calls() {
        let mut buf = Vec::new();
        encode_page(&red_square(), ImageFormat::Jpeg, &mut buf).expect("jpeg encode");
        encode_page(&red_square(), ImageFormat::Png, &mut buf).expect("png encode");
        // Second encode must fully replace the first, not append to it.
        assert!(buf.starts_with(b"\x89PNG\r\n\x1a\n"));
    }
}
