// SPDX-License-Identifier: GPL-3.0-only

//! JPEG encoding of captured frames into the spool directory
//!
//! Encoding and the file write run in a blocking task so the preview keeps
//! flowing while a photo is written.

use crate::backends::camera::{CameraFrame, CapturedPhoto};
use crate::constants::{capture, storage};
use crate::errors::CaptureError;
use image::{RgbImage, imageops};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Encode `frame` and write it to `spool_dir` as `<uuid>.jpg`.
///
/// `mirrored` frames are flipped back before encoding.
pub async fn spool_jpeg(
    frame: Arc<CameraFrame>,
    mirrored: bool,
    quality: f32,
    spool_dir: PathBuf,
) -> Result<CapturedPhoto, CaptureError> {
    let jpeg_quality = capture::jpeg_quality(quality);
    info!(
        width = frame.width,
        height = frame.height,
        jpeg_quality,
        "Starting encoding"
    );

    tokio::task::spawn_blocking(move || {
        let mut image = rgb_from_frame(&frame)?;
        if mirrored {
            imageops::flip_horizontal_in_place(&mut image);
        }
        let data = encode_jpeg(&image, jpeg_quality)?;
        debug!(size = data.len(), "Encoding complete");

        std::fs::create_dir_all(&spool_dir)?;
        let locator = spool_dir.join(format!(
            "{}.{}",
            uuid::Uuid::new_v4(),
            storage::PHOTO_EXTENSION
        ));
        std::fs::write(&locator, &data)?;

        info!(path = %locator.display(), "Photo spooled");
        Ok(CapturedPhoto { locator })
    })
    .await
    .map_err(|e| CaptureError::Encoding(format!("Encoding task error: {}", e)))?
}

/// Drop the alpha channel; JPEG has none
fn rgb_from_frame(frame: &CameraFrame) -> Result<RgbImage, CaptureError> {
    if !frame.is_complete() {
        return Err(CaptureError::NoFrame);
    }
    let rgb: Vec<u8> = frame
        .data
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    RgbImage::from_raw(frame.width, frame.height, rgb)
        .ok_or_else(|| CaptureError::Encoding("Frame does not match its dimensions".to_string()))
}

fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, CaptureError> {
    let mut buffer = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .encode(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| CaptureError::Encoding(format!("JPEG encoding failed: {}", e)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32, pixel: [u8; 4]) -> CameraFrame {
        let data: Vec<u8> = pixel
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();
        CameraFrame {
            width,
            height,
            data: Arc::from(data),
        }
    }

    #[test]
    fn test_alpha_is_dropped() {
        let image = rgb_from_frame(&frame(2, 1, [10, 20, 30, 255])).unwrap();
        assert_eq!(image.as_raw(), &vec![10, 20, 30, 10, 20, 30]);
    }

    #[test]
    fn test_incomplete_frame_is_rejected() {
        let mut bad = frame(2, 2, [0, 0, 0, 255]);
        bad.data = Arc::from(vec![0u8; 3]);
        assert_eq!(rgb_from_frame(&bad).unwrap_err(), CaptureError::NoFrame);
    }

    #[test]
    fn test_higher_quality_is_larger() {
        // Noise compresses badly, so quality shows in the size
        let data: Vec<u8> = (0..64 * 64 * 3).map(|i| ((i * 7919) % 251) as u8).collect();
        let image = RgbImage::from_raw(64, 64, data).unwrap();
        let low = encode_jpeg(&image, 1).unwrap();
        let high = encode_jpeg(&image, 100).unwrap();
        assert!(high.len() > low.len());
        assert_eq!(&high[..2], &[0xFF, 0xD8]);
    }

    #[tokio::test]
    async fn test_mirrored_frame_is_flipped_back() {
        let dir = std::env::temp_dir().join(format!("snapcam-enc-{}", uuid::Uuid::new_v4()));
        let mut data = vec![0u8; 16 * 8 * 4];
        // Left half white, right half black
        for y in 0..8 {
            for x in 0..8 {
                let i = (y * 16 + x) * 4;
                data[i..i + 4].copy_from_slice(&[255, 255, 255, 255]);
            }
        }
        let frame = CameraFrame {
            width: 16,
            height: 8,
            data: Arc::from(data),
        };

        let photo = spool_jpeg(Arc::new(frame), true, 1.0, dir.clone())
            .await
            .unwrap();
        let decoded = image::open(&photo.locator).unwrap().to_rgb8();
        assert!(decoded.get_pixel(1, 4)[0] < 64);
        assert!(decoded.get_pixel(14, 4)[0] > 192);
        std::fs::remove_dir_all(dir).ok();
    }
}
