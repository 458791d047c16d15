// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants module

use snapcam::backends::camera::CaptureRequest;
use snapcam::constants::{capture, ui};

#[test]
fn test_snaps_request_maximum_quality() {
    assert_eq!(CaptureRequest::default().quality, capture::MAX_QUALITY);
    assert_eq!(capture::jpeg_quality(CaptureRequest::default().quality), 100);
}

#[test]
fn test_jpeg_quality_is_monotonic() {
    let mut previous = 0u8;
    for step in 0..=20 {
        let quality = capture::jpeg_quality(step as f32 / 20.0);
        assert!(
            quality >= previous,
            "JPEG quality should never drop as requested quality rises"
        );
        previous = quality;
    }
}

#[test]
fn test_flash_lasts_one_second() {
    assert_eq!(capture::FLASH_DURATION.as_millis(), 1000);
    assert!(capture::WARMUP < capture::FRAME_TIMEOUT);
}

#[test]
fn test_capturing_button_shrinks() {
    assert!(ui::CAPTURING_SCALE > 0.0 && ui::CAPTURING_SCALE < 1.0);
}
