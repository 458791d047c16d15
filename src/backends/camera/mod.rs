// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend
//!
//! ```text
//! ┌──────────────────────┐      ┌──────────────────────┐
//! │ FrameCamera (GUI)    │      │ LiveCamera (CLI)     │
//! │ last preview frame   │      │ own short pipeline   │
//! └──────────┬───────────┘      └──────────┬───────────┘
//!            └────────────┬────────────────┘
//!                         ▼
//!               Camera::capture(request)
//!                         │
//!                         ▼
//!         JPEG in spool dir → CapturedPhoto
//! ```
//!
//! The preview itself runs through [`CameraPipeline`] inside a UI
//! subscription; [`enumerate_cameras`] and [`select_camera`] decide which
//! PipeWire node backs a facing.

pub mod enumeration;
pub mod pipeline;
pub mod types;

pub use enumeration::enumerate_cameras;
pub use pipeline::CameraPipeline;
pub use types::*;

use crate::constants::capture;
use crate::errors::CaptureError;
use crate::flash::{FlashHardware, FlashMode};
use crate::pipelines::photo::encoding;
use futures::StreamExt;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Something that can take a still photo
pub trait Camera {
    /// Capture a still and park it where the photo library can pick it up.
    ///
    /// May suspend until the native capture path resolves.
    fn capture(
        &self,
        request: CaptureRequest,
    ) -> impl Future<Output = Result<CapturedPhoto, CaptureError>> + Send;
}

/// Captures the most recent preview frame.
///
/// The preview may be mirrored for the front camera; the stored photo is
/// always flipped back to sensor orientation.
#[derive(Debug, Clone)]
pub struct FrameCamera {
    pub frame: Option<Arc<CameraFrame>>,
    pub mirrored: bool,
    pub shutter_sound: bool,
    pub spool_dir: PathBuf,
}

impl Camera for FrameCamera {
    async fn capture(&self, request: CaptureRequest) -> Result<CapturedPhoto, CaptureError> {
        let frame = self.frame.clone().ok_or(CaptureError::NoFrame)?;
        if !frame.is_complete() {
            return Err(CaptureError::NoFrame);
        }

        info!(
            width = frame.width,
            height = frame.height,
            quality = request.quality,
            "Capturing preview frame"
        );
        let photo =
            encoding::spool_jpeg(frame, self.mirrored, request.quality, self.spool_dir.clone())
                .await?;

        if self.shutter_sound {
            play_shutter_sound();
        }
        Ok(photo)
    }
}

/// Opens the device, waits for exposure to settle and grabs one frame.
///
/// Fires the LED flash around the grab when flash is on and LEDs exist.
#[derive(Debug, Clone)]
pub struct LiveCamera {
    pub device: CameraDevice,
    pub flash: FlashMode,
    pub leds: FlashHardware,
    pub shutter_sound: bool,
    pub spool_dir: PathBuf,
}

impl Camera for LiveCamera {
    async fn capture(&self, request: CaptureRequest) -> Result<CapturedPhoto, CaptureError> {
        let device = self.device.clone();
        let leds = if self.flash.is_on() {
            if !self.leds.has_devices() {
                warn!("Flash requested but no controllable flash LED found");
            }
            Some(self.leds.clone())
        } else {
            None
        };

        let frame = grab_frame(device, leds).await?;

        let photo =
            encoding::spool_jpeg(Arc::new(frame), false, request.quality, self.spool_dir.clone())
                .await?;

        if self.shutter_sound {
            play_shutter_sound();
        }
        Ok(photo)
    }
}

/// Run a short-lived pipeline and return the first frame after warm-up
async fn grab_frame(
    device: CameraDevice,
    leds: Option<FlashHardware>,
) -> Result<CameraFrame, CaptureError> {
    info!(device = %device.name, "Opening camera for still capture");
    let (sender, mut receiver) = futures::channel::mpsc::channel(2);
    // Starting waits for the pipeline to reach Playing
    let pipeline =
        tokio::task::spawn_blocking(move || CameraPipeline::new(&device, false, sender))
            .await
            .map_err(|e| CaptureError::Pipeline(format!("Capture task error: {}", e)))??;

    if let Some(leds) = &leds {
        leds.all_on();
    }

    let start = Instant::now();
    let deadline = tokio::time::Instant::now() + capture::FRAME_TIMEOUT;
    let mut latest: Option<CameraFrame> = None;
    let result = loop {
        match tokio::time::timeout_at(deadline, receiver.next()).await {
            Ok(Some(frame)) => {
                let settled = start.elapsed() >= capture::WARMUP;
                latest = Some(frame);
                if settled {
                    break latest.ok_or(CaptureError::NoFrame);
                }
            }
            Ok(None) => break latest.ok_or(CaptureError::NoFrame),
            Err(_) => break latest.ok_or(CaptureError::Timeout),
        }
    };

    if let Some(leds) = &leds {
        leds.all_off();
    }
    // Stopping waits for the pipeline to reach Null
    let _ = tokio::task::spawn_blocking(move || drop(pipeline)).await;

    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Still capture finished");
    result
}

/// Play the desktop shutter sound without waiting for it
pub fn play_shutter_sound() {
    let spawned = std::process::Command::new("canberra-gtk-play")
        .args(["-i", "camera-shutter", "-d", "snapcam"])
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn();

    match spawned {
        Ok(mut child) => {
            // Reap in the background so no zombie is left behind
            std::thread::spawn(move || {
                let _ = child.wait();
            });
        }
        Err(e) => debug!(error = %e, "Shutter sound unavailable"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spool() -> PathBuf {
        std::env::temp_dir().join(format!("snapcam-spool-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_frame_camera_without_frame_fails() {
        let camera = FrameCamera {
            frame: None,
            mirrored: false,
            shutter_sound: false,
            spool_dir: spool(),
        };
        let result = camera.capture(CaptureRequest::default()).await;
        assert_eq!(result, Err(CaptureError::NoFrame));
    }

    #[tokio::test]
    async fn test_frame_camera_rejects_truncated_frame() {
        let camera = FrameCamera {
            frame: Some(Arc::new(CameraFrame {
                width: 4,
                height: 4,
                data: Arc::from(vec![0u8; 10]),
            })),
            mirrored: false,
            shutter_sound: false,
            spool_dir: spool(),
        };
        let result = camera.capture(CaptureRequest::default()).await;
        assert_eq!(result, Err(CaptureError::NoFrame));
    }

    #[tokio::test]
    async fn test_frame_camera_spools_jpeg() {
        let dir = spool();
        let camera = FrameCamera {
            frame: Some(Arc::new(CameraFrame {
                width: 8,
                height: 6,
                data: Arc::from(vec![128u8; 8 * 6 * 4]),
            })),
            mirrored: true,
            shutter_sound: false,
            spool_dir: dir.clone(),
        };
        let photo = camera.capture(CaptureRequest::default()).await.unwrap();
        assert!(photo.locator.starts_with(&dir));
        let decoded = image::open(&photo.locator).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
        std::fs::remove_dir_all(dir).ok();
    }
}
