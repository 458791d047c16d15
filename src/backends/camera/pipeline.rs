// SPDX-License-Identifier: GPL-3.0-only

//! PipeWire GStreamer pipeline delivering RGBA frames

use super::types::{CameraDevice, CameraFrame, FrameSender};
use crate::constants::{pipeline, timing};
use crate::errors::CaptureError;
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, info, warn};

static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Camera pipeline: `pipewiresrc ! videoconvert ! RGBA ! appsink`.
///
/// Frames are pushed into the sender as they arrive; full channels drop
/// frames rather than stall the camera. The device is released on drop.
pub struct CameraPipeline {
    pipeline: gstreamer::Pipeline,
    appsink: AppSink,
}

impl CameraPipeline {
    /// Start streaming from `device`, mirroring horizontally if `mirror` is set
    pub fn new(
        device: &CameraDevice,
        mirror: bool,
        mut frame_sender: FrameSender,
    ) -> Result<Self, CaptureError> {
        info!(device = %device.name, mirror, "Creating camera pipeline");

        gstreamer::init()?;

        if gstreamer::ElementFactory::find("pipewiresrc").is_none() {
            return Err(CaptureError::Pipeline(
                "pipewiresrc not available: factory not found".to_string(),
            ));
        }

        let description = build_pipeline_string(&device.path, mirror);
        debug!(pipeline = %description, "Launching pipeline");

        let pipeline = gstreamer::parse::launch(&description)?
            .dynamic_cast::<gstreamer::Pipeline>()
            .map_err(|_| CaptureError::Pipeline("Failed to cast to pipeline".to_string()))?;

        let appsink = pipeline
            .by_name("sink")
            .ok_or_else(|| CaptureError::Pipeline("Failed to get appsink".to_string()))?
            .dynamic_cast::<AppSink>()
            .map_err(|_| CaptureError::Pipeline("Failed to cast appsink".to_string()))?;

        appsink.set_property("sync", false);
        appsink.set_property("max-buffers", pipeline::MAX_BUFFERS);
        appsink.set_property("drop", true);

        appsink.set_callbacks(
            gstreamer_app::AppSinkCallbacks::builder()
                .new_sample(move |appsink| {
                    let frame_num = FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);

                    let sample = appsink.pull_sample().map_err(|_| gstreamer::FlowError::Eos)?;
                    let frame = match frame_from_sample(&sample) {
                        Ok(frame) => frame,
                        Err(e) => {
                            if frame_num % timing::FRAME_LOG_INTERVAL == 0 {
                                warn!(frame = frame_num, error = %e, "Dropping unreadable frame");
                            }
                            return Ok(gstreamer::FlowSuccess::Ok);
                        }
                    };

                    if frame_num % timing::FRAME_LOG_INTERVAL == 0 {
                        debug!(
                            frame = frame_num,
                            width = frame.width,
                            height = frame.height,
                            "Frame received"
                        );
                    }

                    if let Err(e) = frame_sender.try_send(frame) {
                        if e.is_disconnected() {
                            return Err(gstreamer::FlowError::Eos);
                        }
                        debug!(frame = frame_num, "Frame dropped (channel full)");
                    }

                    Ok(gstreamer::FlowSuccess::Ok)
                })
                .build(),
        );

        pipeline
            .set_state(gstreamer::State::Playing)
            .map_err(|e| CaptureError::Pipeline(format!("Failed to start pipeline: {}", e)))?;

        let (result, state, pending) = pipeline.state(gstreamer::ClockTime::from_seconds(
            timing::START_TIMEOUT_SECS,
        ));
        debug!(?result, ?state, ?pending, "Pipeline state");
        if let Some(message) = first_bus_error(&pipeline) {
            error!(error = %message, "Pipeline reported an error while starting");
            let _ = pipeline.set_state(gstreamer::State::Null);
            return Err(CaptureError::Pipeline(message));
        }
        if state != gstreamer::State::Playing {
            warn!(?state, "Pipeline is not in PLAYING state yet");
        }

        info!("Camera pipeline started");
        Ok(Self { pipeline, appsink })
    }
}

impl Drop for CameraPipeline {
    fn drop(&mut self) {
        debug!("Stopping camera pipeline");
        self.appsink
            .set_callbacks(gstreamer_app::AppSinkCallbacks::builder().build());
        if let Err(e) = self.pipeline.set_state(gstreamer::State::Null) {
            warn!(error = %e, "Failed to stop pipeline");
        }
        let _ = self.pipeline.state(gstreamer::ClockTime::from_seconds(
            timing::STOP_TIMEOUT_SECS,
        ));
    }
}

/// Copy a sample into a tightly packed RGBA frame
fn frame_from_sample(sample: &gstreamer::Sample) -> Result<CameraFrame, String> {
    let buffer = sample.buffer().ok_or("No buffer in sample")?;
    if buffer.flags().contains(gstreamer::BufferFlags::CORRUPTED) {
        return Err("Buffer marked as corrupted".to_string());
    }
    let caps = sample.caps().ok_or("No caps in sample")?;
    let info = VideoInfo::from_caps(caps).map_err(|e| e.to_string())?;
    let map = buffer.map_readable().map_err(|e| e.to_string())?;

    let width = info.width();
    let height = info.height();
    let stride = info.stride()[0] as usize;
    let data = pack_rows(map.as_slice(), width as usize * 4, stride, height as usize)?;

    Ok(CameraFrame {
        width,
        height,
        data: Arc::from(data),
    })
}

/// Drop row padding so the frame is `row_len * rows` bytes
pub(crate) fn pack_rows(
    src: &[u8],
    row_len: usize,
    stride: usize,
    rows: usize,
) -> Result<Vec<u8>, String> {
    if stride < row_len || src.len() < stride * rows.saturating_sub(1) + row_len {
        return Err(format!(
            "Frame buffer too small: {} bytes for {} rows of {} (stride {})",
            src.len(),
            rows,
            row_len,
            stride
        ));
    }
    if stride == row_len {
        return Ok(src[..row_len * rows].to_vec());
    }
    let mut packed = Vec::with_capacity(row_len * rows);
    for row in 0..rows {
        let start = row * stride;
        packed.extend_from_slice(&src[start..start + row_len]);
    }
    Ok(packed)
}

fn first_bus_error(pipeline: &gstreamer::Pipeline) -> Option<String> {
    let bus = pipeline.bus()?;
    while let Some(msg) = bus.pop_filtered(&[gstreamer::MessageType::Error]) {
        if let gstreamer::MessageView::Error(err) = msg.view() {
            return Some(err.error().to_string());
        }
    }
    None
}

/// Build the launch string for a PipeWire target
pub(crate) fn build_pipeline_string(device_path: &str, mirror: bool) -> String {
    let flip = if mirror {
        "videoflip method=horizontal-flip ! "
    } else {
        ""
    };
    format!(
        "pipewiresrc {}do-timestamp=true ! \
         queue max-size-buffers={} leaky=downstream ! \
         videoconvert ! {}video/x-raw,format={} ! \
         appsink name=sink",
        pipewire_target_property(device_path),
        pipeline::MAX_BUFFERS,
        flip,
        pipeline::OUTPUT_FORMAT
    )
}

/// Translate a device path into a pipewiresrc property (with trailing space)
fn pipewire_target_property(device_path: &str) -> String {
    if device_path.is_empty() {
        String::new()
    } else if let Some(serial) = device_path.strip_prefix("pipewire-serial-") {
        format!("target-object={} ", serial)
    } else if let Some(node_id) = device_path.strip_prefix("pipewire-") {
        format!("target-object={} ", node_id)
    } else if device_path.starts_with("/dev/video") {
        format!("path=v4l2:{} ", device_path)
    } else {
        format!("path={} ", device_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_targets() {
        assert!(build_pipeline_string("", false).starts_with("pipewiresrc do-timestamp"));
        assert!(build_pipeline_string("pipewire-serial-2146", false).contains("target-object=2146 "));
        assert!(build_pipeline_string("pipewire-62", false).contains("target-object=62 "));
        assert!(build_pipeline_string("/dev/video0", false).contains("path=v4l2:/dev/video0 "));
    }

    #[test]
    fn test_mirror_adds_flip() {
        assert!(build_pipeline_string("", true).contains("videoflip method=horizontal-flip"));
        assert!(!build_pipeline_string("", false).contains("videoflip"));
        assert!(build_pipeline_string("", false).contains("format=RGBA"));
    }

    #[test]
    fn test_pack_rows_strips_padding() {
        // 2 rows of 4 bytes with 2 padding bytes each
        let src = [1, 2, 3, 4, 0, 0, 5, 6, 7, 8, 0, 0];
        assert_eq!(pack_rows(&src, 4, 6, 2).unwrap(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_pack_rows_rejects_short_buffer() {
        assert!(pack_rows(&[0; 7], 4, 4, 2).is_err());
        assert!(pack_rows(&[0; 8], 4, 2, 2).is_err());
    }
}
