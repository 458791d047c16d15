// SPDX-License-Identifier: GPL-3.0-only

//! Camera list, preview frames and flipping

use crate::app::state::{AppModel, Intent, Message};
use crate::backends::camera::CameraFrame;
use crate::constants::timing;
use cosmic::Task;
use cosmic::widget::image;
use std::sync::Arc;
use tracing::{debug, info, warn};

impl AppModel {
    pub(crate) fn handle_cameras_initialized(
        &mut self,
        cameras: Vec<crate::backends::camera::CameraDevice>,
    ) -> Task<cosmic::Action<Message>> {
        info!(count = cameras.len(), "Cameras initialized");
        for camera in &cameras {
            debug!(name = %camera.name, path = %camera.path, location = ?camera.location, "Camera");
        }
        if cameras.is_empty() {
            warn!("No cameras available");
        }
        self.available_cameras = cameras;
        self.cameras_initialized = true;
        Task::none()
    }

    pub(crate) fn handle_camera_frame(
        &mut self,
        frame: Arc<CameraFrame>,
    ) -> Task<cosmic::Action<Message>> {
        static FRAME_MSG_COUNT: std::sync::atomic::AtomicU64 =
            std::sync::atomic::AtomicU64::new(0);
        let count = FRAME_MSG_COUNT.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        if count % timing::FRAME_LOG_INTERVAL == 0 {
            debug!(
                message = count,
                width = frame.width,
                height = frame.height,
                "CameraFrame message received"
            );
        }

        if !frame.is_complete() {
            return Task::none();
        }

        self.preview = Some(image::Handle::from_rgba(
            frame.width,
            frame.height,
            frame.data.to_vec(),
        ));
        self.current_frame = Some(frame);
        Task::none()
    }

    pub(crate) fn handle_flip_camera(&mut self) -> Task<cosmic::Action<Message>> {
        let previous = self.selected_camera().map(|c| c.path.clone());
        self.view_state = self.view_state.apply(Intent::Flip);
        info!(facing = %self.view_state.facing, "Camera flipped");

        // Frames from the old device must not be captured
        if self.selected_camera().map(|c| c.path.clone()) != previous {
            self.current_frame = None;
            self.preview = None;
        }

        Task::none()
    }
}
