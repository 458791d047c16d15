// SPDX-License-Identifier: GPL-3.0-only

//! Capture handlers
//!
//! Handles the flash toggle and the snap flow. A snap with flash either
//! lights the LEDs or shows a white overlay for `FLASH_DURATION`, then the
//! latest preview frame is taken.

use crate::app::state::{AppModel, FlashPlan, Intent, Message};
use crate::backends::camera::FrameCamera;
use crate::backends::permission::{ConsentPrompt, StorageConsent};
use crate::constants::capture;
use crate::pipelines::photo::{SnapOutcome, SnapPipeline};
use crate::storage::{DirectoryLibrary, photo_directory, spool_directory};
use cosmic::Task;
use tracing::{debug, info};

impl AppModel {
    /// Create a delayed task that emits a message after the specified duration
    pub(crate) fn delay_task(delay: std::time::Duration, message: Message) -> Task<cosmic::Action<Message>> {
        Task::perform(
            async move {
                tokio::time::sleep(delay).await;
                message
            },
            cosmic::Action::App,
        )
    }

    pub(crate) fn handle_toggle_flash(&mut self) -> Task<cosmic::Action<Message>> {
        self.view_state = self.view_state.apply(Intent::ToggleFlash);
        info!(flash = %self.view_state.flash, "Flash toggled");
        Task::none()
    }

    pub(crate) fn handle_capture(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(plan) = FlashPlan::for_press(
            self.is_capturing,
            self.view_state,
            self.flash_hardware.has_devices(),
        ) else {
            debug!("Snap already in flight, ignoring");
            return Task::none();
        };
        self.is_capturing = true;

        match plan {
            FlashPlan::None => self.start_snap(),
            FlashPlan::Led => {
                info!("Flash enabled - lighting LEDs before capture");
                self.flash_hardware.all_on();
                self.leds_lit = true;
                Self::delay_task(capture::FLASH_DURATION, Message::FlashComplete)
            }
            FlashPlan::Screen => {
                info!("Flash enabled - showing flash before capture");
                self.flash_active = true;
                Self::delay_task(capture::FLASH_DURATION, Message::FlashComplete)
            }
        }
    }

    pub(crate) fn handle_flash_complete(&mut self) -> Task<cosmic::Action<Message>> {
        info!("Flash complete - capturing photo");
        // The frame is taken before the light goes off
        let task = self.start_snap();
        self.flash_active = false;
        if self.leds_lit {
            self.flash_hardware.all_off();
            self.leds_lit = false;
        }
        task
    }

    /// Hand the current frame to the snap pipeline
    fn start_snap(&mut self) -> Task<cosmic::Action<Message>> {
        let camera = FrameCamera {
            frame: self.current_frame.clone(),
            mirrored: self.preview_mirrored(),
            shutter_sound: self.config.play_shutter_sound,
            spool_dir: spool_directory(),
        };
        let library_dir = photo_directory(&self.config);
        let gate = StorageConsent::new(
            self.consent.clone(),
            ConsentPrompt::Dialog,
            library_dir.clone(),
        );
        let library = DirectoryLibrary::new(library_dir);

        Task::perform(
            async move { SnapPipeline::new(camera, gate, library).run().await },
            |outcome| cosmic::Action::App(Message::SnapFinished(outcome)),
        )
    }

    pub(crate) fn handle_snap_finished(
        &mut self,
        outcome: SnapOutcome,
    ) -> Task<cosmic::Action<Message>> {
        self.is_capturing = false;
        if self.consent.merge_into(&mut self.config) {
            debug!("Storage consent granted during snap");
        }
        if let SnapOutcome::Saved(path) = &outcome {
            info!(path = %path.display(), "Snap finished");
        }
        self.notification = outcome.notification();
        Task::none()
    }
}
