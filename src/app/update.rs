// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function acts as a dispatcher; the handlers live in
//! the `handlers` submodules organized by functional domain.
//!
//! # Handler Modules
//!
//! - `handlers::ui`: context drawer, links, notifications
//! - `handlers::camera`: camera list, frames, flipping
//! - `handlers::capture`: flash and the snap flow
//! - `handlers::system`: settings and config updates

use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => self.handle_launch_url(url),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),
            Message::DismissNotification => self.handle_dismiss_notification(),

            // ===== Camera Control =====
            Message::CamerasInitialized(cameras) => self.handle_cameras_initialized(cameras),
            Message::CameraFrame(frame) => self.handle_camera_frame(frame),
            Message::FlipCamera => self.handle_flip_camera(),

            // ===== Capture =====
            Message::ToggleFlash => self.handle_toggle_flash(),
            Message::Capture => self.handle_capture(),
            Message::FlashComplete => self.handle_flash_complete(),
            Message::SnapFinished(outcome) => self.handle_snap_finished(outcome),

            // ===== Settings =====
            Message::UpdateConfig(config) => self.handle_update_config(config),
            Message::SetAppTheme(index) => self.handle_set_app_theme(index),
            Message::ToggleMirrorPreview => self.handle_toggle_mirror_preview(),
            Message::ToggleShutterSound => self.handle_toggle_shutter_sound(),
            Message::ToggleStorageConsent => self.handle_toggle_storage_consent(),
            Message::ForgetStorageConsent => self.handle_forget_storage_consent(),
        }
    }
}
